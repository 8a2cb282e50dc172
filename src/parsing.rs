//! # Parsing Utilities
//!
//! This module provides nom helpers for parsing the text of a single field:
//! a combinator that insists on consuming the whole field, and the conversion
//! from nom's result type to [`ContentResult`].

use nom::{Err, IResult, Input, Mode, OutputMode, PResult, Parser, error::ParseError};

use crate::error::{ContentResult, Error};

/// Runs `f` and rejects the input unless it was consumed completely.
///
/// A field such as `"12x"` is well-formed up to the `x`; this combinator turns
/// the leftover into [`Error::InvalidField`] carrying the whole input.
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::{Error, parsing::consumed};
/// use nom::{IResult, Parser, character::complete::u8};
///
/// let result: IResult<_, _, Error<_, nom::error::Error<_>>> = consumed(u8).parse("42");
/// assert_eq!(result, Ok(("", 42)));
///
/// let result: IResult<_, _, Error<_, nom::error::Error<_>>> = consumed(u8).parse("42x");
/// assert_eq!(result, Err(nom::Err::Error(Error::InvalidField("42x"))));
/// ```
pub fn consumed<I, E, F>(
    f: F,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = Error<I, E>>
where
    I: Input,
    E: ParseError<I>,
    F: Parser<I, Error = Error<I, E>>,
{
    Consumed { f }
}

struct Consumed<F> {
    f: F,
}

impl<I, E, F> Parser<I> for Consumed<F>
where
    I: Input,
    E: ParseError<I>,
    F: Parser<I, Error = Error<I, E>>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = Error<I, E>;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let input = i.clone();
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| Error::InvalidField(input))));
        }

        Ok((i, o))
    }
}

/// Extracts the value of a finished field parser.
///
/// Incomplete input cannot happen with `complete` parsers and is reported as
/// [`Error::Unknown`].
pub fn finish<I, O, E>(result: IResult<I, O, Error<I, E>>) -> ContentResult<I, O, E> {
    match result {
        Ok((_, value)) => Ok(value),
        Err(Err::Error(error) | Err::Failure(error)) => Err(error),
        Err(Err::Incomplete(_)) => Err(Error::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::{bytes::complete::take, character::complete::u16};

    type FieldError<'a> = Error<&'a str, nom::error::Error<&'a str>>;

    #[test]
    fn test_consumed() {
        let result: IResult<_, _, FieldError> = consumed(take(3u8)).parse("abc");
        assert_eq!(result, Ok(("", "abc")));

        let result: IResult<_, _, FieldError> = consumed(take(3u8)).parse("abcd");
        assert_eq!(result, Err(Err::Error(Error::InvalidField("abcd"))));
    }

    #[test]
    fn test_finish() {
        let result: IResult<_, _, FieldError> = consumed(u16).parse("1023");
        assert_eq!(finish(result), Ok(1023));

        let result: IResult<_, u16, FieldError> = consumed(u16).parse("");
        assert!(matches!(finish(result), Err(Error::ParsingError(_))));
    }
}
