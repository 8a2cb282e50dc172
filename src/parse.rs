use nom::{Parser, character::complete::anychar};

use crate::{
    error::{ContentResult, Error},
    framer::Fields,
    parsing::{consumed, finish},
};

/// Trait for parsing a value from the text of a single sentence field.
///
/// Implementations are provided for the integer types, `f32`/`f64`, `char`,
/// `&str` and `Option<T>` (an empty field yields `None`). Every implementation
/// must consume the whole field.
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::{Error, FieldParse};
///
/// assert_eq!(u8::parse_field("42"), Ok(42));
/// assert_eq!(Option::<u8>::parse_field(""), Ok(None));
/// assert_eq!(f32::parse_field("19.5"), Ok(19.5));
/// assert_eq!(u8::parse_field("42x"), Err(Error::InvalidField("42x")));
/// assert!(u8::parse_field("").is_err());
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_dma::{ContentResult, Error, FieldParse};
///
/// struct Knots(f32);
///
/// impl<'a> FieldParse<'a> for Knots {
///     fn parse_field(field: &'a str) -> ContentResult<&'a str, Self> {
///         let value = f32::parse_field(field)?;
///         if value < 0.0 {
///             return Err(Error::InvalidField(field));
///         }
///         Ok(Knots(value))
///     }
/// }
///
/// assert!(Knots::parse_field("-1.0").is_err());
/// ```
pub trait FieldParse<'a>: Sized {
    /// Parses the whole of `field` into `Self`.
    fn parse_field(field: &'a str) -> ContentResult<&'a str, Self>;
}

/// Trait for parsing a value from consecutive sentence fields.
///
/// Every [`FieldParse`] type reads exactly one field. Structs usually derive
/// this trait with `#[derive(FromSentence)]`, reading their members in
/// declaration order; [`Sentence::parse`](crate::Sentence::parse) then checks
/// that no field is left over.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "derive")] {
/// use nmea0183_dma::{ChannelBuilder, FromSentence, NoDma, Sentence};
///
/// #[derive(Debug, PartialEq, FromSentence)]
/// struct Depth {
///     meters: f32,
///     offset: Option<f32>,
/// }
///
/// let mut channel = ChannelBuilder::<256>::new()
///     .build(NoDma, |sentence: &Sentence<'_>| {
///         let depth: Depth = sentence.parse().unwrap();
///         assert_eq!(depth, Depth { meters: 12.5, offset: None });
///     })
///     .unwrap();
/// channel.feed(b"$SDDPT,12.5,*4F\r\n");
/// # }
/// ```
pub trait FromSentence<'a>: Sized {
    /// Parses `Self` from the next fields of `fields`.
    fn from_fields(fields: &mut Fields<'a>) -> ContentResult<&'a str, Self>;
}

impl<'a, T> FromSentence<'a> for T
where
    T: FieldParse<'a>,
{
    fn from_fields(fields: &mut Fields<'a>) -> ContentResult<&'a str, Self> {
        T::parse_field(fields.next_field()?)
    }
}

macro_rules! impl_number_type {
    ($($t:ident => $parser:path),* $(,)?) => ($(
        impl<'a> FieldParse<'a> for $t {
            fn parse_field(field: &'a str) -> ContentResult<&'a str, Self> {
                finish(consumed($parser).parse(field))
            }
        }
    )*)
}

impl_number_type! {
    u8 => nom::character::complete::u8,
    u16 => nom::character::complete::u16,
    u32 => nom::character::complete::u32,
    u64 => nom::character::complete::u64,
    i8 => nom::character::complete::i8,
    i16 => nom::character::complete::i16,
    i32 => nom::character::complete::i32,
    i64 => nom::character::complete::i64,
    f32 => nom::number::complete::float,
    f64 => nom::number::complete::double,
}

impl<'a> FieldParse<'a> for char {
    fn parse_field(field: &'a str) -> ContentResult<&'a str, Self> {
        finish(consumed(anychar).parse(field))
    }
}

impl<'a> FieldParse<'a> for &'a str {
    fn parse_field(field: &'a str) -> ContentResult<&'a str, Self> {
        Ok(field)
    }
}

impl<'a, T> FieldParse<'a> for Option<T>
where
    T: FieldParse<'a>,
{
    fn parse_field(field: &'a str) -> ContentResult<&'a str, Self> {
        if field.is_empty() {
            return Ok(None);
        }

        T::parse_field(field).map(Some)
    }
}

impl<'a, T, const N: usize> FromSentence<'a> for [T; N]
where
    T: FromSentence<'a> + Default + Copy,
{
    fn from_fields(fields: &mut Fields<'a>) -> ContentResult<&'a str, Self> {
        let mut elems = [T::default(); N];
        for elem in &mut elems {
            *elem = T::from_fields(fields)?;
        }
        Ok(elems)
    }
}

/// Reads elements until the fields run out.
///
/// Fails with [`Error::InvalidField`] if more than `N` elements are present.
impl<'a, T, const N: usize> FromSentence<'a> for heapless::Vec<T, N>
where
    T: FromSentence<'a>,
{
    fn from_fields(fields: &mut Fields<'a>) -> ContentResult<&'a str, Self> {
        let mut elems = heapless::Vec::new();

        loop {
            let mut lookahead = fields.clone();
            let Some(next) = lookahead.next() else {
                return Ok(elems);
            };

            let elem = T::from_fields(fields)?;
            if elems.push(elem).is_err() {
                return Err(Error::InvalidField(next));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(u16::parse_field("1023"), Ok(1023));
        assert_eq!(i8::parse_field("-128"), Ok(-128));
        assert!(matches!(u8::parse_field("256"), Err(Error::ParsingError(_))));
        assert_eq!(f64::parse_field("-3.25"), Ok(-3.25));
        assert_eq!(f32::parse_field("1.5.0"), Err(Error::InvalidField("1.5.0")));
    }

    #[test]
    fn test_parse_char_and_str() {
        assert_eq!(char::parse_field("A"), Ok('A'));
        assert_eq!(char::parse_field("AB"), Err(Error::InvalidField("AB")));
        assert_eq!(<&str>::parse_field("AIR"), Ok("AIR"));
        assert_eq!(<&str>::parse_field(""), Ok(""));
    }

    #[test]
    fn test_parse_option() {
        assert_eq!(Option::<char>::parse_field(""), Ok(None));
        assert_eq!(Option::<char>::parse_field("B"), Ok(Some('B')));
        assert!(Option::<u8>::parse_field("x").is_err());
    }
}
