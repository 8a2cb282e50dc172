//! # Error Types
//!
//! This module defines the error types used throughout the library.
//!
//! Framing problems never stop a channel: they are reported as [`FrameError`]
//! values to the logging facade and to [`SentenceHandler::on_drop`], and the
//! scanner resynchronizes on the next start marker. Content parsing (typed
//! sentences) uses [`Error`], which plugs into nom's error traits.
//!
//! [`SentenceHandler::on_drop`]: crate::SentenceHandler::on_drop

use core::fmt::Debug;

use nom::error::{ErrorKind, FromExternalError, ParseError};

/// Result of parsing the content of a framed sentence.
///
/// `I` is the field type (usually `&str`) and `E` the wrapped nom error.
pub type ContentResult<I, O, E = nom::error::Error<I>> = Result<O, Error<I, E>>;

/// Represents all possible errors that can occur while parsing sentence content.
///
/// This enum covers missing or malformed fields, unsupported sentence types and
/// the nom errors raised by field parsers.
#[derive(Debug, PartialEq)]
pub enum Error<I, E> {
    /// The sentence ended before the field at this index could be read.
    ///
    /// Indices count data fields, starting at 1 for the first field after the
    /// address field.
    MissingField(usize),

    /// The sentence has more fields than the content type declares.
    TrailingField(I),

    /// The field could not be parsed because its format was invalid.
    ///
    /// This wraps nom's standard parsing errors.
    ParsingError(E),

    /// The sentence type is not recognized by the parser.
    ///
    /// Contains the packed sentence type (see [`sentence_type`](crate::sentence_type)).
    UnrecognizedMessage(u32),

    /// A field in the sentence was invalid.
    ///
    /// This error occurs when a field is well-formed but its value is out of
    /// the range the content type accepts. Contains the offending field.
    InvalidField(I),

    /// An unknown error occurred.
    Unknown,
}

impl<I, E> ParseError<I> for Error<I, E>
where
    E: ParseError<I>,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Error::ParsingError(E::from_error_kind(input, kind))
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E, EX> FromExternalError<I, EX> for Error<I, E>
where
    E: FromExternalError<I, EX>,
{
    fn from_external_error(input: I, kind: ErrorKind, e: EX) -> Self {
        Error::ParsingError(E::from_external_error(input, kind, e))
    }
}

/// Why a candidate sentence was dropped by the framer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The bytes before LF were not CR, or the `*hh` trailer was missing.
    #[error("sentence is not terminated by *hh<CR><LF>")]
    Terminator,

    /// The transmitted checksum does not match the XOR of the sentence body.
    #[error("checksum mismatch (calculated {calculated:02X}, found {found:?})")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence body.
        calculated: u8,
        /// The two characters found after `*`.
        found: [u8; 2],
    },

    /// The address field is not exactly five characters long.
    #[error("address field has {0} characters, expected 5")]
    AddressLength(usize),

    /// A byte outside the printable range appeared inside a sentence.
    #[error("byte 0x{0:02X} is not allowed inside a sentence")]
    InvalidCharacter(u8),

    /// No terminator arrived within the maximum sentence length.
    #[error("sentence exceeds {0} bytes without a terminator")]
    Overflow(usize),

    /// A new start marker arrived before the previous sentence was terminated.
    #[error("sentence restarted before its terminator")]
    Restarted,
}

/// Errors raised by [`Registry`](crate::Registry) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Every slot of the registry is already bound to a hardware channel.
    #[error("registry is full ({0} channels)")]
    Full(usize),

    /// No channel is registered for the hardware identity.
    #[error("no channel registered for this hardware identity")]
    UnknownChannel,
}

/// Error returned by [`Registry::register_channel`](crate::Registry::register_channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    /// The channel configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The registry has no free slot.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised when a [`FramerConfig`](crate::FramerConfig) cannot be honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The chunk size is zero.
    #[error("chunk size must be at least one byte")]
    EmptyChunk,

    /// The maximum sentence length cannot hold the smallest framed sentence.
    #[error("maximum sentence length {0} is below the minimum of {min}", min = crate::framer::MIN_SENTENCE_LEN)]
    SentenceTooShort(usize),

    /// A maximum-length sentence plus one chunk does not fit in the buffer.
    #[error("buffer of {capacity} bytes cannot hold a {sentence}-byte sentence plus a {chunk}-byte chunk")]
    BufferTooSmall {
        /// Buffer capacity.
        capacity: usize,
        /// Configured maximum sentence length.
        sentence: usize,
        /// Configured chunk size.
        chunk: usize,
    },
}
