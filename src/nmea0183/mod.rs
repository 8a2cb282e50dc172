//! # NMEA 0183 Sentence Framing
//!
//! This module validates complete candidate sentences of the form
//! `$AAAAA,D1,D2,...,Dn*CC\r\n` (or `!AAAAA,...` for encapsulated sentences
//! such as AIS `VDM`).
//!
//! The framer hands every span that starts with a start marker and ends with
//! LF to [`validate`]. The checks follow IEC 61162-1 loosely:
//! - the span ends with CR LF
//! - the checksum trailer `*CC` is present (see [`ChecksumMode`]) and matches
//! - the address field is exactly five characters (two talker, three formatter)

use crate::error::FrameError;

/// Number of characters in the address field (talker + formatter).
pub const ADDRESS_LEN: usize = 5;

/// Packed sentence type of `VDM`, AIS VHF data-link message.
pub const VDM: u32 = sentence_type(*b"VDM");
/// Packed sentence type of `VDO`, AIS VHF data-link own-vessel report.
pub const VDO: u32 = sentence_type(*b"VDO");
/// Packed sentence type of `MWV`, wind speed and angle.
pub const MWV: u32 = sentence_type(*b"MWV");
/// Packed sentence type of `XDR`, transducer measurements.
pub const XDR: u32 = sentence_type(*b"XDR");

/// Defines how the framer should handle sentence checksums.
///
/// Sentences can include a checksum in the format `*CC` where CC is a
/// two-digit uppercase hexadecimal value representing the XOR of all bytes
/// between the start marker and the `*` delimiter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    #[default]
    /// Checksum is required and must be present.
    ///
    /// A sentence without a `*CC` trailer is dropped. If a checksum is
    /// present, it is validated against the calculated checksum.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// Use this mode with legacy talkers that omit the trailer.
    Optional,
}

/// Location of the parts of a validated sentence, relative to its start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Index one past the last body byte (the `*`, or the CR when there is no trailer).
    pub body_end: usize,
    /// The transmitted checksum, if the sentence carried one.
    pub checksum: Option<u8>,
}

/// Packs a three-letter formatter into a 24-bit value for O(1) comparison.
///
/// The characters are stored big-endian: `0x00AABBCC` for `"ABC"`.
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::{VDM, sentence_type};
///
/// assert_eq!(sentence_type(*b"VDM"), 5_653_581);
/// assert_eq!(sentence_type(*b"VDM"), VDM);
/// ```
pub const fn sentence_type(formatter: [u8; 3]) -> u32 {
    ((formatter[0] as u32) << 16) | ((formatter[1] as u32) << 8) | formatter[2] as u32
}

/// Calculates the NMEA 0183 checksum for the given sentence body.
///
/// The checksum is the XOR of every byte between the start marker and the `*`
/// delimiter, excluding both.
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::checksum;
///
/// assert_eq!(checksum(b"GPGGA,123456,data"), 0x41);
/// ```
pub fn checksum(body: &[u8]) -> u8 {
    body.iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Formats a checksum as two uppercase ASCII hexadecimal digits, high nibble first.
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::hex_digits;
///
/// assert_eq!(hex_digits(0x41), *b"41");
/// assert_eq!(hex_digits(0x0A), *b"0A");
/// ```
pub const fn hex_digits(checksum: u8) -> [u8; 2] {
    [hex_digit(checksum >> 4), hex_digit(checksum & 0x0F)]
}

const fn hex_digit(nibble: u8) -> u8 {
    if nibble < 10 {
        b'0' + nibble
    } else {
        b'A' + nibble - 10
    }
}

/// Validates a candidate sentence.
///
/// `span` runs from the start marker to the LF, both inclusive. On success the
/// returned [`Frame`] locates the end of the body and the transmitted checksum.
///
/// # Errors
///
/// - [`FrameError::Terminator`] if the span does not end in CR LF, or the `*CC`
///   trailer is missing under [`ChecksumMode::Required`]
/// - [`FrameError::ChecksumMismatch`] if the trailer does not match the body
/// - [`FrameError::AddressLength`] if the address field is not five characters
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::{ChecksumMode, validate};
///
/// let frame = validate(b"$GPGGA,123456,data*41\r\n", ChecksumMode::Required).unwrap();
/// assert_eq!(frame.checksum, Some(0x41));
/// assert_eq!(frame.body_end, 18);
///
/// assert!(validate(b"$GPGGA,123456,data*42\r\n", ChecksumMode::Required).is_err());
/// assert!(validate(b"$GPGGA,123456,data\r\n", ChecksumMode::Required).is_err());
/// assert!(validate(b"$GPGGA,123456,data\r\n", ChecksumMode::Optional).is_ok());
/// ```
pub fn validate(span: &[u8], mode: ChecksumMode) -> Result<Frame, FrameError> {
    let len = span.len();
    if len < 3 || span[len - 1] != b'\n' || span[len - 2] != b'\r' {
        return Err(FrameError::Terminator);
    }

    let has_trailer = len >= 6 && span[len - 5] == b'*';
    let body_end = match (has_trailer, mode) {
        (true, _) => len - 5,
        (false, ChecksumMode::Optional) => len - 2,
        (false, ChecksumMode::Required) => return Err(FrameError::Terminator),
    };

    let body = &span[1..body_end];
    let calculated = checksum(body);

    let transmitted = if has_trailer {
        let found = [span[len - 4], span[len - 3]];
        if found != hex_digits(calculated) {
            return Err(FrameError::ChecksumMismatch { calculated, found });
        }
        Some(calculated)
    } else {
        None
    };

    let address_len = body
        .iter()
        .position(|&byte| byte == b',')
        .unwrap_or(body.len());
    if address_len != ADDRESS_LEN {
        return Err(FrameError::AddressLength(address_len));
    }

    Ok(Frame {
        body_end,
        checksum: transmitted,
    })
}
