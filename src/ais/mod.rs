//! # AIS Payload Decoder
//!
//! AIS messages travel inside `VDM`/`VDO` sentences as a six-bit ASCII
//! "armored" payload: every character carries six bits, most significant bit
//! first. Bit 0 is the MSB of the first character.
//!
//! The decoder is stateless and works on borrowed bytes. Field accessors live
//! on [`Payload`] (see [`fields`](self::fields)), aggregate reports in
//! [`report`], legacy not-available values in [`sentinel`] and multi-sentence
//! reassembly in [`assembler`].
//!
//! ```rust
//! use nmea0183_dma::ais::{MessageKind, Payload};
//!
//! let payload = Payload::new(b"15M67N0000G?Uf6E`FepT@3n00Sa");
//! assert_eq!(payload.kind(), Some(MessageKind::PositionReport(1)));
//! assert_eq!(payload.mmsi(), Some(366_053_240));
//! assert!(payload.check_length());
//! ```

pub mod assembler;
pub mod fields;
pub mod report;
pub mod sentinel;

pub use assembler::{AssembledPayload, Assembler, Fragment};
pub use report::{Dimensions, Eta, PositionReport, StaticData};

/// Longest armored payload carried by a single sentence.
pub const MAX_PAYLOAD_LEN: usize = 80;

/// Value of an invalid armor character.
pub const INVALID_SIX_BIT: u8 = 255;

const SIX_BIT: [u8; 256] = {
    let mut table = [INVALID_SIX_BIT; 256];
    let mut byte = b'0';
    while byte <= 119 {
        table[byte as usize] = if byte <= 87 { byte - 48 } else { byte - 56 };
        byte += 1;
    }
    table
};

/// Converts one armor character to its six-bit value.
///
/// Characters outside `'0'..='w'` yield [`INVALID_SIX_BIT`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::ais::convert_six_bit;
///
/// assert_eq!(convert_six_bit(b'0'), 0);
/// assert_eq!(convert_six_bit(b'W'), 39);
/// assert_eq!(convert_six_bit(b'`'), 40);
/// assert_eq!(convert_six_bit(b'w'), 63);
/// assert_eq!(convert_six_bit(b'x'), 255);
/// ```
pub const fn convert_six_bit(byte: u8) -> u8 {
    SIX_BIT[byte as usize]
}

/// Extracts bits `start..=end` of an armored payload.
///
/// Returns `None` if the range is reversed, wider than 32 bits, or reaches
/// past the end of `data`. Invalid armor characters are not detected and
/// produce garbage bits.
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::ais::get_binary_bits;
///
/// // '1' = 000001, '5' = 000101
/// assert_eq!(get_binary_bits(b"15", 0, 5), Some(1));
/// assert_eq!(get_binary_bits(b"15", 4, 9), Some(0b010001));
/// assert_eq!(get_binary_bits(b"15", 6, 12), None);
/// ```
pub fn get_binary_bits(data: &[u8], start: usize, end: usize) -> Option<u32> {
    if start > end || end - start >= 32 {
        return None;
    }

    let digits = data.get(start / 6..=end / 6)?;
    let accumulated = digits.iter().fold(0u64, |accumulated, &digit| {
        (accumulated << 6).wrapping_add(convert_six_bit(digit) as u64)
    });

    let width = end - start + 1;
    let value = (accumulated >> (5 - end % 6)) & ((1u64 << width) - 1);
    Some(value as u32)
}

/// Converts a six-bit value to its character in the AIS text alphabet.
///
/// Values below 40 map to `'@'..='g'`, the rest are kept as is.
pub const fn convert_ascii(value: u8) -> u8 {
    if value < 40 { value + 64 } else { value }
}

/// Decodes the text field starting at bit `start`, one character per six bits
/// while the character starts before bit `end`.
///
/// Returns `None` if the field reaches past the end of `data` or holds more
/// than `W` characters. Padding (`'@'`) is kept.
pub fn get_ascii_string<const W: usize>(
    data: &[u8],
    start: usize,
    end: usize,
) -> Option<heapless::String<W>> {
    let mut text = heapless::String::new();

    for bit in (start..end).step_by(6) {
        let value = get_binary_bits(data, bit, bit + 5)?;
        text.push(convert_ascii(value as u8) as char).ok()?;
    }

    Some(text)
}

/// Sign-extends the low `bits` bits of `value`.
pub(crate) const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// Message family, from the message ID and, for type 24, the part number.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Types 1, 2 and 3, Class A position report.
    PositionReport(u8),
    /// Type 5, Class A static and voyage data.
    StaticVoyage,
    /// Type 18, standard Class B position report.
    StandardClassB,
    /// Type 19, extended Class B position report.
    ExtendedClassB,
    /// Type 24 part A, static data with the vessel name.
    StaticDataA,
    /// Type 24 part B, static data with call sign and dimensions.
    StaticDataB,
    /// Any other message ID.
    Other(u8),
}

impl MessageKind {
    /// Length in characters of a well-formed payload of this kind.
    pub const fn expected_len(&self) -> Option<usize> {
        match self {
            Self::PositionReport(_) => Some(28),
            Self::StaticVoyage | Self::StandardClassB => Some(71),
            Self::ExtendedClassB => Some(52),
            Self::StaticDataA => Some(27),
            Self::StaticDataB => Some(28),
            Self::Other(_) => None,
        }
    }
}

/// An armored AIS payload and its fill-bit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload<'a> {
    data: &'a [u8],
    fill_bits: u8,
}

impl<'a> Payload<'a> {
    /// Wraps an armored payload without fill bits.
    pub const fn new(data: &'a [u8]) -> Self {
        Self::with_fill_bits(data, 0)
    }

    /// Wraps an armored payload whose last character carries `fill_bits` padding bits.
    pub const fn with_fill_bits(data: &'a [u8], fill_bits: u8) -> Self {
        Self { data, fill_bits }
    }

    /// Returns the armored characters.
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the number of padding bits.
    pub const fn fill_bits(&self) -> u8 {
        self.fill_bits
    }

    /// Returns the number of armored characters.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the payload has no characters.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of meaningful bits.
    pub const fn bit_len(&self) -> usize {
        (self.data.len() * 6).saturating_sub(self.fill_bits as usize)
    }

    /// Extracts bits `start..=end`, see [`get_binary_bits`].
    pub fn bits(&self, start: usize, end: usize) -> Option<u32> {
        get_binary_bits(self.data, start, end)
    }

    /// Decodes a text field, see [`get_ascii_string`].
    pub fn ascii<const W: usize>(&self, start: usize, end: usize) -> Option<heapless::String<W>> {
        get_ascii_string(self.data, start, end)
    }

    /// Returns the message ID, bits 0-5.
    ///
    /// `None` if the payload is empty or its first character is not valid armor.
    pub fn message_id(&self) -> Option<u8> {
        match convert_six_bit(*self.data.first()?) {
            INVALID_SIX_BIT => None,
            id => Some(id),
        }
    }

    /// Returns the message family.
    pub fn kind(&self) -> Option<MessageKind> {
        let kind = match self.message_id()? {
            id @ 1..=3 => MessageKind::PositionReport(id),
            5 => MessageKind::StaticVoyage,
            18 => MessageKind::StandardClassB,
            19 => MessageKind::ExtendedClassB,
            24 => match self.part_number()? {
                0 => MessageKind::StaticDataA,
                1 => MessageKind::StaticDataB,
                _ => MessageKind::Other(24),
            },
            id => MessageKind::Other(id),
        };

        Some(kind)
    }

    /// Checks the payload length against its message family.
    ///
    /// Accessors never call this; it is advisory.
    pub fn check_length(&self) -> bool {
        self.kind()
            .and_then(|kind| kind.expected_len())
            .is_some_and(|expected| expected == self.data.len())
    }
}
