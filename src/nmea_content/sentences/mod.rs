mod mwv;
mod vdm;
mod xdr;

pub use mwv::MWV;
pub use vdm::{VDM, VDO};
pub use xdr::{Measurement, XDR};

use nom::Parser;

use crate::{
    ContentResult, Error, FieldParse, Sentence,
    nmea0183,
    parsing::{consumed, finish},
};

/// A unified enum representing all supported typed sentences.
///
/// The framer hands out untyped [`Sentence`] views; [`NmeaSentence::from_sentence`]
/// selects the content type from the packed sentence type and parses the data
/// fields into it.
///
/// The parser performs several validations:
/// - Checks the sentence type against the supported list below.
/// - Validates each individual field. Optional fields may be empty.
/// - Ensures every data field is consumed, with no trailing field left over.
///
/// ## Example Usage
///
/// ```rust
/// use nmea0183_dma::{
///     ChannelBuilder, NoDma, Sentence,
///     nmea_content::{NmeaSentence, Status},
/// };
///
/// let mut channel = ChannelBuilder::<256>::new()
///     .build(NoDma, |sentence: &Sentence<'_>| {
///         match NmeaSentence::from_sentence(sentence) {
///             Ok(NmeaSentence::MWV(mwv)) => {
///                 assert_eq!(mwv.wind_angle, Some(214.8));
///                 assert_eq!(mwv.status, Status::Valid);
///             }
///             other => panic!("unexpected {other:?}"),
///         }
///     })
///     .unwrap();
///
/// channel.feed(b"$WIMWV,214.8,R,0.1,K,A*28\r\n");
/// assert_eq!(channel.stats().sentences, 1);
/// ```
///
/// ## Supported Sentence Types
///
/// | Variant      | Sentence Type                    | Description                         |
/// |--------------|----------------------------------|-------------------------------------|
/// | VDM([`VDM`]) | AIS VHF Data-link Message        | AIS payloads received from others   |
/// | VDO([`VDO`]) | AIS VHF Data-link Own-vessel     | AIS payloads of the own vessel      |
/// | MWV([`MWV`]) | Wind Speed and Angle             | Relative or theoretical wind        |
/// | XDR([`XDR`]) | Transducer Measurements          | Temperature, pressure, angle, ...   |
///
/// ## Error Handling
///
/// Any other sentence type yields [`Error::UnrecognizedMessage`] with the
/// packed type, malformed content the error of the offending field.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence<'a> {
    /// AIS VHF Data-link Message
    VDM(VDM<'a>),
    /// AIS VHF Data-link Own-vessel report
    VDO(VDO<'a>),
    /// Wind Speed and Angle
    MWV(MWV),
    /// Transducer Measurements
    XDR(XDR<'a>),
}

impl<'a> NmeaSentence<'a> {
    /// Parses the data fields of `sentence` according to its sentence type.
    ///
    /// # Errors
    ///
    /// - [`Error::UnrecognizedMessage`] if the sentence type is not supported
    /// - any error of [`Sentence::parse`]
    pub fn from_sentence(sentence: &Sentence<'a>) -> ContentResult<&'a str, Self> {
        match sentence.sentence_type() {
            nmea0183::VDM => sentence.parse().map(Self::VDM),
            nmea0183::VDO => sentence.parse().map(Self::VDO),
            nmea0183::MWV => sentence.parse().map(Self::MWV),
            nmea0183::XDR => sentence.parse().map(Self::XDR),
            other => Err(Error::UnrecognizedMessage(other)),
        }
    }
}

macro_rules! parsable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl<'a> FieldParse<'a> for $name {
            fn parse_field(field: &'a str) -> ContentResult<&'a str, Self> {
                finish(consumed(nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*))).parse(field))
            }
        }
    };
}

parsable_enum! {
    /// AIS radio channel
    ///
    /// Some receivers report `1` and `2` instead of `A` and `B`.
    pub enum RadioChannel {
        /// A - 161.975 MHz (87B)
        'A' => A,
        /// B - 162.025 MHz (88B)
        'B' => B,
        /// 1 - Channel A, numeric form
        '1' => Numeric1,
        /// 2 - Channel B, numeric form
        '2' => Numeric2,
    }
}

parsable_enum! {
    /// Wind angle reference
    pub enum Reference {
        /// R - Relative to the bow
        'R' => Relative,
        /// T - Theoretical, relative to true north
        'T' => Theoretical,
    }
}

parsable_enum! {
    /// Wind speed unit
    pub enum SpeedUnit {
        /// K - Kilometers per hour
        'K' => KilometersPerHour,
        /// M - Meters per second
        'M' => MetersPerSecond,
        /// N - Knots
        'N' => Knots,
        /// S - Statute miles per hour
        'S' => StatuteMilesPerHour,
    }
}

parsable_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        'V' => Invalid,
    }
}

impl RadioChannel {
    /// Returns `true` for channel A in either form.
    pub fn is_a(&self) -> bool {
        matches!(self, Self::A | Self::Numeric1)
    }
}

impl SpeedUnit {
    /// Converts `speed` in this unit to knots.
    pub fn to_knots(&self, speed: f32) -> f32 {
        match self {
            Self::KilometersPerHour => speed / 1.852,
            Self::MetersPerSecond => speed * 3600.0 / 1852.0,
            Self::Knots => speed,
            Self::StatuteMilesPerHour => speed * 1609.344 / 1852.0,
        }
    }
}
