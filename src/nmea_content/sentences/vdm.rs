use crate::{
    self as nmea0183_dma, FromSentence,
    ais::{Fragment, Payload},
    nmea_content::{RadioChannel, parse},
};

/// VDM - AIS VHF Data-link Message
///
/// <https://gpsd.gitlab.io/gpsd/AIVDM.html#_aivdmaivdo_sentence_layer>
///
/// ```text
///        1 2 3 4 5      6
///        | | | | |      |
/// !--VDM,x,x,x,a,s--s,x*hh<CR><LF>
/// ```
///
/// The payload is left armored; decode it with [`VDM::payload`] or join
/// multi-sentence messages with an [`Assembler`](crate::ais::Assembler).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromSentence)]
pub struct VDM<'a> {
    #[nmea(parser(parse::fragment))]
    /// Number of sentences carrying the message, 1-9
    pub fragment_count: u8,
    #[nmea(parser(parse::fragment))]
    /// Number of this sentence, 1-based
    pub fragment_number: u8,
    /// Sequential message ID shared by the fragments of a multi-sentence message
    pub sequential_id: Option<u8>,
    /// Radio channel the message was received on
    pub channel: Option<RadioChannel>,
    /// Armored payload
    pub payload: &'a str,
    #[nmea(parser(parse::fill_bits))]
    /// Number of fill bits at the end of the payload, 0-5
    pub fill_bits: u8,
}

/// VDO - AIS VHF Data-link Own-vessel report
///
/// Same layout as [`VDM`], carrying messages sent by the own vessel.
pub type VDO<'a> = VDM<'a>;

impl<'a> VDM<'a> {
    /// Returns `true` if the message fits in this one sentence.
    pub fn is_complete(&self) -> bool {
        self.fragment_count == 1
    }

    /// Returns a decodable view of the payload of this sentence.
    ///
    /// Only meaningful on its own when [`is_complete`](Self::is_complete).
    pub fn payload(&self) -> Payload<'a> {
        Payload::with_fill_bits(self.payload.as_bytes(), self.fill_bits)
    }

    /// Returns this sentence as an [`Assembler`](crate::ais::Assembler) fragment.
    pub fn fragment(&self) -> Fragment<'a> {
        Fragment::from(self)
    }
}

impl<'a> From<&VDM<'a>> for Fragment<'a> {
    fn from(vdm: &VDM<'a>) -> Self {
        Fragment {
            count: vdm.fragment_count,
            number: vdm.fragment_number,
            sequence_id: vdm.sequential_id,
            payload: vdm.payload,
            fill_bits: vdm.fill_bits,
        }
    }
}
