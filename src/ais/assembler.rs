//! Reassembly of AIS payloads split over several sentences.
//!
//! Type 5 messages (424 bits) do not fit a single 82-byte sentence and are
//! sent as two fragments sharing a sequential message ID:
//!
//! ```text
//! !AIVDM,2,1,3,B,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*..
//! !AIVDM,2,2,3,B,88888888880,2*..
//! ```
//!
//! The [`Assembler`] copies the fragments of one message into a fixed buffer
//! and yields the complete payload once the last fragment arrives.

use log::debug;

use crate::ais::{MAX_PAYLOAD_LEN, Payload};

/// One fragment of a possibly multi-sentence payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Number of fragments of the message, 1-9.
    pub count: u8,
    /// Number of this fragment, 1-based.
    pub number: u8,
    /// Sequential message ID shared by the fragments, if any.
    pub sequence_id: Option<u8>,
    /// Armored payload of this fragment.
    pub payload: &'a str,
    /// Fill bits, only meaningful on the last fragment.
    pub fill_bits: u8,
}

/// A complete payload owned by the [`Assembler`]'s caller.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPayload {
    data: heapless::String<MAX_PAYLOAD_LEN>,
    fill_bits: u8,
}

impl AssembledPayload {
    /// Returns a decodable view of the payload.
    pub fn payload(&self) -> Payload<'_> {
        Payload::with_fill_bits(self.data.as_bytes(), self.fill_bits)
    }

    /// Returns the armored characters.
    pub fn as_str(&self) -> &str {
        &self.data
    }
}

/// Joins payload fragments.
#[derive(Debug, Default, Clone)]
pub struct Assembler {
    data: heapless::String<MAX_PAYLOAD_LEN>,
    count: u8,
    next: u8,
    sequence_id: Option<u8>,
}

impl Assembler {
    /// Creates an idle assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a message is partially assembled.
    pub fn is_pending(&self) -> bool {
        self.next != 0
    }

    /// Drops any partially assembled message.
    pub fn reset(&mut self) {
        self.data.clear();
        self.count = 0;
        self.next = 0;
        self.sequence_id = None;
    }

    /// Adds a fragment.
    ///
    /// Returns the complete payload when `fragment` is the last one of its
    /// message. A fragment that does not continue the pending message drops
    /// it; a first fragment then starts a new one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_dma::ais::{Assembler, Fragment};
    ///
    /// let mut assembler = Assembler::new();
    /// let first = Fragment {
    ///     count: 2,
    ///     number: 1,
    ///     sequence_id: Some(3),
    ///     payload: "55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8",
    ///     fill_bits: 0,
    /// };
    /// assert!(assembler.push(first).is_none());
    ///
    /// let second = Fragment { number: 2, payload: "88888888880", fill_bits: 2, ..first };
    /// let complete = assembler.push(second).unwrap();
    /// assert_eq!(complete.payload().imo_number(), Some(9_134_270));
    /// ```
    pub fn push(&mut self, fragment: Fragment<'_>) -> Option<AssembledPayload> {
        if fragment.count == 0 || fragment.number == 0 || fragment.number > fragment.count {
            debug!("ignoring fragment {}/{}", fragment.number, fragment.count);
            self.reset();
            return None;
        }

        if fragment.number == 1 {
            if self.is_pending() {
                debug!("dropping incomplete message, new message started");
            }
            self.reset();
            self.count = fragment.count;
            self.sequence_id = fragment.sequence_id;
        } else if !self.continues(&fragment) {
            debug!(
                "dropping message, unexpected fragment {}/{}",
                fragment.number, fragment.count
            );
            self.reset();
            return None;
        }

        if self.data.push_str(fragment.payload).is_err() {
            debug!("dropping message longer than {MAX_PAYLOAD_LEN} characters");
            self.reset();
            return None;
        }

        if fragment.number < fragment.count {
            self.next = fragment.number + 1;
            return None;
        }

        let data = core::mem::take(&mut self.data);
        self.reset();
        Some(AssembledPayload {
            data,
            fill_bits: fragment.fill_bits,
        })
    }

    fn continues(&self, fragment: &Fragment<'_>) -> bool {
        self.is_pending()
            && fragment.number == self.next
            && fragment.count == self.count
            && fragment.sequence_id == self.sequence_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: Fragment<'static> = Fragment {
        count: 2,
        number: 1,
        sequence_id: Some(1),
        payload: "55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8",
        fill_bits: 0,
    };

    const SECOND: Fragment<'static> = Fragment {
        count: 2,
        number: 2,
        sequence_id: Some(1),
        payload: "88888888880",
        fill_bits: 2,
    };

    #[test]
    fn test_single_fragment() {
        let mut assembler = Assembler::new();
        let complete = assembler
            .push(Fragment {
                count: 1,
                number: 1,
                sequence_id: None,
                payload: "15M67N0000G?Uf6E`FepT@3n00Sa",
                fill_bits: 0,
            })
            .unwrap();
        assert_eq!(complete.payload().mmsi(), Some(366_053_240));
        assert!(!assembler.is_pending());
    }

    #[test]
    fn test_two_fragments() {
        let mut assembler = Assembler::new();
        assert!(assembler.push(FIRST).is_none());
        assert!(assembler.is_pending());

        let complete = assembler.push(SECOND).unwrap();
        assert_eq!(complete.as_str().len(), 71);
        assert_eq!(complete.payload().fill_bits(), 2);
        assert!(complete.payload().check_length());
        assert!(!assembler.is_pending());
    }

    #[test]
    fn test_out_of_order() {
        let mut assembler = Assembler::new();
        assert!(assembler.push(SECOND).is_none());
        assert!(!assembler.is_pending());

        assert!(assembler.push(FIRST).is_none());
        let other = Fragment {
            sequence_id: Some(2),
            ..SECOND
        };
        assert!(assembler.push(other).is_none());
        assert!(!assembler.is_pending());

        // A new first fragment restarts the message.
        assert!(assembler.push(FIRST).is_none());
        assert!(assembler.push(FIRST).is_none());
        assert!(assembler.push(SECOND).is_some());
    }

    #[test]
    fn test_invalid_numbering() {
        let mut assembler = Assembler::new();
        let invalid = Fragment {
            number: 3,
            ..SECOND
        };
        assert!(assembler.push(invalid).is_none());
        let invalid = Fragment { count: 0, ..FIRST };
        assert!(assembler.push(invalid).is_none());
    }
}
