//! Callback-scoped view of a validated sentence.

use crate::{
    ais::Payload,
    error::{ContentResult, Error, FrameError},
    nmea0183::{ADDRESS_LEN, Frame, VDM, VDO, sentence_type},
    parse::FromSentence,
};

/// Field delimiter after in-place tokenization.
const DELIMITER: char = '\0';

/// A validated sentence, borrowed from the channel buffer.
///
/// The view only exists for the duration of
/// [`SentenceHandler::on_sentence`](crate::SentenceHandler::on_sentence).
/// Its field delimiters have been replaced with NUL bytes, so fields are
/// found by scanning for terminators from the start of the sentence.
///
/// Field 0 is the address field (`GPGGA`, `AIVDM`, ...), data fields start at 1.
#[derive(Debug, Clone, Copy)]
pub struct Sentence<'a> {
    raw: &'a [u8],
    body: &'a str,
    checksum: Option<u8>,
}

impl<'a> Sentence<'a> {
    /// Creates a view of `raw` (start marker to LF inclusive), located by `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidCharacter`] if the body is not ASCII.
    pub fn new(raw: &'a [u8], frame: Frame) -> Result<Self, FrameError> {
        let body = raw.get(1..frame.body_end).unwrap_or_default();
        let body = core::str::from_utf8(body).map_err(|error| {
            FrameError::InvalidCharacter(body[error.valid_up_to()])
        })?;

        Ok(Self {
            raw,
            body,
            checksum: frame.checksum,
        })
    }

    /// Returns the start marker, `$` or `!`.
    pub fn start_marker(&self) -> char {
        self.raw.first().map_or('$', |&marker| marker as char)
    }

    /// Returns the address field, talker and formatter (`"AIVDM"`).
    pub fn address(&self) -> &'a str {
        self.fields().next().unwrap_or_default()
    }

    /// Returns the two-character talker identifier (`"AI"`).
    pub fn talker(&self) -> &'a str {
        self.address().get(..2).unwrap_or_default()
    }

    /// Returns the three-character formatter (`"VDM"`).
    pub fn formatter(&self) -> &'a str {
        self.address().get(2..ADDRESS_LEN).unwrap_or_default()
    }

    /// Returns the formatter packed into 24 bits for O(1) comparison.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_dma::{ChannelBuilder, NoDma, Sentence, XDR};
    ///
    /// let mut channel = ChannelBuilder::<256>::new()
    ///     .build(NoDma, |sentence: &Sentence<'_>| {
    ///         assert_eq!(sentence.sentence_type(), XDR);
    ///     })
    ///     .unwrap();
    /// channel.feed(b"$IIXDR,C,19.5,C,AIR*07\r\n");
    /// assert_eq!(channel.stats().sentences, 1);
    /// ```
    pub fn sentence_type(&self) -> u32 {
        match self.formatter().as_bytes() {
            &[a, b, c] => sentence_type([a, b, c]),
            _ => 0,
        }
    }

    /// Returns the text of field `index`, or `None` past the last field.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields().nth(index)
    }

    /// Returns an iterator over every field, starting with the address field.
    pub fn fields(&self) -> Fields<'a> {
        Fields {
            inner: self.body.split(DELIMITER),
            index: 0,
        }
    }

    /// Returns an iterator over the data fields, starting at field 1.
    pub fn data_fields(&self) -> Fields<'a> {
        let mut fields = self.fields();
        fields.next();
        fields
    }

    /// Returns the number of fields, including the address field.
    pub fn field_count(&self) -> usize {
        self.fields().count()
    }

    /// Returns the transmitted checksum, if the sentence carried one.
    pub fn checksum(&self) -> Option<u8> {
        self.checksum
    }

    /// Returns the length of the sentence, start marker to LF inclusive.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the raw bytes of the sentence, with NUL field delimiters.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }

    /// Parses the data fields into `T`.
    ///
    /// Every data field must be consumed.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] if the sentence has fewer fields than `T`
    /// - [`Error::TrailingField`] if it has more
    /// - any error raised while parsing a field
    pub fn parse<T>(&self) -> ContentResult<&'a str, T>
    where
        T: FromSentence<'a>,
    {
        let mut fields = self.data_fields();
        let value = T::from_fields(&mut fields)?;
        fields.finish()?;
        Ok(value)
    }

    /// Returns the AIS payload of a `VDM`/`VDO` sentence.
    ///
    /// The payload is field 5, its fill-bit count field 6 (0 if absent).
    pub fn ais_payload(&self) -> Option<Payload<'a>> {
        if !matches!(self.sentence_type(), VDM | VDO) {
            return None;
        }

        let data = self.field(5)?;
        let fill_bits = self
            .field(6)
            .and_then(|fill_bits| fill_bits.parse().ok())
            .unwrap_or(0);

        Some(Payload::with_fill_bits(data.as_bytes(), fill_bits))
    }
}

/// Iterator over the fields of a [`Sentence`].
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    inner: core::str::Split<'a, char>,
    index: usize,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let field = self.inner.next()?;
        self.index += 1;
        Some(field)
    }
}

impl<'a> Fields<'a> {
    /// Returns the index of the field the next call to `next` yields.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the next field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] with the index of the field if there is none.
    pub fn next_field<E>(&mut self) -> ContentResult<&'a str, &'a str, E> {
        let index = self.index;
        self.next().ok_or(Error::MissingField(index))
    }

    /// Succeeds if every field has been consumed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrailingField`] with the first unconsumed field.
    pub fn finish<E>(mut self) -> ContentResult<&'a str, (), E> {
        match self.next() {
            Some(field) => Err(Error::TrailingField(field)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChecksumMode;
    use crate::nmea0183::validate;

    fn tokenized<const N: usize>(raw: &[u8; N]) -> ([u8; N], Frame) {
        let frame = Frame {
            body_end: N - 5,
            checksum: None,
        };
        let mut buffer = *raw;
        for byte in &mut buffer[..frame.body_end] {
            if *byte == b',' {
                *byte = 0;
            }
        }
        (buffer, frame)
    }

    #[test]
    fn test_sentence_fields() {
        let raw = b"$GPXXX,A,B,C*23\r\n";
        let frame = validate(raw, ChecksumMode::Required).unwrap();
        let (buffer, _) = tokenized(raw);
        let sentence = Sentence::new(&buffer, frame).unwrap();

        assert_eq!(sentence.start_marker(), '$');
        assert_eq!(sentence.address(), "GPXXX");
        assert_eq!(sentence.talker(), "GP");
        assert_eq!(sentence.formatter(), "XXX");
        assert_eq!(sentence.sentence_type(), 0x58_58_58);
        assert_eq!(sentence.field(0), Some("GPXXX"));
        assert_eq!(sentence.field(1), Some("A"));
        assert_eq!(sentence.field(2), Some("B"));
        assert_eq!(sentence.field(3), Some("C"));
        assert_eq!(sentence.field(4), None);
        assert_eq!(sentence.field_count(), 4);
        assert_eq!(sentence.checksum(), Some(0x23));
        assert_eq!(sentence.len(), raw.len());
    }

    #[test]
    fn test_fields_errors() {
        let (raw, frame) = tokenized(b"$GPXXX,A,,C*61\r\n");
        let sentence = Sentence::new(&raw, frame).unwrap();

        let mut fields = sentence.data_fields();
        assert_eq!(fields.index(), 1);
        assert_eq!(fields.next_field::<()>(), Ok("A"));
        assert_eq!(fields.next_field::<()>(), Ok(""));
        assert_eq!(fields.clone().finish::<()>(), Err(Error::TrailingField("C")));
        assert_eq!(fields.next_field::<()>(), Ok("C"));
        assert_eq!(fields.next_field::<()>(), Err(Error::MissingField(4)));
        assert_eq!(fields.finish::<()>(), Ok(()));
    }

    #[test]
    fn test_ais_payload_only_for_vdm() {
        let (raw, frame) = tokenized(b"$GPXXX,1,1,,A,15M67N0000G?Uf6E`FepT@3n00Sa,0*48\r\n");
        let sentence = Sentence::new(&raw, frame).unwrap();
        assert!(sentence.ais_payload().is_none());

        let (raw, frame) = tokenized(b"!AIVDM,1,1,,A,15M67N0000G?Uf6E`FepT@3n00Sa,2*52\r\n");
        let sentence = Sentence::new(&raw, frame).unwrap();
        let payload = sentence.ais_payload().unwrap();
        assert_eq!(payload.data(), b"15M67N0000G?Uf6E`FepT@3n00Sa");
        assert_eq!(payload.fill_bits(), 2);
    }
}
