//! Field parsers for `#[nmea(parser(...))]` attributes.

use crate::{ContentResult, Error, FieldParse, Fields};

/// Fragment count or number of a multi-sentence message, 1-9.
pub fn fragment<'a>(fields: &mut Fields<'a>) -> ContentResult<&'a str, u8> {
    let field = fields.next_field()?;
    match u8::parse_field(field)? {
        number @ 1..=9 => Ok(number),
        _ => Err(Error::InvalidField(field)),
    }
}

/// Fill-bit count of an AIS payload, 0-5. An empty field counts as 0.
pub fn fill_bits<'a>(fields: &mut Fields<'a>) -> ContentResult<&'a str, u8> {
    let field = fields.next_field()?;
    match Option::<u8>::parse_field(field)? {
        None => Ok(0),
        Some(bits @ 0..=5) => Ok(bits),
        Some(_) => Err(Error::InvalidField(field)),
    }
}

/// Angle in degrees, `0 <= angle < 360`.
pub fn angle<'a>(fields: &mut Fields<'a>) -> ContentResult<&'a str, Option<f32>> {
    let field = fields.next_field()?;
    match Option::<f32>::parse_field(field)? {
        Some(angle) if !(0.0..360.0).contains(&angle) => Err(Error::InvalidField(field)),
        angle => Ok(angle),
    }
}
