//! Legacy "not applicable" values.
//!
//! Accessors on [`Payload`] return `None` when a message type does not carry a
//! field. Consumers that exchange fixed-width records (CAN frames, log files)
//! expect the historical numeric sentinels instead; this module maps between
//! the two.
//!
//! ```rust
//! use nmea0183_dma::ais::{Payload, sentinel};
//!
//! // Type 5 carries no position.
//! let payload = Payload::new(b"55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp888888888880");
//! assert_eq!(sentinel::or_sentinel(payload.latitude()), i32::MAX);
//! assert_eq!(sentinel::rate_of_turn(&payload), i8::MIN);
//! ```

use crate::ais::Payload;

/// Draught reported when the message type carries none.
pub const DRAUGHT_NOT_APPLICABLE: u8 = 0;

/// A numeric type with a reserved "not applicable" value.
pub trait Sentinel: Copy {
    /// The reserved value.
    const NOT_APPLICABLE: Self;
}

macro_rules! impl_sentinel {
    ($($t:ty => $value:expr),* $(,)?) => ($(
        impl Sentinel for $t {
            const NOT_APPLICABLE: Self = $value;
        }
    )*)
}

impl_sentinel! {
    u8 => u8::MAX,
    u16 => u16::MAX,
    u32 => u32::MAX,
    i32 => i32::MAX,
    i8 => i8::MIN,
}

/// Returns the value, or its sentinel if absent.
pub fn or_sentinel<T: Sentinel>(value: Option<T>) -> T {
    value.unwrap_or(T::NOT_APPLICABLE)
}

/// Returns `None` if `value` is the sentinel.
pub fn from_sentinel<T: Sentinel + PartialEq>(value: T) -> Option<T> {
    (value != T::NOT_APPLICABLE).then_some(value)
}

/// Encodes a flag as 0 or 1, with `u8::MAX` when absent.
pub fn flag(value: Option<bool>) -> u8 {
    value.map_or(u8::NOT_APPLICABLE, u8::from)
}

/// Rate of turn, `i8::MIN` when absent.
pub fn rate_of_turn(payload: &Payload<'_>) -> i8 {
    or_sentinel(payload.rate_of_turn())
}

/// Draught, 0 when absent.
pub fn draught(payload: &Payload<'_>) -> u8 {
    payload.draught().unwrap_or(DRAUGHT_NOT_APPLICABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASS_A: &[u8] = b"15M67N0000G?Uf6E`FepT@3n00Sa";
    const PART_A: &[u8] = b"H42O55i18tMET00000000000000";

    #[test]
    fn test_sentinels_outside_position_types() {
        let payload = Payload::new(PART_A);
        assert_eq!(or_sentinel(payload.latitude()), i32::MAX);
        assert_eq!(or_sentinel(payload.longitude()), i32::MAX);
        assert_eq!(or_sentinel(payload.speed_over_ground()), u16::MAX);
        assert_eq!(or_sentinel(payload.communication_state()), u32::MAX);
        assert_eq!(or_sentinel(payload.timestamp()), u8::MAX);
        assert_eq!(flag(payload.position_accuracy()), u8::MAX);
        assert_eq!(rate_of_turn(&payload), i8::MIN);
        assert_eq!(draught(&payload), 0);
    }

    #[test]
    fn test_values_pass_through() {
        let payload = Payload::new(CLASS_A);
        assert_eq!(or_sentinel(payload.latitude()), 22_681_271);
        assert_eq!(flag(payload.position_accuracy()), 0);
        assert_eq!(rate_of_turn(&payload), 0);

        assert_eq!(from_sentinel(i32::MAX), None);
        assert_eq!(from_sentinel(5u8), Some(5));
    }
}
