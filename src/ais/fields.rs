//! Per-field accessors.
//!
//! Every accessor is a pure function of the payload. Bit positions depend on
//! the message ID; a field that the message type does not carry, or that lies
//! past the end of the payload, is `None`.
//!
//! | Field                  | 1-3     | 5       | 18      | 19      | 24A    | 24B     |
//! |------------------------|---------|---------|---------|---------|--------|---------|
//! | repeat indicator       | 6-7     | 6-7     | 6-7     | 6-7     | 6-7    | 6-7     |
//! | MMSI                   | 8-37    | 8-37    | 8-37    | 8-37    | 8-37   | 8-37    |
//! | navigation status      | 38-41   |         |         |         |        |         |
//! | rate of turn           | 42-49   |         |         |         |        |         |
//! | speed over ground      | 50-59   |         | 46-55   | 46-55   |        |         |
//! | position accuracy      | 60      |         | 56      | 56      |        |         |
//! | longitude              | 61-88   |         | 57-84   | 57-84   |        |         |
//! | latitude               | 89-115  |         | 85-111  | 85-111  |        |         |
//! | course over ground     | 116-127 |         | 112-123 | 112-123 |        |         |
//! | true heading           | 128-136 |         | 124-132 | 124-132 |        |         |
//! | timestamp              | 137-142 |         | 133-138 | 133-138 |        |         |
//! | maneuver indicator     | 143-144 |         |         |         |        |         |
//! | communication state    | 149-167 |         | 149-167 |         |        |         |
//! | version, IMO           |         | 38-69   |         |         |        |         |
//! | call sign              |         | 70-111  |         |         |        | 90-131  |
//! | name                   |         | 112-231 |         | 143-262 | 40-159 |         |
//! | ship and cargo type    |         | 232-239 |         | 263-270 |        | 40-47   |
//! | dimensions A-D         |         | 240-269 |         | 271-300 |        | 132-161 |
//! | position fixing device |         | 270-273 |         | 301-304 |        | 162-165 |
//! | ETA, draught           |         | 274-301 |         |         |        |         |
//! | destination, DTE       |         | 302-422 |         |         |        |         |
//! | vendor ID              |         |         |         |         |        | 48-89   |

use heapless::String;

use crate::ais::{
    MessageKind, Payload, sign_extend,
    report::{Dimensions, Eta},
};

/// Characters in a call sign or vendor ID.
pub const CALL_SIGN_LEN: usize = 7;

/// Characters in a vessel name or destination.
pub const NAME_LEN: usize = 20;

/// Bit offset of a field in Class A position reports and in Class B ones.
const fn position_field(kind: MessageKind, class_a: usize, class_b: usize) -> Option<usize> {
    match kind {
        MessageKind::PositionReport(_) => Some(class_a),
        MessageKind::StandardClassB | MessageKind::ExtendedClassB => Some(class_b),
        _ => None,
    }
}

impl<'a> Payload<'a> {
    fn position_bits(&self, class_a: usize, class_b: usize, width: usize) -> Option<u32> {
        let start = position_field(self.kind()?, class_a, class_b)?;
        self.bits(start, start + width - 1)
    }

    fn static_bits(
        &self,
        voyage: usize,
        extended: usize,
        part_b: usize,
        width: usize,
    ) -> Option<u32> {
        let start = match self.kind()? {
            MessageKind::StaticVoyage => voyage,
            MessageKind::ExtendedClassB => extended,
            MessageKind::StaticDataB => part_b,
            _ => return None,
        };
        self.bits(start, start + width - 1)
    }

    /// Repeat indicator, bits 6-7.
    pub fn repeat_indicator(&self) -> Option<u8> {
        self.bits(6, 7).map(|value| value as u8)
    }

    /// Maritime Mobile Service Identity, bits 8-37.
    pub fn mmsi(&self) -> Option<u32> {
        self.bits(8, 37)
    }

    /// Navigation status (types 1-3).
    pub fn navigation_status(&self) -> Option<u8> {
        match self.kind()? {
            MessageKind::PositionReport(_) => self.bits(38, 41).map(|value| value as u8),
            _ => None,
        }
    }

    /// Rate of turn, encoded as `4.733 * sqrt(deg/min)` (types 1-3).
    ///
    /// `-128` means not available.
    pub fn rate_of_turn(&self) -> Option<i8> {
        match self.kind()? {
            MessageKind::PositionReport(_) => self.bits(42, 49).map(|value| sign_extend(value, 8) as i8),
            _ => None,
        }
    }

    /// Speed over ground in 0.1 knot steps. `1023` means not available.
    pub fn speed_over_ground(&self) -> Option<u16> {
        self.position_bits(50, 46, 10).map(|value| value as u16)
    }

    /// Position accuracy flag, `true` for better than 10 m.
    pub fn position_accuracy(&self) -> Option<bool> {
        self.position_bits(60, 56, 1).map(|value| value == 1)
    }

    /// Longitude in 1/10 000 minute. `181°` (108 600 000) means not available.
    pub fn longitude(&self) -> Option<i32> {
        self.position_bits(61, 57, 28)
            .map(|value| sign_extend(value, 28))
    }

    /// Latitude in 1/10 000 minute. `91°` (54 600 000) means not available.
    pub fn latitude(&self) -> Option<i32> {
        self.position_bits(89, 85, 27)
            .map(|value| sign_extend(value, 27))
    }

    /// Longitude in degrees, east positive.
    pub fn longitude_degrees(&self) -> Option<f64> {
        self.longitude().map(|value| value as f64 / 600_000.0)
    }

    /// Latitude in degrees, north positive.
    pub fn latitude_degrees(&self) -> Option<f64> {
        self.latitude().map(|value| value as f64 / 600_000.0)
    }

    /// Course over ground in 0.1 degree steps. `3600` means not available.
    pub fn course_over_ground(&self) -> Option<u16> {
        self.position_bits(116, 112, 12).map(|value| value as u16)
    }

    /// True heading in degrees. `511` means not available.
    pub fn true_heading(&self) -> Option<u16> {
        self.position_bits(128, 124, 9).map(|value| value as u16)
    }

    /// UTC second of the report. `60` means not available.
    pub fn timestamp(&self) -> Option<u8> {
        self.position_bits(137, 133, 6).map(|value| value as u8)
    }

    /// Special maneuver indicator (types 1-3).
    pub fn maneuver_indicator(&self) -> Option<u8> {
        match self.kind()? {
            MessageKind::PositionReport(_) => self.bits(143, 144).map(|value| value as u8),
            _ => None,
        }
    }

    /// Radio status (types 1-3 and 18).
    pub fn communication_state(&self) -> Option<u32> {
        match self.kind()? {
            MessageKind::PositionReport(_) | MessageKind::StandardClassB => self.bits(149, 167),
            _ => None,
        }
    }

    /// AIS version indicator (type 5).
    pub fn version_indicator(&self) -> Option<u8> {
        match self.kind()? {
            MessageKind::StaticVoyage => self.bits(38, 39).map(|value| value as u8),
            _ => None,
        }
    }

    /// IMO ship identification number (type 5).
    pub fn imo_number(&self) -> Option<u32> {
        match self.kind()? {
            MessageKind::StaticVoyage => self.bits(40, 69),
            _ => None,
        }
    }

    /// Call sign (type 5 and 24 part B), with its `@` padding.
    pub fn call_sign(&self) -> Option<String<CALL_SIGN_LEN>> {
        match self.kind()? {
            MessageKind::StaticVoyage => self.ascii(70, 111),
            MessageKind::StaticDataB => self.ascii(90, 131),
            _ => None,
        }
    }

    /// Vessel name (types 5, 19 and 24 part A), with its `@` padding.
    pub fn name(&self) -> Option<String<NAME_LEN>> {
        match self.kind()? {
            MessageKind::StaticVoyage => self.ascii(112, 231),
            MessageKind::ExtendedClassB => self.ascii(143, 262),
            MessageKind::StaticDataA => self.ascii(40, 159),
            _ => None,
        }
    }

    /// Ship and cargo type (types 5, 19 and 24 part B).
    pub fn cargo_type(&self) -> Option<u8> {
        self.static_bits(232, 263, 40, 8).map(|value| value as u8)
    }

    /// Dimension A, distance from the reference point to the bow in meters.
    pub fn dimension_to_bow(&self) -> Option<u16> {
        self.static_bits(240, 271, 132, 9).map(|value| value as u16)
    }

    /// Dimension B, distance from the reference point to the stern in meters.
    pub fn dimension_to_stern(&self) -> Option<u16> {
        self.static_bits(249, 280, 141, 9).map(|value| value as u16)
    }

    /// Dimension C, distance from the reference point to port in meters.
    pub fn dimension_to_port(&self) -> Option<u8> {
        self.static_bits(258, 289, 150, 6).map(|value| value as u8)
    }

    /// Dimension D, distance from the reference point to starboard in meters.
    pub fn dimension_to_starboard(&self) -> Option<u8> {
        self.static_bits(264, 295, 156, 6).map(|value| value as u8)
    }

    /// Dimensions A-D together.
    pub fn dimensions(&self) -> Option<Dimensions> {
        Some(Dimensions {
            to_bow: self.dimension_to_bow()?,
            to_stern: self.dimension_to_stern()?,
            to_port: self.dimension_to_port()?,
            to_starboard: self.dimension_to_starboard()?,
        })
    }

    /// Type of electronic position fixing device (types 5, 19 and 24 part B).
    pub fn position_fix_type(&self) -> Option<u8> {
        self.static_bits(270, 301, 162, 4).map(|value| value as u8)
    }

    /// Raw ETA bits 274-293 (type 5): month, day, hour, minute.
    pub fn eta_bits(&self) -> Option<u32> {
        match self.kind()? {
            MessageKind::StaticVoyage => self.bits(274, 293),
            _ => None,
        }
    }

    /// Estimated time of arrival (type 5).
    pub fn eta(&self) -> Option<Eta> {
        self.eta_bits().map(Eta::from_bits)
    }

    /// Maximum present static draught in 0.1 m steps (type 5).
    pub fn draught(&self) -> Option<u8> {
        match self.kind()? {
            MessageKind::StaticVoyage => self.bits(294, 301).map(|value| value as u8),
            _ => None,
        }
    }

    /// Destination (type 5), with its `@` padding.
    pub fn destination(&self) -> Option<String<NAME_LEN>> {
        match self.kind()? {
            MessageKind::StaticVoyage => self.ascii(302, 421),
            _ => None,
        }
    }

    /// Data terminal equipment flag (type 5), `true` when not available.
    pub fn dte(&self) -> Option<bool> {
        match self.kind()? {
            MessageKind::StaticVoyage => self.bits(422, 422).map(|value| value == 1),
            _ => None,
        }
    }

    /// Part number of a type 24 message: 0 for part A, 1 for part B.
    pub fn part_number(&self) -> Option<u8> {
        match self.message_id()? {
            24 => self.bits(38, 39).map(|value| value as u8),
            _ => None,
        }
    }

    /// Vendor ID (type 24 part B), with its `@` padding.
    pub fn vendor_id(&self) -> Option<String<CALL_SIGN_LEN>> {
        match self.kind()? {
            MessageKind::StaticDataB => self.ascii(48, 89),
            _ => None,
        }
    }
}
