//! Aggregated AIS reports.
//!
//! [`PositionReport`] collects the dynamic fields of Class A and Class B
//! position reports (types 1-3, 18 and 19), [`StaticData`] the identity and
//! voyage fields of types 5, 19 and 24. Text fields are stored without their
//! padding.

use heapless::String;

use crate::ais::{
    MessageKind, Payload,
    fields::{CALL_SIGN_LEN, NAME_LEN},
};

/// Speed over ground value meaning "not available".
pub const SPEED_NOT_AVAILABLE: u16 = 1023;
/// Course over ground value meaning "not available".
pub const COURSE_NOT_AVAILABLE: u16 = 3600;
/// True heading value meaning "not available".
pub const HEADING_NOT_AVAILABLE: u16 = 511;
/// Longitude value (181°) meaning "not available".
pub const LONGITUDE_NOT_AVAILABLE: i32 = 181 * 600_000;
/// Latitude value (91°) meaning "not available".
pub const LATITUDE_NOT_AVAILABLE: i32 = 91 * 600_000;

/// Distances from the position reference point to the hull, in meters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Dimension A.
    pub to_bow: u16,
    /// Dimension B.
    pub to_stern: u16,
    /// Dimension C.
    pub to_port: u8,
    /// Dimension D.
    pub to_starboard: u8,
}

impl Dimensions {
    /// Overall length, A + B.
    pub fn length(&self) -> u16 {
        self.to_bow + self.to_stern
    }

    /// Overall beam, C + D.
    pub fn width(&self) -> u16 {
        u16::from(self.to_port) + u16::from(self.to_starboard)
    }
}

/// Estimated time of arrival, UTC.
///
/// Zero month or day, hour 24 and minute 60 mean "not available".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Eta {
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
}

impl Eta {
    /// Unpacks the 20-bit ETA field: 4 bits month, 5 day, 5 hour, 6 minute.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            month: ((bits >> 16) & 0x0F) as u8,
            day: ((bits >> 11) & 0x1F) as u8,
            hour: ((bits >> 6) & 0x1F) as u8,
            minute: (bits & 0x3F) as u8,
        }
    }

    /// Packs the ETA back into its 20-bit field.
    pub const fn to_bits(&self) -> u32 {
        ((self.month as u32 & 0x0F) << 16)
            | ((self.day as u32 & 0x1F) << 11)
            | ((self.hour as u32 & 0x1F) << 6)
            | (self.minute as u32 & 0x3F)
    }

    /// Returns the month, if available.
    #[cfg(feature = "time")]
    #[cfg_attr(docsrs, doc(cfg(feature = "time")))]
    pub fn month(&self) -> Option<time::Month> {
        time::Month::try_from(self.month).ok()
    }

    /// Combines the ETA with `year` into a date and time.
    ///
    /// Returns `None` if any part is not available or out of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_dma::ais::Eta;
    ///
    /// let eta = Eta { month: 5, day: 15, hour: 14, minute: 0 };
    /// let date_time = eta.to_date_time(2025).unwrap();
    /// assert_eq!(date_time.month(), time::Month::May);
    /// assert_eq!(date_time.hour(), 14);
    ///
    /// assert!(Eta { month: 0, day: 0, hour: 24, minute: 60 }.to_date_time(2025).is_none());
    /// ```
    #[cfg(feature = "time")]
    #[cfg_attr(docsrs, doc(cfg(feature = "time")))]
    pub fn to_date_time(&self, year: i32) -> Option<time::PrimitiveDateTime> {
        let date = time::Date::from_calendar_date(year, self.month()?, self.day).ok()?;
        let time = time::Time::from_hms(self.hour, self.minute, 0).ok()?;
        Some(time::PrimitiveDateTime::new(date, time))
    }
}

/// Strips trailing `@` padding and spaces (decoded as `` ` ``) from a text field.
pub fn trim_padding<const W: usize>(mut text: String<W>) -> String<W> {
    let len = text.trim_end_matches(['@', '`', ' ']).len();
    text.truncate(len);
    text
}

/// Dynamic data of a position report (types 1-3, 18 and 19).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    /// Message ID.
    pub message_id: u8,
    /// Maritime Mobile Service Identity.
    pub mmsi: u32,
    /// Navigation status, Class A only.
    pub navigation_status: Option<u8>,
    /// Rate of turn, Class A only.
    pub rate_of_turn: Option<i8>,
    /// Speed over ground in 0.1 knot steps.
    pub speed_over_ground: u16,
    /// Position accuracy better than 10 m.
    pub position_accuracy: bool,
    /// Longitude in 1/10 000 minute.
    pub longitude: i32,
    /// Latitude in 1/10 000 minute.
    pub latitude: i32,
    /// Course over ground in 0.1 degree steps.
    pub course_over_ground: u16,
    /// True heading in degrees.
    pub true_heading: u16,
    /// UTC second of the report.
    pub timestamp: u8,
}

impl PositionReport {
    /// Collects the position fields of `payload`.
    ///
    /// Returns `None` for other message types or a truncated payload.
    pub fn from_payload(payload: &Payload<'_>) -> Option<Self> {
        Some(Self {
            message_id: payload.message_id()?,
            mmsi: payload.mmsi()?,
            navigation_status: payload.navigation_status(),
            rate_of_turn: payload.rate_of_turn(),
            speed_over_ground: payload.speed_over_ground()?,
            position_accuracy: payload.position_accuracy()?,
            longitude: payload.longitude()?,
            latitude: payload.latitude()?,
            course_over_ground: payload.course_over_ground()?,
            true_heading: payload.true_heading()?,
            timestamp: payload.timestamp()?,
        })
    }

    /// Latitude in degrees, if available.
    pub fn latitude_degrees(&self) -> Option<f64> {
        (self.latitude != LATITUDE_NOT_AVAILABLE).then(|| self.latitude as f64 / 600_000.0)
    }

    /// Longitude in degrees, if available.
    pub fn longitude_degrees(&self) -> Option<f64> {
        (self.longitude != LONGITUDE_NOT_AVAILABLE).then(|| self.longitude as f64 / 600_000.0)
    }

    /// Speed over ground in knots, if available.
    pub fn speed_knots(&self) -> Option<f32> {
        (self.speed_over_ground != SPEED_NOT_AVAILABLE)
            .then(|| self.speed_over_ground as f32 / 10.0)
    }

    /// Course over ground in degrees, if available.
    pub fn course_degrees(&self) -> Option<f32> {
        (self.course_over_ground < COURSE_NOT_AVAILABLE)
            .then(|| self.course_over_ground as f32 / 10.0)
    }

    /// True heading in degrees, if available.
    pub fn heading(&self) -> Option<u16> {
        (self.true_heading != HEADING_NOT_AVAILABLE).then_some(self.true_heading)
    }
}

/// Identity and voyage data (types 5, 19 and 24).
///
/// A type 24 message only fills half the fields: part A the name, part B
/// the rest. Use [`StaticData::merge`] to combine both parts.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StaticData {
    /// Maritime Mobile Service Identity.
    pub mmsi: u32,
    /// IMO number, type 5 only.
    pub imo_number: Option<u32>,
    /// Call sign.
    pub call_sign: Option<String<CALL_SIGN_LEN>>,
    /// Vessel name.
    pub name: Option<String<NAME_LEN>>,
    /// Ship and cargo type.
    pub cargo_type: Option<u8>,
    /// Hull dimensions.
    pub dimensions: Option<Dimensions>,
    /// Type of electronic position fixing device.
    pub position_fix_type: Option<u8>,
    /// Estimated time of arrival, type 5 only.
    pub eta: Option<Eta>,
    /// Draught in 0.1 m steps, type 5 only.
    pub draught: Option<u8>,
    /// Destination, type 5 only.
    pub destination: Option<String<NAME_LEN>>,
    /// Vendor ID, type 24 part B only.
    pub vendor_id: Option<String<CALL_SIGN_LEN>>,
}

impl StaticData {
    /// Collects the static fields of `payload`.
    ///
    /// Returns `None` for message types without static data.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_dma::ais::{Payload, StaticData};
    ///
    /// let payload = Payload::new(b"H42O55i18tMET00000000000000");
    /// let data = StaticData::from_payload(&payload).unwrap();
    /// assert_eq!(data.mmsi, 271_041_815);
    /// assert_eq!(data.name.as_deref(), Some("PROGUY"));
    /// ```
    pub fn from_payload(payload: &Payload<'_>) -> Option<Self> {
        match payload.kind()? {
            MessageKind::StaticVoyage
            | MessageKind::ExtendedClassB
            | MessageKind::StaticDataA
            | MessageKind::StaticDataB => {}
            _ => return None,
        }

        Some(Self {
            mmsi: payload.mmsi()?,
            imo_number: payload.imo_number(),
            call_sign: payload.call_sign().map(trim_padding),
            name: payload.name().map(trim_padding),
            cargo_type: payload.cargo_type(),
            dimensions: payload.dimensions(),
            position_fix_type: payload.position_fix_type(),
            eta: payload.eta(),
            draught: payload.draught(),
            destination: payload.destination().map(trim_padding),
            vendor_id: payload.vendor_id().map(trim_padding),
        })
    }

    /// Fills the fields missing in `self` from `other`, for the same vessel.
    ///
    /// Returns `false` and leaves `self` untouched if the MMSIs differ.
    pub fn merge(&mut self, other: Self) -> bool {
        if self.mmsi != other.mmsi {
            return false;
        }

        self.imo_number = self.imo_number.or(other.imo_number);
        self.call_sign = self.call_sign.take().or(other.call_sign);
        self.name = self.name.take().or(other.name);
        self.cargo_type = self.cargo_type.or(other.cargo_type);
        self.dimensions = self.dimensions.or(other.dimensions);
        self.position_fix_type = self.position_fix_type.or(other.position_fix_type);
        self.eta = self.eta.or(other.eta);
        self.draught = self.draught.or(other.draught);
        self.destination = self.destination.take().or(other.destination);
        self.vendor_id = self.vendor_id.take().or(other.vendor_id);
        true
    }
}
