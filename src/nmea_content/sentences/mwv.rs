use crate::{
    self as nmea0183_dma, FromSentence,
    nmea_content::{Reference, SpeedUnit, Status, parse},
};

/// MWV - Wind Speed and Angle
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_mwv_wind_speed_and_angle>
///
/// ```text
///         1   2 3   4 5
///         |   | |   | |
///  $--MWV,x.x,a,x.x,a,a*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, FromSentence)]
pub struct MWV {
    #[nmea(parser(parse::angle))]
    /// Wind angle in degrees, 0 to 359
    pub wind_angle: Option<f32>,
    /// Reference of the wind angle
    pub reference: Option<Reference>,
    /// Wind speed, in `speed_unit`
    pub wind_speed: Option<f32>,
    /// Wind speed unit
    pub speed_unit: Option<SpeedUnit>,
    /// Status of the measurement
    pub status: Status,
}

impl MWV {
    /// Returns the wind speed converted to knots.
    ///
    /// `None` if the speed or its unit is missing.
    pub fn wind_speed_knots(&self) -> Option<f32> {
        Some(self.speed_unit?.to_knots(self.wind_speed?))
    }

    /// Returns `true` if the sensor flagged the data as valid.
    pub fn is_valid(&self) -> bool {
        self.status == Status::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, tests::support::frame};

    #[test]
    fn test_mwv_parsing() {
        let stats = frame(b"$WIMWV,214.8,R,0.1,K,A*28\r\n", |sentence| {
            let mwv: MWV = sentence.parse().unwrap();
            assert_eq!(mwv.wind_angle, Some(214.8));
            assert_eq!(mwv.reference, Some(Reference::Relative));
            assert_eq!(mwv.wind_speed, Some(0.1));
            assert_eq!(mwv.speed_unit, Some(SpeedUnit::KilometersPerHour));
            assert!(mwv.is_valid());

            let knots = mwv.wind_speed_knots().unwrap();
            assert!((knots - 0.1 / 1.852).abs() < 1e-6);
        });
        assert_eq!(stats.sentences, 1);
    }

    #[test]
    fn test_mwv_empty_fields() {
        let stats = frame(b"$WIMWV,,,,,V*28\r\n", |sentence| {
            let mwv: MWV = sentence.parse().unwrap();
            assert_eq!(mwv.wind_angle, None);
            assert_eq!(mwv.reference, None);
            assert_eq!(mwv.wind_speed_knots(), None);
            assert!(!mwv.is_valid());
        });
        assert_eq!(stats.sentences, 1);
    }

    #[test]
    fn test_mwv_invalid_angle() {
        let stats = frame(b"$WIMWV,361.0,T,5.0,N,A*24\r\n", |sentence| {
            assert_eq!(sentence.parse::<MWV>(), Err(Error::InvalidField("361.0")));
        });
        assert_eq!(stats.sentences, 1);
    }
}
