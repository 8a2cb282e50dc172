use crate::{self as nmea0183_dma, FromSentence};

/// XDR - Transducer Measurements
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_xdr_transducer_measurements>
///
/// ```text
///         1 2   3 4            n
///         | |   | |            |
///  $--XDR,a,x.x,a,c--c, ..... *hh<CR><LF>
/// ```
///
/// Fields 1-4 form one [`Measurement`] and repeat for every transducer.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, FromSentence)]
pub struct XDR<'a> {
    /// Measurements, in sentence order
    pub measurements: heapless::Vec<Measurement<'a>, 4>,
}

/// One transducer quadruple of an [`XDR`] sentence.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, FromSentence)]
pub struct Measurement<'a> {
    /// Transducer type, `C` temperature, `P` pressure, `A` angle, ...
    pub transducer_type: char,
    /// Measured value
    pub value: Option<f32>,
    /// Unit of the value, `C` degrees Celsius, `B` bar, `D` degrees, ...
    pub unit: Option<char>,
    /// Transducer name
    pub name: &'a str,
}

impl<'a> XDR<'a> {
    /// Returns the first measurement of the transducer called `name`.
    pub fn find(&self, name: &str) -> Option<&Measurement<'a>> {
        self.measurements.iter().find(|measurement| measurement.name == name)
    }
}
