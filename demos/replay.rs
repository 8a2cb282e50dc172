//! Replays a captured byte stream through a two-channel registry.
//!
//! Usage: `cargo run --example replay [AIS_CAPTURE [WIND_CAPTURE]]`
//!
//! Without arguments a short built-in capture is used. Set `LOG_LEVEL=debug`
//! to see the framer's own diagnostics.

use std::{collections::BTreeMap, env, fs};

use log::{info, warn};
use nmea0183_dma::{
    FrameError, FramerConfig, NoDma, Registry, Sentence, SentenceHandler,
    ais::{Assembler, PositionReport, StaticData},
    nmea_content::{NmeaSentence, VDM},
};

const AIS_CAPTURE: &[u8] = b"!AIVDM,1,1,,A,15M67N0000G?Uf6E`FepT@3n00Sa,0*50\r\n\
!AIVDM,2,1,7,B,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*19\r\n\
!AIVDM,2,2,7,B,88888888880,2*20\r\n\
garbage between sentences\r\n\
!AIVDM,1,1,,B,H42O55i18tMET00000000000000,2*6E\r\n\
!AIVDM,1,1,,B,H42O55lti4hhhilD3nink000?050,0*43\r\n\
!AIVDM,1,1,,B,B52K>;h00Fc>jpUlNV@ikwpUoP06,0*4F\r\n";

const WIND_CAPTURE: &[u8] = b"$WIMWV,214.8,R,0.1,K,A*28\r\n\
$WIMWV,36.5,T,12.4,N,A*22\r\n\
$WIMWV,36.5,T,12.4,N,A*23\r\n\
$IIXDR,C,19.5,C,AIR,P,1.02,B,BARO*16\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Port {
    Ais,
    Wind,
}

/// Decodes the sentences of one port and keeps a vessel table.
#[derive(Default)]
struct Tracker {
    assembler: Assembler,
    vessels: BTreeMap<u32, StaticData>,
}

impl Tracker {
    fn on_ais(&mut self, sentence: &Sentence<'_>, vdm: VDM<'_>) {
        let Some(complete) = self.assembler.push(vdm.fragment()) else {
            return;
        };

        let payload = complete.payload();
        if !payload.check_length() {
            warn!("{}: unexpected payload length", sentence.address());
        }

        if let Some(report) = PositionReport::from_payload(&payload) {
            info!(
                "position {}: lat {:?} lon {:?} sog {:?} kn cog {:?}",
                report.mmsi,
                report.latitude_degrees(),
                report.longitude_degrees(),
                report.speed_knots(),
                report.course_degrees(),
            );
        } else if let Some(data) = StaticData::from_payload(&payload) {
            let mmsi = data.mmsi;
            match self.vessels.get_mut(&mmsi) {
                Some(known) => {
                    known.merge(data);
                }
                None => {
                    self.vessels.insert(mmsi, data);
                }
            }
            info!("static {mmsi}: {:?}", self.vessels[&mmsi]);
        } else {
            info!("message {:?} not decoded", payload.message_id());
        }
    }
}

impl SentenceHandler for Tracker {
    fn on_sentence(&mut self, sentence: &Sentence<'_>) {
        match NmeaSentence::from_sentence(sentence) {
            Ok(NmeaSentence::VDM(vdm) | NmeaSentence::VDO(vdm)) => self.on_ais(sentence, vdm),
            Ok(NmeaSentence::MWV(mwv)) if mwv.is_valid() => {
                info!(
                    "wind {:?} deg ({:?}) at {:?} kn",
                    mwv.wind_angle,
                    mwv.reference,
                    mwv.wind_speed_knots()
                );
            }
            Ok(NmeaSentence::MWV(_)) => info!("wind data invalid"),
            Ok(NmeaSentence::XDR(xdr)) => {
                for measurement in &xdr.measurements {
                    info!(
                        "{} ({}): {:?} {:?}",
                        measurement.name,
                        measurement.transducer_type,
                        measurement.value,
                        measurement.unit
                    );
                }
            }
            Err(e) => warn!("{}: {e:?}", sentence.address()),
        }
    }

    fn on_drop(&mut self, error: FrameError) {
        warn!("dropped sentence: {error}");
    }
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::new()
        .format_timestamp(None)
        .filter_level(log::LevelFilter::Info)
        .parse_env("LOG_LEVEL")
        .init();

    let mut args = env::args().skip(1);
    let ais = match args.next() {
        Some(path) => fs::read(path)?,
        None => AIS_CAPTURE.to_vec(),
    };
    let wind = match args.next() {
        Some(path) => fs::read(path)?,
        None => WIND_CAPTURE.to_vec(),
    };

    let mut registry: Registry<Port, NoDma, Tracker> = Registry::with_config(FramerConfig {
        chunk_size: 32,
        ..FramerConfig::default()
    });
    for port in [Port::Ais, Port::Wind] {
        if let Err(e) = registry.register_channel(port, NoDma, Tracker::default()) {
            warn!("cannot register {port:?}: {e}");
        }
    }

    // Interleave the two captures the way two UARTs would deliver them.
    let mut ais_chunks = ais.chunks(17);
    let mut wind_chunks = wind.chunks(11);
    loop {
        let ais_chunk = ais_chunks.next();
        let wind_chunk = wind_chunks.next();
        if ais_chunk.is_none() && wind_chunk.is_none() {
            break;
        }
        if let Some(chunk) = ais_chunk {
            let _ = registry.feed(Port::Ais, chunk);
        }
        if let Some(chunk) = wind_chunk {
            let _ = registry.feed(Port::Wind, chunk);
        }
    }

    for port in [Port::Ais, Port::Wind] {
        if let Some(channel) = registry.channel(port) {
            let stats = channel.stats();
            info!(
                "{port:?}: {} sentences, {} dropped, {} vessels",
                stats.sentences,
                stats.dropped,
                channel.handler().vessels.len()
            );
        }
    }

    Ok(())
}
