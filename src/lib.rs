//! # NMEA 0183 DMA Framer
//!
//! This library frames NMEA 0183 sentences received over DMA-fed serial
//! channels and decodes the AIS payloads they carry, without allocating:
//! `$AAAAA,D1,D2,...,Dn*CC\r\n` (or `!AAAAA,...` for encapsulated sentences).
//!
//! The library is split into layers:
//! - [`Channel`] owns a fixed buffer, scans each completed transfer, validates
//!   sentences and hands them to a [`SentenceHandler`] as borrowed [`Sentence`] views
//! - [`Registry`] maps hardware channel identities to their [`Channel`]
//! - [`ais`] decodes six-bit armored payloads into typed fields
//! - [`nmea_content`] parses the data fields of `VDM`/`VDO`, `MWV` and `XDR`
//!   sentences (feature `content`)
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_dma::{ChannelBuilder, NoDma, Sentence, VDM};
//!
//! let mut mmsi = None;
//! {
//!     let mut channel = ChannelBuilder::<256>::new()
//!         .build(NoDma, |sentence: &Sentence<'_>| {
//!             if sentence.sentence_type() == VDM {
//!                 mmsi = sentence.ais_payload().and_then(|payload| payload.mmsi());
//!             }
//!         })
//!         .unwrap();
//!
//!     // Received in arbitrary pieces, e.g. by a DMA engine.
//!     channel.feed(b"!AIVDM,1,1,,A,15M67N0000G?Uf6E`FepT@3n00Sa,0*");
//!     channel.feed(b"50\r\n");
//! }
//!
//! assert_eq!(mmsi, Some(366_053_240));
//! ```
//!
//! ## Feature Flags
//!
//! - `content` (default): typed sentences in [`nmea_content`]
//! - `derive` (default): `#[derive(FromSentence)]`
//! - `time`: ETA conversion to [`time`](https://docs.rs/time) types
//! - `serde`: serialization of reports, configuration and typed sentences

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(test)]
extern crate std;

pub mod ais;
pub mod error;
pub mod framer;
mod nmea0183;
pub mod parse;
pub mod parsing;
pub mod registry;

#[cfg(feature = "content")]
#[cfg_attr(docsrs, doc(cfg(feature = "content")))]
pub mod nmea_content;

pub use error::{ConfigError, ContentResult, Error, FrameError, RegisterError, RegistryError};
pub use framer::{
    Channel, ChannelBuilder, DmaReceiver, Fields, FramerConfig, NoDma, Sentence, SentenceHandler,
    Stats,
};
pub use nmea0183::*;
pub use parse::{FieldParse, FromSentence};
pub use registry::{ChannelIndex, Registry};

#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use nmea0183_dma_derive::FromSentence;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
