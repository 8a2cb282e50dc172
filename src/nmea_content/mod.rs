//! # Typed Sentence Content
//!
//! Strongly-typed views of the data fields of the sentences this crate knows
//! about, parsed from a framed [`Sentence`](crate::Sentence) with
//! [`Sentence::parse`](crate::Sentence::parse) or dispatched on the sentence
//! type with [`NmeaSentence::from_sentence`].

pub mod parse;
mod sentences;

pub use sentences::*;
