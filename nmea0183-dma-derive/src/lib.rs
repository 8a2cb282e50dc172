//! # Derive macro for typed NMEA 0183 sentence content
//!
//! `nmea0183-dma-derive` generates [`FromSentence`] implementations for plain
//! structs: every member is read from the next data field of a sentence, in
//! declaration order.
//!
//! It is re-exported by [`nmea0183-dma`] behind the `derive` feature and is
//! not meant to be used on its own.
//!
//! [`FromSentence`]: https://docs.rs/nmea0183-dma/latest/nmea0183_dma/trait.FromSentence.html
//! [`nmea0183-dma`]: https://crates.io/crates/nmea0183-dma

use generate::generate_from_sentence_impl;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod generate;
mod meta;

#[doc = include_str!("../README.md")]
#[proc_macro_derive(FromSentence, attributes(nmea))]
pub fn derive_from_sentence(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_from_sentence_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
