//! Property tests for the framer: arbitrary transfer boundaries and single-bit
//! corruption of otherwise valid sentences.

use nmea0183_dma::{
    ChannelBuilder, FrameError, NoDma, Sentence, SentenceHandler, checksum, hex_digits,
};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Recorder {
    sentences: Vec<String>,
    drops: Vec<FrameError>,
}

impl SentenceHandler for Recorder {
    fn on_sentence(&mut self, sentence: &Sentence<'_>) {
        self.sentences.push(sentence.fields().collect::<Vec<_>>().join(","));
    }

    fn on_drop(&mut self, error: FrameError) {
        self.drops.push(error);
    }
}

fn encode(body: &str) -> Vec<u8> {
    let digits = hex_digits(checksum(body.as_bytes()));
    let mut bytes = Vec::with_capacity(body.len() + 6);
    bytes.push(b'$');
    bytes.extend_from_slice(body.as_bytes());
    bytes.push(b'*');
    bytes.extend_from_slice(&digits);
    bytes.extend_from_slice(b"\r\n");
    bytes
}

/// A sentence body: five character address followed by up to six short fields.
pub fn body_strategy() -> impl Strategy<Value = String> {
    let fields = prop::collection::vec("[0-9A-Za-z.+-]{0,8}", 0..=6);
    ("[A-Z]{5}", fields).prop_map(|(address, fields)| {
        let mut body = address;
        for field in fields {
            body.push(',');
            body.push_str(&field);
        }
        body
    })
}

/// Bodies plus the lengths the encoded stream is cut into before feeding.
pub fn split_stream_strategy() -> impl Strategy<Value = (Vec<String>, usize, Vec<usize>)> {
    (
        prop::collection::vec(body_strategy(), 1..=12),
        1usize..=64,
        prop::collection::vec(1usize..=40, 1..=16),
    )
}

proptest! {
    #[test]
    fn test_any_split_delivers_every_sentence(
        (bodies, chunk_size, cuts) in split_stream_strategy()
    ) {
        let stream: Vec<u8> = bodies.iter().flat_map(|body| encode(body)).collect();

        let mut channel = ChannelBuilder::<256>::new()
            .chunk_size(chunk_size)
            .build(NoDma, Recorder::default())
            .unwrap();

        let mut rest = stream.as_slice();
        for cut in cuts.iter().cycle() {
            if rest.is_empty() {
                break;
            }
            let (piece, tail) = rest.split_at((*cut).min(rest.len()));
            channel.feed(piece);
            rest = tail;
        }

        prop_assert_eq!(&channel.handler().sentences, &bodies);
        prop_assert!(channel.handler().drops.is_empty());
        prop_assert_eq!(channel.stats().sentences as usize, bodies.len());
    }

    #[test]
    fn test_single_bit_flip_never_delivers(
        body in body_strategy(),
        follow_up in body_strategy(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut corrupted = encode(&body);
        let index = position.index(corrupted.len());
        corrupted[index] ^= 1 << bit;

        let mut channel = ChannelBuilder::<256>::new()
            .build(NoDma, Recorder::default())
            .unwrap();
        channel.feed(&corrupted);
        channel.feed(&encode(&follow_up));

        // The damaged sentence is lost, the framer recovers at the next start marker.
        let recorder = channel.handler();
        prop_assert!(!recorder.sentences.contains(&body) || body == follow_up);
        prop_assert_eq!(recorder.sentences.last(), Some(&follow_up));
    }
}
