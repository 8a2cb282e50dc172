use std::{string::String, vec::Vec};

use crate::{
    ChannelBuilder, DmaReceiver, FrameError, NoDma, Sentence, SentenceHandler, Stats, checksum,
    hex_digits,
};

/// Feeds `bytes` through a default channel and calls `handler` for each sentence.
pub fn frame(bytes: &[u8], mut handler: impl FnMut(&Sentence<'_>)) -> Stats {
    let mut channel = ChannelBuilder::<256>::new()
        .build(NoDma, |sentence: &Sentence<'_>| handler(sentence))
        .unwrap();
    channel.feed(bytes);
    channel.stats()
}

/// Builds `$<body>*hh\r\n` with a correct checksum.
pub fn sentence(body: &str) -> String {
    let digits = hex_digits(checksum(body.as_bytes()));
    let mut text = String::from("$");
    text.push_str(body);
    text.push('*');
    text.push(digits[0] as char);
    text.push(digits[1] as char);
    text.push_str("\r\n");
    text
}

/// Records the sentences and drops of a channel.
///
/// Sentences are stored with their fields joined by `,` again, without the
/// start marker and checksum.
#[derive(Debug, Default)]
pub struct Recorder {
    pub sentences: Vec<String>,
    pub drops: Vec<FrameError>,
}

impl SentenceHandler for Recorder {
    fn on_sentence(&mut self, sentence: &Sentence<'_>) {
        let mut text = String::new();
        for (index, field) in sentence.fields().enumerate() {
            if index > 0 {
                text.push(',');
            }
            text.push_str(field);
        }
        self.sentences.push(text);
    }

    fn on_drop(&mut self, error: FrameError) {
        self.drops.push(error);
    }
}

/// A DMA engine that completes every transfer instantly from a byte script.
///
/// On `arm` it copies as many script bytes as fit into the region; the test
/// then reports completion with [`ScriptedDma::pending`] bytes.
#[derive(Debug, Default)]
pub struct ScriptedDma {
    pub script: Vec<u8>,
    pub pending: usize,
    pub armed: usize,
    pub region_len: usize,
}

impl ScriptedDma {
    pub fn new(script: &[u8]) -> Self {
        Self {
            script: script.to_vec(),
            ..Self::default()
        }
    }
}

impl DmaReceiver for ScriptedDma {
    fn arm(&mut self, region: &mut [u8]) {
        let len = region.len().min(self.script.len());
        region[..len].copy_from_slice(&self.script[..len]);
        self.script.drain(..len);
        self.pending = len;
        self.armed += 1;
        self.region_len = region.len();
    }
}
