//! # Sentence Framer
//!
//! A [`Channel`] owns a fixed buffer that a DMA engine fills in chunks. After
//! every completed transfer the channel scans the new bytes, reassembles
//! sentences across chunk boundaries, validates them with
//! [`validate`](crate::validate) and hands each valid one to its
//! [`SentenceHandler`] before re-arming the next transfer.
//!
//! ```text
//!   arm(region) ──► DMA writes chunk ──► on_transfer_complete(n)
//!        ▲                                      │
//!        │                               scan n new bytes
//!        │                                      │
//!        └──── re-arm at cursor ◄── handler(&Sentence) for each LF
//! ```
//!
//! A sentence never straddles the physical end of the buffer: when the next
//! chunk would not fit, the partial sentence is moved to the front first.

use log::{debug, trace};

use crate::{
    error::{ConfigError, FrameError},
    nmea0183::{ChecksumMode, validate},
};

pub mod sentence;

pub use sentence::{Fields, Sentence};

/// Default buffer capacity of a channel.
pub const DEFAULT_BUFFER_LEN: usize = 256;

/// Default number of bytes requested per DMA transfer.
pub const DEFAULT_CHUNK_SIZE: usize = 8;

/// Longest sentence allowed by NMEA 0183, start marker to LF inclusive.
pub const MAX_SENTENCE_LEN: usize = 82;

/// Shortest framed sentence: `$AAAAA*hh\r\n`.
pub const MIN_SENTENCE_LEN: usize = 11;

/// The DMA side of a channel.
///
/// [`arm`](DmaReceiver::arm) starts a transfer into `region`. The channel does
/// not read or write `region` until the transfer is reported complete through
/// [`Channel::on_transfer_complete`] (or [`Registry::on_hardware_event`]).
///
/// The region lives inside the channel, so a channel must stay in place while
/// a transfer is armed. [`Registry::register_channel`] arms the first transfer
/// only after the channel has been moved into its slot.
///
/// [`Registry::on_hardware_event`]: crate::Registry::on_hardware_event
/// [`Registry::register_channel`]: crate::Registry::register_channel
pub trait DmaReceiver {
    /// Starts a transfer of up to `region.len()` bytes into `region`.
    fn arm(&mut self, region: &mut [u8]);
}

/// Receiver for channels that are only fed in software through [`Channel::feed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoDma;

impl DmaReceiver for NoDma {
    fn arm(&mut self, _region: &mut [u8]) {}
}

/// Receives the sentences of a channel.
///
/// Implemented for every `FnMut(&Sentence<'_>)`, so a closure is enough when
/// dropped sentences are of no interest.
pub trait SentenceHandler {
    /// Called once for every valid sentence.
    ///
    /// The view is only valid for the duration of the call. It must return
    /// quickly: the next transfer is armed only after it returns.
    fn on_sentence(&mut self, sentence: &Sentence<'_>);

    /// Called when a candidate sentence is dropped.
    fn on_drop(&mut self, _error: FrameError) {}
}

impl<F> SentenceHandler for F
where
    F: FnMut(&Sentence<'_>),
{
    fn on_sentence(&mut self, sentence: &Sentence<'_>) {
        self(sentence)
    }
}

/// Tunable parameters of a [`Channel`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramerConfig {
    /// Bytes requested per transfer.
    pub chunk_size: usize,
    /// Longest accepted sentence, start marker to LF inclusive. A sentence
    /// reaching this length without a terminator is abandoned.
    pub max_sentence_len: usize,
    /// Checksum policy applied by [`validate`].
    pub checksum_mode: ChecksumMode,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_sentence_len: MAX_SENTENCE_LEN,
            checksum_mode: ChecksumMode::Required,
        }
    }
}

impl FramerConfig {
    /// Checks that the configuration can be honoured by a buffer of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyChunk`] if `chunk_size` is zero
    /// - [`ConfigError::SentenceTooShort`] if `max_sentence_len` is below [`MIN_SENTENCE_LEN`]
    /// - [`ConfigError::BufferTooSmall`] if a partial sentence plus a chunk may not fit
    pub fn check(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::EmptyChunk);
        }

        if self.max_sentence_len < MIN_SENTENCE_LEN {
            return Err(ConfigError::SentenceTooShort(self.max_sentence_len));
        }

        if self.max_sentence_len + self.chunk_size > capacity {
            return Err(ConfigError::BufferTooSmall {
                capacity,
                sentence: self.max_sentence_len,
                chunk: self.chunk_size,
            });
        }

        Ok(())
    }
}

/// Builder for configuring and creating a [`Channel`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::{ChannelBuilder, ChecksumMode, NoDma, Sentence};
///
/// let channel = ChannelBuilder::<256>::new()
///     .chunk_size(16)
///     .checksum_mode(ChecksumMode::Optional)
///     .build(NoDma, |_: &Sentence<'_>| {});
/// assert!(channel.is_ok());
///
/// let channel = ChannelBuilder::<64>::new()
///     .chunk_size(0)
///     .build(NoDma, |_: &Sentence<'_>| {});
/// assert!(channel.is_err());
/// ```
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct ChannelBuilder<const N: usize = DEFAULT_BUFFER_LEN> {
    config: FramerConfig,
}

impl<const N: usize> Default for ChannelBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ChannelBuilder<N> {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: FramerConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: FramerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the number of bytes requested per transfer.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Sets the longest accepted sentence.
    pub fn max_sentence_len(mut self, max_sentence_len: usize) -> Self {
        self.config.max_sentence_len = max_sentence_len;
        self
    }

    /// Sets the checksum policy.
    pub fn checksum_mode(mut self, checksum_mode: ChecksumMode) -> Self {
        self.config.checksum_mode = checksum_mode;
        self
    }

    /// Builds the channel. No transfer is armed yet, see [`Channel::arm`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not fit `N`.
    pub fn build<D, H>(self, dma: D, handler: H) -> Result<Channel<D, H, N>, ConfigError>
    where
        D: DmaReceiver,
        H: SentenceHandler,
    {
        Channel::new(self.config, dma, handler)
    }
}

/// Counters kept by a channel.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Sentences handed to the handler.
    pub sentences: u32,
    /// Candidate sentences dropped for any [`FrameError`].
    pub dropped: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Accumulating,
}

/// One DMA-fed serial channel and its sentence framer.
pub struct Channel<D, H, const N: usize = DEFAULT_BUFFER_LEN> {
    buffer: [u8; N],
    config: FramerConfig,
    cursor: usize,
    start: usize,
    state: State,
    dma: D,
    handler: H,
    stats: Stats,
}

impl<D, H, const N: usize> core::fmt::Debug for Channel<D, H, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Channel")
            .field("config", &self.config)
            .field("cursor", &self.cursor)
            .field("start", &self.start)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<D, H, const N: usize> Channel<D, H, N>
where
    D: DmaReceiver,
    H: SentenceHandler,
{
    /// Creates a channel. No transfer is armed yet, see [`Channel::arm`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` does not fit a buffer of `N` bytes.
    pub fn new(config: FramerConfig, dma: D, handler: H) -> Result<Self, ConfigError> {
        config.check(N)?;

        Ok(Self {
            buffer: [0; N],
            config,
            cursor: 0,
            start: 0,
            state: State::Scanning,
            dma,
            handler,
            stats: Stats::default(),
        })
    }

    /// Arms a transfer into the region at the cursor.
    ///
    /// Call once after the channel has reached its final location.
    /// [`Registry::register_channel`](crate::Registry::register_channel) does this.
    pub fn arm(&mut self) {
        let end = self.cursor + self.config.chunk_size;
        self.dma.arm(&mut self.buffer[self.cursor..end]);
    }

    /// Handles completion of a full-chunk transfer.
    pub fn on_hardware_event(&mut self) {
        self.on_transfer_complete(self.config.chunk_size);
    }

    /// Handles completion of a transfer of `received` bytes.
    ///
    /// Scans the new bytes, dispatches every complete sentence and re-arms the
    /// next transfer. `received` is clamped to the chunk size.
    pub fn on_transfer_complete(&mut self, received: usize) {
        let end = self.cursor + received.min(self.config.chunk_size);

        for position in self.cursor..end {
            self.scan(position);
        }

        self.cursor = end;
        self.rearm();
    }

    /// Pushes `bytes` through the channel as if they had been received.
    ///
    /// The bytes are copied into the armed region one chunk at a time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_dma::{ChannelBuilder, NoDma, Sentence};
    ///
    /// let mut count = 0;
    /// {
    ///     let mut channel = ChannelBuilder::<256>::new()
    ///         .build(NoDma, |sentence: &Sentence<'_>| {
    ///             assert_eq!(sentence.field(1), Some("123456"));
    ///             count += 1;
    ///         })
    ///         .unwrap();
    ///
    ///     channel.feed(b"$GPGGA,123456,data*41\r\n");
    /// }
    /// assert_eq!(count, 1);
    /// ```
    pub fn feed(&mut self, bytes: &[u8]) {
        for piece in bytes.chunks(self.config.chunk_size) {
            let cursor = self.cursor;
            self.buffer[cursor..cursor + piece.len()].copy_from_slice(piece);
            self.on_transfer_complete(piece.len());
        }
    }

    /// Returns the counters of this channel.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Returns the configuration of this channel.
    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    /// Returns the offset the next transfer writes to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns a shared reference to the handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Returns a mutable reference to the handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Returns a mutable reference to the DMA receiver.
    pub fn dma_mut(&mut self) -> &mut D {
        &mut self.dma
    }

    fn scan(&mut self, position: usize) {
        let byte = self.buffer[position];

        match (self.state, byte) {
            (State::Accumulating, b'$' | b'!') => {
                self.drop_sentence(FrameError::Restarted);
                self.begin(position);
            }
            (State::Scanning, b'$' | b'!') => self.begin(position),
            (State::Accumulating, b'\n') => {
                self.state = State::Scanning;
                self.dispatch(self.start, position + 1);
            }
            (State::Accumulating, byte) if byte != b'\r' && !(0x21..=0x7D).contains(&byte) => {
                self.state = State::Scanning;
                self.drop_sentence(FrameError::InvalidCharacter(byte));
            }
            (State::Accumulating, _)
                if position + 1 - self.start >= self.config.max_sentence_len =>
            {
                self.state = State::Scanning;
                self.drop_sentence(FrameError::Overflow(self.config.max_sentence_len));
            }
            _ => {}
        }
    }

    fn begin(&mut self, position: usize) {
        self.start = position;
        self.state = State::Accumulating;
    }

    fn dispatch(&mut self, start: usize, end: usize) {
        let frame = match validate(&self.buffer[start..end], self.config.checksum_mode) {
            Ok(frame) => frame,
            Err(error) => return self.drop_sentence(error),
        };

        let body_end = start + frame.body_end;
        for byte in &mut self.buffer[start + 1..body_end] {
            if *byte == b',' {
                *byte = 0;
            }
        }

        let sentence = match Sentence::new(&self.buffer[start..end], frame) {
            Ok(sentence) => sentence,
            Err(error) => return self.drop_sentence(error),
        };

        trace!("dispatching {} ({} bytes)", sentence.address(), sentence.len());
        self.stats.sentences = self.stats.sentences.wrapping_add(1);
        self.handler.on_sentence(&sentence);
    }

    fn drop_sentence(&mut self, error: FrameError) {
        debug!("dropping sentence: {error}");
        self.stats.dropped = self.stats.dropped.wrapping_add(1);
        self.handler.on_drop(error);
    }

    fn rearm(&mut self) {
        let chunk = self.config.chunk_size;

        if self.cursor + chunk > N {
            match self.state {
                State::Accumulating => {
                    let len = self.cursor - self.start;
                    self.buffer.copy_within(self.start..self.cursor, 0);
                    self.start = 0;
                    self.cursor = len;
                }
                State::Scanning => self.cursor = 0,
            }
        }

        self.arm();
    }
}
