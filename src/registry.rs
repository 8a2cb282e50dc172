//! # Channel Registry
//!
//! A fixed table that maps a hardware channel identity (a UART instance, a
//! DMA stream number, ...) to the [`Channel`] it feeds. Completion interrupts
//! are routed through [`Registry::on_hardware_event`], which scans the table
//! linearly and ignores identities it does not know.
//!
//! The registry is owned by the application, typically in a `static` guarded
//! by a critical-section mutex, and must not move once a channel is armed.

use log::{trace, warn};

use crate::{
    error::{RegisterError, RegistryError},
    framer::{Channel, DEFAULT_BUFFER_LEN, DmaReceiver, FramerConfig, SentenceHandler},
};

/// Maximum number of concurrent channels supported by the hardware.
pub const DEFAULT_CHANNELS: usize = 3;

/// Index of a channel slot, returned on registration.
pub type ChannelIndex = usize;

/// Fixed-capacity table of channels keyed by hardware identity.
///
/// # Examples
///
/// ```rust
/// use nmea0183_dma::{NoDma, Registry, Sentence};
///
/// fn on_sentence(sentence: &Sentence<'_>) {
///     assert_eq!(sentence.address(), "GPGGA");
/// }
///
/// let mut registry: Registry<u8, NoDma, fn(&Sentence<'_>)> = Registry::new();
/// let index = registry.register_channel(1, NoDma, on_sentence).unwrap();
/// assert_eq!(index, 0);
///
/// registry.feed(1, b"$GPGGA,123456,data*41\r\n").unwrap();
/// assert_eq!(registry.channel(1).unwrap().stats().sentences, 1);
///
/// // Unknown identities are ignored.
/// registry.on_hardware_event(7);
/// ```
pub struct Registry<
    Id,
    D,
    H,
    const C: usize = DEFAULT_CHANNELS,
    const N: usize = DEFAULT_BUFFER_LEN,
> {
    config: FramerConfig,
    slots: heapless::Vec<(Id, Channel<D, H, N>), C>,
}

impl<Id, D, H, const C: usize, const N: usize> Default for Registry<Id, D, H, C, N>
where
    Id: PartialEq + Copy,
    D: DmaReceiver,
    H: SentenceHandler,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, D, H, const C: usize, const N: usize> Registry<Id, D, H, C, N>
where
    Id: PartialEq + Copy,
    D: DmaReceiver,
    H: SentenceHandler,
{
    /// Creates an empty registry whose channels use the default [`FramerConfig`].
    pub fn new() -> Self {
        Self::with_config(FramerConfig::default())
    }

    /// Creates an empty registry whose channels use `config`.
    pub fn with_config(config: FramerConfig) -> Self {
        Self {
            config,
            slots: heapless::Vec::new(),
        }
    }

    /// Creates a channel for `id` and arms its first transfer.
    ///
    /// Registering an identity that is already known replaces its channel in
    /// place.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::Config`] if the registry configuration does not fit `N`
    /// - [`RegisterError::Registry`] with [`RegistryError::Full`] if every slot is taken
    pub fn register_channel(
        &mut self,
        id: Id,
        dma: D,
        handler: H,
    ) -> Result<ChannelIndex, RegisterError> {
        let channel = Channel::new(self.config, dma, handler)?;
        Ok(self.register(id, channel)?)
    }

    /// Registers an already built channel for `id` and arms its first transfer.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Full`] if every slot is taken.
    pub fn register(
        &mut self,
        id: Id,
        channel: Channel<D, H, N>,
    ) -> Result<ChannelIndex, RegistryError> {
        let index = match self.index_of(id) {
            Some(index) => {
                self.slots[index].1 = channel;
                index
            }
            None => {
                if self.slots.push((id, channel)).is_err() {
                    warn!("channel registry is full ({C} channels)");
                    return Err(RegistryError::Full(C));
                }
                self.slots.len() - 1
            }
        };

        self.slots[index].1.arm();
        Ok(index)
    }

    /// Routes a full-chunk completion event to the channel of `id`.
    ///
    /// Events for unknown identities are ignored.
    pub fn on_hardware_event(&mut self, id: Id) {
        match self.channel_mut(id) {
            Some(channel) => channel.on_hardware_event(),
            None => trace!("ignoring event for unregistered channel"),
        }
    }

    /// Routes a completion event of `received` bytes to the channel of `id`.
    ///
    /// Events for unknown identities are ignored.
    pub fn on_transfer_complete(&mut self, id: Id, received: usize) {
        match self.channel_mut(id) {
            Some(channel) => channel.on_transfer_complete(received),
            None => trace!("ignoring transfer of {received} bytes for unregistered channel"),
        }
    }

    /// Pushes `bytes` through the channel of `id`, see [`Channel::feed`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownChannel`] if `id` is not registered.
    pub fn feed(&mut self, id: Id, bytes: &[u8]) -> Result<(), RegistryError> {
        self.channel_mut(id)
            .ok_or(RegistryError::UnknownChannel)?
            .feed(bytes);
        Ok(())
    }

    /// Returns the channel registered for `id`.
    pub fn channel(&self, id: Id) -> Option<&Channel<D, H, N>> {
        self.slots
            .iter()
            .find(|(slot, _)| *slot == id)
            .map(|(_, channel)| channel)
    }

    /// Returns the channel registered for `id`.
    pub fn channel_mut(&mut self, id: Id) -> Option<&mut Channel<D, H, N>> {
        self.slots
            .iter_mut()
            .find(|(slot, _)| *slot == id)
            .map(|(_, channel)| channel)
    }

    /// Returns the slot index of `id`.
    pub fn index_of(&self, id: Id) -> Option<ChannelIndex> {
        self.slots.iter().position(|(slot, _)| *slot == id)
    }

    /// Returns the number of registered channels.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no channel is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, NoDma, Sentence};

    type Handler = fn(&Sentence<'_>);

    fn ignore(_: &Sentence<'_>) {}

    #[test]
    fn test_register_until_full() {
        let mut registry: Registry<u8, NoDma, Handler> = Registry::new();

        assert_eq!(registry.register_channel(10, NoDma, ignore), Ok(0));
        assert_eq!(registry.register_channel(11, NoDma, ignore), Ok(1));
        assert_eq!(registry.register_channel(12, NoDma, ignore), Ok(2));
        assert_eq!(
            registry.register_channel(13, NoDma, ignore),
            Err(RegisterError::Registry(RegistryError::Full(3)))
        );

        // Re-registering replaces the slot.
        assert_eq!(registry.register_channel(11, NoDma, ignore), Ok(1));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_rejects_config() {
        let mut registry: Registry<u8, NoDma, Handler, 3, 64> = Registry::new();
        assert!(matches!(
            registry.register_channel(1, NoDma, ignore),
            Err(RegisterError::Config(ConfigError::BufferTooSmall { .. }))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_channel() {
        let mut registry: Registry<u8, NoDma, Handler> = Registry::new();
        registry.on_hardware_event(3);
        registry.on_transfer_complete(3, 4);
        assert_eq!(registry.feed(3, b"$"), Err(RegistryError::UnknownChannel));
        assert!(registry.channel(3).is_none());
    }
}
