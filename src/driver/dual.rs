//! Two-channel driver instance
//!
//! [`DualUart`] owns both channels. It replaces per-channel global tables: the
//! platform's interrupt vectors reach the channels through one explicit
//! instance (usually wrapped in [`crate::sync::SharedDualUart`]).

use super::channel::Channel;
use super::config::{ChannelId, UartConfig};
use super::error::{ConfigResult, Result};
use super::interrupt::UartEvent;
use crate::hal::UartHardware;
use crate::internal::constants::CHANNEL_COUNT;

/// Driver for both UART channels
///
/// # Example
/// ```ignore
/// let mut uart = DualUart::new(
///     Channel::new(unsafe { MmioUsart::usart0() }, rx0, tx0),
///     Channel::new(unsafe { MmioUsart::usart1() }, rx1, tx1),
/// );
/// uart.init(UartConfig::default(), UartConfig::default().with_baud_rate(38_400))?;
///
/// uart.channel_mut(ChannelId::Uart1).send_block(b"ping")?;
/// ```
pub struct DualUart<'a, H: UartHardware> {
    channels: [Channel<'a, H>; CHANNEL_COUNT],
}

impl<'a, H: UartHardware> DualUart<'a, H> {
    /// Create a driver from the two channels
    pub const fn new(uart0: Channel<'a, H>, uart1: Channel<'a, H>) -> Self {
        Self {
            channels: [uart0, uart1],
        }
    }

    /// Initialize both channels.
    ///
    /// # Errors
    ///
    /// Stops at the first channel whose baud rate is invalid; channel 0 is
    /// already initialized if channel 1 fails.
    pub fn init(&mut self, uart0: UartConfig, uart1: UartConfig) -> ConfigResult<()> {
        self.init_channel(ChannelId::Uart0, uart0)?;
        self.init_channel(ChannelId::Uart1, uart1)
    }

    /// Initialize a single channel
    ///
    /// # Errors
    ///
    /// See [`Channel::init`].
    pub fn init_channel(&mut self, id: ChannelId, config: UartConfig) -> ConfigResult<()> {
        self.channel_mut(id).init(config)
    }

    /// Borrow a channel
    #[inline]
    pub fn channel(&self, id: ChannelId) -> &Channel<'a, H> {
        &self.channels[id.index()]
    }

    /// Borrow a channel mutably
    #[inline]
    pub fn channel_mut(&mut self, id: ChannelId) -> &mut Channel<'a, H> {
        &mut self.channels[id.index()]
    }

    /// Borrow a channel by raw index.
    ///
    /// This is the only entry point taking an unchecked index.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidChannel`](super::error::ConfigError::InvalidChannel)
    /// for any index other than 0 or 1.
    pub fn select(&mut self, index: u8) -> Result<&mut Channel<'a, H>> {
        let id = ChannelId::try_from(index)?;
        Ok(self.channel_mut(id))
    }

    /// Transmit-complete interrupt entry point for `id`
    #[inline]
    pub fn on_transmit_complete(&mut self, id: ChannelId) {
        self.channel_mut(id).on_transmit_complete();
    }

    /// Receive-complete interrupt entry point for `id`
    #[inline]
    pub fn on_receive_complete(&mut self, id: ChannelId) {
        self.channel_mut(id).on_receive_complete();
    }

    /// Dispatch a hardware event to channel `id`
    #[inline]
    pub fn handle(&mut self, id: ChannelId, event: UartEvent) {
        self.channel_mut(id).handle(event);
    }

    /// Split into the two channels
    pub fn split(&mut self) -> (&mut Channel<'a, H>, &mut Channel<'a, H>) {
        let [uart0, uart1] = &mut self.channels;
        (uart0, uart1)
    }

    /// Release the channels
    pub fn free(self) -> (Channel<'a, H>, Channel<'a, H>) {
        let [uart0, uart1] = self.channels;
        (uart0, uart1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
