//! ISR-safe dual UART wrapper using critical sections.
//!
//! [`SharedDualUart`] is the one place both execution contexts meet: the
//! interrupt vectors call its `on_*` entry points, application code calls the
//! rest. Every access runs inside a short critical section, which is what
//! makes the flags and ring buffer indices safe to share.

use super::primitives::CriticalSectionCell;
use crate::driver::channel::Channel;
use crate::driver::config::ChannelId;
use crate::driver::dual::DualUart;
use crate::driver::error::{ConfigError, Error, Result};
use crate::driver::interrupt::UartEvent;
use crate::hal::UartHardware;

#[cfg(feature = "async")]
use super::asynch::ChannelWakers;

/// ISR-safe holder for a [`DualUart`].
///
/// Starts empty so it can live in a `static`; [`install`](Self::install) the
/// driver once its buffers exist.
///
/// # Example
///
/// ```ignore
/// static UART: SharedDualUart<'static, MmioUsart> = SharedDualUart::new();
///
/// fn main() {
///     UART.install(uart);
///     UART.with(|u| u.init(UartConfig::default(), UartConfig::default())).unwrap();
///     UART.send_block(ChannelId::Uart0, b"boot\r\n").ok();
/// }
///
/// #[interrupt]
/// fn USART0_TX() {
///     UART.on_transmit_complete(ChannelId::Uart0);
/// }
///
/// #[interrupt]
/// fn USART0_RX() {
///     UART.on_receive_complete(ChannelId::Uart0);
/// }
/// ```
///
/// A receive handler runs inside the critical section of
/// [`on_receive_complete`](Self::on_receive_complete); it must not call back
/// into the same wrapper.
pub struct SharedDualUart<'a, H: UartHardware> {
    inner: CriticalSectionCell<Option<DualUart<'a, H>>>,
    #[cfg(feature = "async")]
    pub(super) wakers: ChannelWakers,
}

impl<'a, H: UartHardware> SharedDualUart<'a, H> {
    /// Create an empty wrapper (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
            #[cfg(feature = "async")]
            wakers: ChannelWakers::new(),
        }
    }

    /// Install the driver, returning any previously installed one.
    pub fn install(&self, uart: DualUart<'a, H>) -> Option<DualUart<'a, H>> {
        self.inner.replace(Some(uart))
    }

    /// Remove the driver.
    pub fn take(&self) -> Option<DualUart<'a, H>> {
        self.inner.replace(None)
    }

    /// Check if a driver is installed
    pub fn is_installed(&self) -> bool {
        self.inner.with(|uart| uart.is_some())
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`] if no driver is installed.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut DualUart<'a, H>) -> R,
    {
        self.inner
            .with(|uart| uart.as_mut().map(f))
            .ok_or_else(|| ConfigError::NotInitialized.into())
    }

    /// Execute a closure on one channel.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`] if no driver is installed.
    #[inline]
    pub fn with_channel<R, F>(&self, id: ChannelId, f: F) -> Result<R>
    where
        F: FnOnce(&mut Channel<'a, H>) -> R,
    {
        self.with(|uart| f(uart.channel_mut(id)))
    }

    /// Try to execute a closure, returning `None` if not installed or already
    /// borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut DualUart<'a, H>) -> R,
    {
        self.inner.try_with(|uart| uart.as_mut().map(f)).flatten()
    }

    // =========================================================================
    // Interrupt Entry Points
    // =========================================================================

    /// Transmit-complete interrupt entry point.
    ///
    /// Does nothing if no driver is installed.
    #[inline]
    pub fn on_transmit_complete(&self, id: ChannelId) {
        let _ = self.with(|uart| uart.on_transmit_complete(id));

        #[cfg(feature = "async")]
        self.wakers.tx(id).wake();
    }

    /// Receive-complete interrupt entry point.
    ///
    /// Does nothing if no driver is installed.
    #[inline]
    pub fn on_receive_complete(&self, id: ChannelId) {
        let _ = self.with(|uart| uart.on_receive_complete(id));

        #[cfg(feature = "async")]
        self.wakers.rx(id).wake();
    }

    /// Dispatch a hardware event to channel `id`
    #[inline]
    pub fn handle(&self, id: ChannelId, event: UartEvent) {
        match event {
            UartEvent::TransmitComplete => self.on_transmit_complete(id),
            UartEvent::ReceiveComplete => self.on_receive_complete(id),
        }
    }

    // =========================================================================
    // Call-Context Operations
    // =========================================================================

    /// Send one byte, bypassing the transmit buffer.
    ///
    /// **Blocks** until the data register is free, but polls it in separate
    /// short critical sections so interrupts keep being serviced.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`] if no driver is installed.
    pub fn send_byte(&self, id: ChannelId, byte: u8) -> Result<()> {
        loop {
            match self.with_channel(id, |ch| ch.try_send_byte(byte))? {
                Ok(()) => return Ok(()),
                Err(nb::Error::WouldBlock) => core::hint::spin_loop(),
                Err(nb::Error::Other(never)) => match never {},
            }
        }
    }

    /// Queue a block and start sending it (see [`Channel::send_block`]).
    ///
    /// Waits, in separate short critical sections, until the data register
    /// is free, so starting the block never spins with interrupts masked.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`] or the channel's transmit error.
    pub fn send_block(&self, id: ChannelId, bytes: &[u8]) -> Result<()> {
        loop {
            let result = self.with_channel(id, |ch| {
                (bytes.is_empty() || ch.hardware().is_tx_empty()).then(|| ch.send_block(bytes))
            })?;
            match result {
                Some(result) => return result.map_err(Error::from),
                None => core::hint::spin_loop(),
            }
        }
    }

    /// Take the oldest received byte, if any.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`] if no driver is installed.
    pub fn receive_byte(&self, id: ChannelId) -> Result<Option<u8>> {
        self.with_channel(id, Channel::receive_byte)
    }

    /// Check if channel `id` still has a byte in flight.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`] if no driver is installed.
    pub fn is_transmit_pending(&self, id: ChannelId) -> Result<bool> {
        self.with_channel(id, |ch| ch.is_transmit_pending())
    }

    /// Spin until channel `id` has nothing in flight.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`] if no driver is installed.
    pub fn flush(&self, id: ChannelId) -> Result<()> {
        while self.is_transmit_pending(id)? {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

impl<H: UartHardware> Default for SharedDualUart<'_, H> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
