//! Per-channel facade
//!
//! A [`Channel`] owns one UART peripheral, its receive and transmit ring
//! buffers and the scalar state shared with the interrupt service routines
//! in [`super::interrupt`].
//!
//! # Contexts
//!
//! Methods here run in call context. `on_transmit_complete` and
//! `on_receive_complete` run in handler context. When both contexts exist,
//! route every access through [`crate::sync::SharedDualUart`] so each call
//! executes with interrupts masked.

use core::convert::Infallible;

use super::config::{TxMode, UartConfig};
use super::error::{ConfigResult, IoError, IoResult};
use crate::buffer::RingBuffer;
use crate::hal::{UartHardware, baud_divisor};

/// Receive callback, invoked from handler context with each arriving byte
///
/// While installed it replaces default buffering entirely.
pub type RxHandler<'a> = &'a mut dyn FnMut(u8);

// =============================================================================
// Channel State
// =============================================================================

/// Scalar state of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState {
    /// No byte is in flight to the hardware
    pub(super) transmit_ready: bool,
    /// Transmit-complete events are feeding the transmit buffer out
    pub(super) buffered_tx: bool,
    /// Received bytes dropped because the receive buffer was full
    pub(super) rx_overflow: u32,
}

impl ChannelState {
    /// Idle state: ready, single-byte mode, no overflow
    pub const fn new() -> Self {
        Self {
            transmit_ready: true,
            buffered_tx: false,
            rx_overflow: 0,
        }
    }

    /// Check if no byte is in flight
    pub const fn transmit_ready(&self) -> bool {
        self.transmit_ready
    }

    /// Current transmit engine state
    pub const fn tx_mode(&self) -> TxMode {
        if self.buffered_tx {
            TxMode::Buffered
        } else {
            TxMode::SingleByte
        }
    }

    /// Number of received bytes dropped on overflow
    pub const fn rx_overflow(&self) -> u32 {
        self.rx_overflow
    }
}

impl Default for ChannelState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Channel
// =============================================================================

/// One buffered, interrupt-driven serial channel
///
/// # Type Parameters
/// * `'a` - Lifetime of the buffer storage and the receive handler
/// * `H` - Peripheral implementing [`UartHardware`]
///
/// # Example
/// ```ignore
/// let mut bufs = DefaultBuffers::new();
/// let (rx, tx) = bufs.rings();
/// let mut uart0 = Channel::new(unsafe { MmioUsart::usart0() }, rx, tx);
/// uart0.init(UartConfig::default())?;
///
/// uart0.send_block(b"hello")?;
/// while let Some(byte) = uart0.receive_byte() {
///     // ...
/// }
/// ```
pub struct Channel<'a, H: UartHardware> {
    /// Peripheral
    pub(super) hw: H,
    /// Receive buffer (handler produces, caller consumes)
    pub(super) rx: RingBuffer<'a>,
    /// Transmit buffer (caller produces, handler consumes)
    pub(super) tx: RingBuffer<'a>,
    /// Flags and counters
    pub(super) state: ChannelState,
    /// Optional receive callback
    pub(super) rx_handler: Option<RxHandler<'a>>,
    /// Line configuration applied at the last `init`/`set_baud_rate`
    config: UartConfig,
}

impl<'a, H: UartHardware> Channel<'a, H> {
    /// Create a channel from a peripheral and its two buffers.
    ///
    /// The hardware is not touched until [`init`](Self::init).
    pub const fn new(hw: H, rx: RingBuffer<'a>, tx: RingBuffer<'a>) -> Self {
        Self {
            hw,
            rx,
            tx,
            state: ChannelState::new(),
            rx_handler: None,
            config: UartConfig::new(),
        }
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Initialize the channel.
    ///
    /// Empties both buffers, removes the receive handler, enables the
    /// receiver, transmitter and their interrupts, programs the baud rate and
    /// resets the transmit state and overflow count.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidBaudRate`](super::error::ConfigError::InvalidBaudRate)
    /// if the rate cannot be generated; nothing is changed in that case.
    pub fn init(&mut self, config: UartConfig) -> ConfigResult<()> {
        let divisor = baud_divisor(config.cpu_freq_hz, config.baud_rate)?;

        self.rx.flush();
        self.tx.flush();
        self.rx_handler = None;
        self.hw.enable_interrupts();
        self.hw.set_baud_divisor(divisor);
        self.config = config;
        self.state = ChannelState::new();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "UART init: {} baud (divisor {}), rx {} bytes, tx {} bytes",
            config.baud_rate,
            divisor,
            self.rx.capacity(),
            self.tx.capacity()
        );

        Ok(())
    }

    /// Change the line rate.
    ///
    /// Do not call while a buffered transmit is in flight.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidBaudRate`](super::error::ConfigError::InvalidBaudRate)
    /// if the rate cannot be generated from the configured clock.
    pub fn set_baud_rate(&mut self, baud_rate: u32) -> ConfigResult<()> {
        let divisor = baud_divisor(self.config.cpu_freq_hz, baud_rate)?;
        self.hw.set_baud_divisor(divisor);
        self.config.baud_rate = baud_rate;

        #[cfg(feature = "defmt")]
        defmt::debug!("UART baud rate {} (divisor {})", baud_rate, divisor);

        Ok(())
    }

    /// Install or clear the receive handler.
    ///
    /// Takes effect on the next received byte.
    pub fn set_receive_handler(&mut self, handler: Option<RxHandler<'a>>) {
        self.rx_handler = handler;
    }

    /// Check if a receive handler is installed
    pub fn has_receive_handler(&self) -> bool {
        self.rx_handler.is_some()
    }

    /// Line configuration currently applied
    pub fn config(&self) -> UartConfig {
        self.config
    }

    // =========================================================================
    // Transmit
    // =========================================================================

    /// Write one byte to the hardware if the data register is free.
    ///
    /// Never blocks, so it is also usable from handler context.
    pub fn try_send_byte(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        if !self.hw.is_tx_empty() {
            return Err(nb::Error::WouldBlock);
        }
        self.hw.write_data(byte);
        self.state.transmit_ready = false;
        Ok(())
    }

    /// Send one byte, bypassing the transmit buffer.
    ///
    /// **Blocks** by spinning on the hardware "data register empty" flag.
    /// Call from ordinary context only; from an interrupt handler it would
    /// stall all interrupt servicing. Use [`try_send_byte`](Self::try_send_byte)
    /// where blocking is not acceptable.
    pub fn send_byte(&mut self, byte: u8) {
        loop {
            match self.try_send_byte(byte) {
                Ok(()) => return,
                Err(nb::Error::WouldBlock) => core::hint::spin_loop(),
                Err(nb::Error::Other(never)) => match never {},
            }
        }
    }

    /// Append a byte to the transmit buffer without starting transmission.
    ///
    /// # Errors
    ///
    /// [`IoError::TxBufferFull`] when the buffer has no room left.
    pub fn enqueue_byte(&mut self, byte: u8) -> IoResult<()> {
        if self.tx.push_back(byte) {
            Ok(())
        } else {
            Err(IoError::TxBufferFull)
        }
    }

    /// Start feeding the transmit buffer to the hardware.
    ///
    /// Switches to buffered mode and sends the first queued byte through
    /// [`send_byte`](Self::send_byte) (and so may block briefly). The
    /// transmit-complete events send the rest.
    ///
    /// # Errors
    ///
    /// [`IoError::TxBufferEmpty`] if nothing is queued; the state is left
    /// untouched.
    pub fn start_buffered_send(&mut self) -> IoResult<()> {
        if self.tx.is_empty() {
            return Err(IoError::TxBufferEmpty);
        }
        self.state.buffered_tx = true;
        if let Some(first) = self.tx.pop_front() {
            self.send_byte(first);
        }
        Ok(())
    }

    /// Queue a whole block and start sending it.
    ///
    /// All-or-nothing: the block is accepted only if
    /// `queued + bytes.len() < capacity`. The comparison is strict, so one
    /// slot of the transmit buffer always stays free.
    ///
    /// # Errors
    ///
    /// - [`IoError::EmptyBlock`] for an empty slice
    /// - [`IoError::TxBufferFull`] when the headroom check fails
    ///
    /// Neither error modifies the buffer or the channel state.
    pub fn send_block(&mut self, bytes: &[u8]) -> IoResult<()> {
        if bytes.is_empty() {
            return Err(IoError::EmptyBlock);
        }
        if self.tx.len() + bytes.len() >= self.tx.capacity() {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "UART block of {} rejected, {}/{} queued",
                bytes.len(),
                self.tx.len(),
                self.tx.capacity()
            );
            return Err(IoError::TxBufferFull);
        }

        for &byte in bytes {
            self.tx.push_back(byte);
        }
        self.start_buffered_send()
    }

    /// Queue a block and start sending it, without ever waiting.
    ///
    /// `WouldBlock` while a byte is in flight or the data register is busy.
    /// On an idle channel whose buffer lacks room because bytes were queued
    /// with [`enqueue_byte`](Self::enqueue_byte) but never started, those
    /// bytes are started first and the call still reports `WouldBlock`; the
    /// transmit-complete events then make room.
    ///
    /// # Errors
    ///
    /// - [`IoError::EmptyBlock`] for an empty slice
    /// - [`IoError::BlockTooLarge`] if the block cannot fit even an empty
    ///   transmit buffer
    pub fn poll_send_block(&mut self, bytes: &[u8]) -> nb::Result<(), IoError> {
        if bytes.is_empty() {
            return Err(nb::Error::Other(IoError::EmptyBlock));
        }
        if bytes.len() >= self.tx.capacity() {
            return Err(nb::Error::Other(IoError::BlockTooLarge));
        }
        if self.is_transmit_pending() || !self.hw.is_tx_empty() {
            return Err(nb::Error::WouldBlock);
        }

        match self.send_block(bytes) {
            Ok(()) => Ok(()),
            Err(IoError::TxBufferFull) => {
                // Queued bytes nobody started; only their drain frees room
                self.start_buffered_send().map_err(nb::Error::Other)?;
                Err(nb::Error::WouldBlock)
            }
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    /// Discard bytes queued but not yet written to the hardware.
    pub fn flush_transmit_buffer(&mut self) {
        self.tx.flush();
    }

    /// Check if a byte is still in flight
    pub fn is_transmit_pending(&self) -> bool {
        !self.state.transmit_ready
    }

    /// Current transmit engine state
    pub fn tx_mode(&self) -> TxMode {
        self.state.tx_mode()
    }

    // =========================================================================
    // Receive
    // =========================================================================

    /// Take the oldest received byte, or `None` if nothing is buffered.
    pub fn receive_byte(&mut self) -> Option<u8> {
        if self.rx.capacity() == 0 {
            return None;
        }
        self.rx.pop_front()
    }

    /// Discard all buffered received bytes.
    pub fn flush_receive_buffer(&mut self) {
        self.rx.flush();
    }

    /// Check if no received bytes are buffered
    pub fn is_receive_buffer_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Number of received bytes dropped because the buffer was full
    pub fn receive_overflow_count(&self) -> u32 {
        self.state.rx_overflow
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Snapshot of the channel flags and counters
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Receive buffer
    pub fn rx_buffer(&self) -> &RingBuffer<'a> {
        &self.rx
    }

    /// Transmit buffer
    pub fn tx_buffer(&self) -> &RingBuffer<'a> {
        &self.tx
    }

    /// Underlying peripheral
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    /// Underlying peripheral (mutable)
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
