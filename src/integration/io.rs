//! embedded-io blocking traits
//!
//! Blocking I/O needs the interrupt handlers to keep running while it waits,
//! so the traits are implemented on [`SharedChannel`], a handle to one
//! channel of a [`SharedDualUart`], rather than on [`Channel`] itself. Every
//! poll is its own short critical section.
//!
//! [`Channel`]: crate::driver::Channel
//!
//! # Example
//!
//! ```ignore
//! use embedded_io::Write;
//!
//! static UART: SharedDualUart<'static, MmioUsart> = SharedDualUart::new();
//!
//! let mut console = UART.io(ChannelId::Uart0);
//! writeln!(console, "boot ok").ok();
//! ```

use embedded_io::{ErrorKind, ErrorType, Read, Write};

use crate::driver::config::ChannelId;
use crate::driver::error::{ConfigError, Error, IoError};
use crate::hal::UartHardware;
use crate::sync::SharedDualUart;

impl embedded_io::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(IoError::EmptyBlock | IoError::BlockTooLarge) => ErrorKind::InvalidInput,
            Self::Io(IoError::TxBufferFull) => ErrorKind::OutOfMemory,
            Self::Config(ConfigError::NotInitialized) => ErrorKind::NotConnected,
            _ => ErrorKind::Other,
        }
    }
}

/// Blocking handle to one channel of a [`SharedDualUart`]
pub struct SharedChannel<'s, 'a, H: UartHardware> {
    uart: &'s SharedDualUart<'a, H>,
    id: ChannelId,
}

impl<'s, 'a, H: UartHardware> SharedChannel<'s, 'a, H> {
    /// Create a handle to channel `id`
    pub const fn new(uart: &'s SharedDualUart<'a, H>, id: ChannelId) -> Self {
        Self { uart, id }
    }

    /// Channel this handle drives
    pub const fn id(&self) -> ChannelId {
        self.id
    }
}

impl<'a, H: UartHardware> SharedDualUart<'a, H> {
    /// Blocking embedded-io handle to channel `id`
    pub const fn io(&self, id: ChannelId) -> SharedChannel<'_, 'a, H> {
        SharedChannel::new(self, id)
    }
}

impl<H: UartHardware> ErrorType for SharedChannel<'_, '_, H> {
    type Error = Error;
}

impl<H: UartHardware> Read for SharedChannel<'_, '_, H> {
    /// Blocks until at least one byte is buffered, then drains as many as
    /// fit in `buf`.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        let first = loop {
            if let Some(byte) = self.uart.receive_byte(self.id)? {
                break byte;
            }
            core::hint::spin_loop();
        };
        buf[0] = first;

        self.uart.with_channel(self.id, |ch| {
            let mut count = 1;
            while count < buf.len() {
                match ch.receive_byte() {
                    Some(byte) => {
                        buf[count] = byte;
                        count += 1;
                    }
                    None => break,
                }
            }
            count
        })
    }
}

impl<H: UartHardware> Write for SharedChannel<'_, '_, H> {
    /// Waits for the channel to go idle, then queues as much of `buf` as the
    /// transmit buffer accepts in one block. Bytes queued earlier without a
    /// started send go out first.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        // One slot always stays free
        let capacity = self.uart.with_channel(self.id, |ch| ch.tx_buffer().capacity())?;
        let chunk = buf.len().min(capacity.saturating_sub(1));
        if chunk == 0 {
            return Err(IoError::BlockTooLarge.into());
        }

        loop {
            match self.uart.with_channel(self.id, |ch| ch.poll_send_block(&buf[..chunk]))? {
                Ok(()) => return Ok(chunk),
                Err(nb::Error::WouldBlock) => core::hint::spin_loop(),
                Err(nb::Error::Other(e)) => return Err(e.into()),
            }
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.uart.flush(self.id)
    }
}
