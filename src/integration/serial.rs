//! embedded-hal-nb serial traits
//!
//! A [`Channel`] is a non-blocking byte-wise serial port:
//!
//! - `read` pops the receive buffer, `WouldBlock` when it is empty
//! - `write` hands one byte to the hardware once the channel is idle,
//!   `WouldBlock` while a byte or a buffered block is in flight
//! - `flush` is `WouldBlock` until nothing is in flight
//!
//! # Example
//!
//! ```ignore
//! use embedded_hal_nb::serial::{Read, Write};
//!
//! let byte = nb::block!(uart0.read())?;
//! nb::block!(uart0.write(byte))?;
//! nb::block!(uart0.flush())?;
//! ```

use embedded_hal_nb::serial::{ErrorKind, ErrorType, Read, Write};

use crate::driver::channel::Channel;
use crate::driver::error::Error;
use crate::hal::UartHardware;

impl embedded_hal_nb::serial::Error for Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl<H: UartHardware> ErrorType for Channel<'_, H> {
    type Error = Error;
}

impl<H: UartHardware> Read<u8> for Channel<'_, H> {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.receive_byte().ok_or(nb::Error::WouldBlock)
    }
}

impl<H: UartHardware> Write<u8> for Channel<'_, H> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        if self.is_transmit_pending() {
            return Err(nb::Error::WouldBlock);
        }
        match self.try_send_byte(word) {
            Ok(()) => Ok(()),
            Err(nb::Error::WouldBlock) => Err(nb::Error::WouldBlock),
            Err(nb::Error::Other(never)) => match never {},
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if self.is_transmit_pending() {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}
