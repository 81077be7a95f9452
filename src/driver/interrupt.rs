//! Transmit and receive interrupt service.
//!
//! These are the handler-context halves of a [`Channel`]. The platform's
//! interrupt dispatch calls them once per hardware event; they never block.

use super::channel::Channel;
use crate::hal::UartHardware;

/// Hardware event raised by a UART channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartEvent {
    /// The last byte written to the data register has left the shifter
    TransmitComplete,
    /// A byte is waiting in the receive data register
    ReceiveComplete,
}

impl<H: UartHardware> Channel<'_, H> {
    /// Service a "transmit complete" event.
    ///
    /// In buffered mode the next queued byte is written straight to the data
    /// register; once the buffer is found empty the channel drops back to
    /// single-byte mode and becomes ready. In single-byte mode the in-flight
    /// byte is simply done.
    pub fn on_transmit_complete(&mut self) {
        if self.state.buffered_tx {
            if let Some(byte) = self.tx.pop_front() {
                self.hw.write_data(byte);
            } else {
                self.state.buffered_tx = false;
                self.state.transmit_ready = true;
            }
        } else {
            self.state.transmit_ready = true;
        }
    }

    /// Service a "receive complete" event.
    ///
    /// The data register is always read. The byte goes to the receive
    /// handler if one is installed, otherwise into the receive buffer; a
    /// full buffer drops it and bumps the overflow count.
    pub fn on_receive_complete(&mut self) {
        let byte = self.hw.read_data();

        if let Some(handler) = self.rx_handler.as_mut() {
            handler(byte);
        } else if !self.rx.push_back(byte) {
            self.state.rx_overflow = self.state.rx_overflow.saturating_add(1);

            #[cfg(feature = "defmt")]
            defmt::trace!("UART rx overflow, {} dropped", self.state.rx_overflow);
        }
    }

    /// Dispatch a hardware event to its service routine
    #[inline]
    pub fn handle(&mut self, event: UartEvent) {
        match event {
            UartEvent::TransmitComplete => self.on_transmit_complete(),
            UartEvent::ReceiveComplete => self.on_receive_complete(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
