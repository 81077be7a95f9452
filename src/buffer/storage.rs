//! Statically allocated buffer storage for one channel.

use crate::internal::constants::{DEFAULT_RX_BUFFER_SIZE, DEFAULT_TX_BUFFER_SIZE};

use super::RingBuffer;

/// Receive and transmit storage for one channel, sized at compile time.
///
/// # Type Parameters
/// * `RX` - Receive buffer size in bytes
/// * `TX` - Transmit buffer size in bytes
///
/// # Example
/// ```ignore
/// static mut UART0_BUFS: DefaultBuffers = ChannelBuffers::new();
///
/// let (rx, tx) = unsafe { (*core::ptr::addr_of_mut!(UART0_BUFS)).rings() };
/// ```
#[derive(Debug)]
pub struct ChannelBuffers<const RX: usize, const TX: usize> {
    rx: [u8; RX],
    tx: [u8; TX],
}

impl<const RX: usize, const TX: usize> ChannelBuffers<RX, TX> {
    /// Create zeroed storage (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            rx: [0; RX],
            tx: [0; TX],
        }
    }

    /// Borrow the storage as a pair of empty `(rx, tx)` ring buffers.
    pub fn rings(&mut self) -> (RingBuffer<'_>, RingBuffer<'_>) {
        (RingBuffer::new(&mut self.rx), RingBuffer::new(&mut self.tx))
    }

    /// Total storage size in bytes
    pub const fn total_size() -> usize {
        RX + TX
    }
}

impl<const RX: usize, const TX: usize> Default for ChannelBuffers<RX, TX> {
    fn default() -> Self {
        Self::new()
    }
}

/// Default buffer sizes (128 byte RX, 16 byte TX).
pub type DefaultBuffers = ChannelBuffers<DEFAULT_RX_BUFFER_SIZE, DEFAULT_TX_BUFFER_SIZE>;

/// Small buffers for memory-constrained parts.
pub type SmallBuffers = ChannelBuffers<32, 16>;

/// Large buffers for high-throughput links.
pub type LargeBuffers = ChannelBuffers<256, 128>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_have_configured_capacities() {
        let mut bufs = ChannelBuffers::<8, 4>::new();
        let (rx, tx) = bufs.rings();
        assert_eq!(rx.capacity(), 8);
        assert_eq!(tx.capacity(), 4);
        assert!(rx.is_empty());
        assert!(tx.is_empty());
    }

    #[test]
    fn default_sizes() {
        assert_eq!(DefaultBuffers::total_size(), 0x80 + 0x10);
    }
}
