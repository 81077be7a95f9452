//! Testing utilities and mock implementations
//!
//! This module provides a mock UART peripheral for testing the driver on the
//! host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use crate::buffer::RingBuffer;
use crate::driver::channel::Channel;
use crate::hal::UartHardware;

// =============================================================================
// Mock UART
// =============================================================================

/// Mock UART peripheral
///
/// Records every byte written to the data register and serves received
/// bytes from a queue.
///
/// # Example
///
/// ```ignore
/// let mut uart = MockUart::new();
/// uart.inject(0x42);
/// assert_eq!(uart.read_data(), 0x42);
/// ```
#[derive(Debug, Default)]
pub struct MockUart {
    /// Bytes written to the data register, in order
    pub written: Vec<u8>,
    /// Bytes the next receive events will read
    pub incoming: VecDeque<u8>,
    /// Polls of `is_tx_empty` that still report busy
    busy_polls: Cell<usize>,
    /// Total number of `is_tx_empty` polls
    pub tx_empty_polls: Cell<usize>,
    /// Number of data register reads
    pub reads: usize,
    /// Whether `enable_interrupts` has been called
    pub interrupts_enabled: bool,
    /// Last programmed baud divisor
    pub divisor: Option<u16>,
}

impl MockUart {
    /// Create an idle mock with an empty transmit register
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a busy transmit register for the next `polls` checks
    pub fn set_busy_polls(&self, polls: usize) {
        self.busy_polls.set(polls);
    }

    /// Queue a byte for the next receive event
    pub fn inject(&mut self, byte: u8) {
        self.incoming.push_back(byte);
    }
}

impl UartHardware for MockUart {
    fn is_tx_empty(&self) -> bool {
        self.tx_empty_polls.set(self.tx_empty_polls.get() + 1);
        let busy = self.busy_polls.get();
        if busy > 0 {
            self.busy_polls.set(busy - 1);
            false
        } else {
            true
        }
    }

    fn write_data(&mut self, byte: u8) {
        self.written.push(byte);
    }

    fn read_data(&mut self) -> u8 {
        self.reads += 1;
        self.incoming.pop_front().unwrap_or(0)
    }

    fn enable_interrupts(&mut self) {
        self.interrupts_enabled = true;
    }

    fn set_baud_divisor(&mut self, divisor: u16) {
        self.divisor = Some(divisor);
    }
}

// =============================================================================
// Channel Helpers
// =============================================================================

/// Build a channel over the given storage with a fresh mock peripheral
pub fn mock_channel<'a>(rx: &'a mut [u8], tx: &'a mut [u8]) -> Channel<'a, MockUart> {
    Channel::new(MockUart::new(), RingBuffer::new(rx), RingBuffer::new(tx))
}

/// Simulate one byte arriving on the line
pub fn receive(channel: &mut Channel<'_, MockUart>, byte: u8) {
    channel.hardware_mut().inject(byte);
    channel.on_receive_complete();
}

/// Fire transmit-complete events until buffered mode ends (bounded)
pub fn drain_tx(channel: &mut Channel<'_, MockUart>) {
    for _ in 0..=channel.tx_buffer().capacity() + 1 {
        channel.on_transmit_complete();
        if !channel.is_transmit_pending() {
            break;
        }
    }
}

// =============================================================================
// Counting Waker
// =============================================================================

#[cfg(feature = "async")]
pub use waker::{WakeCounter, test_waker};

#[cfg(feature = "async")]
mod waker {
    extern crate std;

    use core::task::{RawWaker, RawWakerVTable, Waker};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts how often a waker built by [`test_waker`] was woken
    pub struct WakeCounter {
        count: AtomicUsize,
    }

    impl WakeCounter {
        pub fn new() -> Arc<Self> {
            Arc::new(Self {
                count: AtomicUsize::new(0),
            })
        }

        pub fn count(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }
    }

    /// Build a waker that bumps `counter` when woken
    pub fn test_waker(counter: Arc<WakeCounter>) -> Waker {
        fn clone_fn(ptr: *const ()) -> RawWaker {
            // SAFETY: `ptr` originates from `Arc::into_raw` in this helper.
            let arc = unsafe { Arc::from_raw(ptr as *const WakeCounter) };
            let cloned = arc.clone();
            core::mem::forget(arc);
            RawWaker::new(Arc::into_raw(cloned) as *const (), &VTABLE)
        }

        fn wake_fn(ptr: *const ()) {
            // SAFETY: `ptr` originates from `Arc::into_raw` in this helper.
            let arc = unsafe { Arc::from_raw(ptr as *const WakeCounter) };
            arc.count.fetch_add(1, Ordering::SeqCst);
        }

        fn wake_by_ref_fn(ptr: *const ()) {
            // SAFETY: `ptr` originates from `Arc::into_raw` in this helper.
            let arc = unsafe { Arc::from_raw(ptr as *const WakeCounter) };
            arc.count.fetch_add(1, Ordering::SeqCst);
            core::mem::forget(arc);
        }

        fn drop_fn(ptr: *const ()) {
            // SAFETY: `ptr` originates from `Arc::into_raw` in this helper.
            unsafe {
                drop(Arc::from_raw(ptr as *const WakeCounter));
            }
        }

        static VTABLE: RawWakerVTable =
            RawWakerVTable::new(clone_fn, wake_fn, wake_by_ref_fn, drop_fn);

        let raw = RawWaker::new(Arc::into_raw(counter) as *const (), &VTABLE);
        // SAFETY: `raw` is built from a valid `RawWakerVTable` and pointer.
        unsafe { Waker::from_raw(raw) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_busy_polls_count_down() {
        let uart = MockUart::new();
        uart.set_busy_polls(2);
        assert!(!uart.is_tx_empty());
        assert!(!uart.is_tx_empty());
        assert!(uart.is_tx_empty());
        assert_eq!(uart.tx_empty_polls.get(), 3);
    }

    #[test]
    fn mock_serves_injected_bytes_in_order() {
        let mut uart = MockUart::new();
        uart.inject(1);
        uart.inject(2);
        assert_eq!(uart.read_data(), 1);
        assert_eq!(uart.read_data(), 2);
        assert_eq!(uart.reads, 2);
    }
}
