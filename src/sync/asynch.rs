//! Async/await support for the shared dual UART.
//!
//! The interrupt entry points of [`SharedDualUart`] wake one receive and one
//! transmit waker per channel; the futures here register with them and
//! re-check the channel before returning `Pending`.

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use super::primitives::AtomicWaker;
use super::shared::SharedDualUart;
use crate::driver::config::ChannelId;
use crate::driver::error::Result;
use crate::hal::UartHardware;
use crate::internal::constants::CHANNEL_COUNT;

/// Receive and transmit wakers for both channels.
pub struct ChannelWakers {
    rx: [AtomicWaker; CHANNEL_COUNT],
    tx: [AtomicWaker; CHANNEL_COUNT],
}

impl ChannelWakers {
    /// Create empty wakers (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            rx: [AtomicWaker::new(), AtomicWaker::new()],
            tx: [AtomicWaker::new(), AtomicWaker::new()],
        }
    }

    /// Waker woken on every receive event of `id`
    #[inline]
    pub fn rx(&self, id: ChannelId) -> &AtomicWaker {
        &self.rx[id.index()]
    }

    /// Waker woken on every transmit event of `id`
    #[inline]
    pub fn tx(&self, id: ChannelId) -> &AtomicWaker {
        &self.tx[id.index()]
    }
}

impl Default for ChannelWakers {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Futures
// =============================================================================

/// Future resolving to the next received byte.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct ReceiveFuture<'s, 'a, H: UartHardware> {
    uart: &'s SharedDualUart<'a, H>,
    id: ChannelId,
}

impl<H: UartHardware> Future for ReceiveFuture<'_, '_, H> {
    type Output = Result<u8>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        match this.uart.receive_byte(this.id) {
            Ok(Some(byte)) => return Poll::Ready(Ok(byte)),
            Ok(None) => {}
            Err(e) => return Poll::Ready(Err(e)),
        }

        this.uart.wakers.rx(this.id).register(cx.waker());

        // A byte may have landed between the check and the registration
        match this.uart.receive_byte(this.id) {
            Ok(Some(byte)) => Poll::Ready(Ok(byte)),
            Ok(None) => Poll::Pending,
            Err(e) => Poll::Ready(Err(e)),
        }
    }
}

/// Future resolving once a channel has nothing in flight.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct FlushFuture<'s, 'a, H: UartHardware> {
    uart: &'s SharedDualUart<'a, H>,
    id: ChannelId,
}

impl<H: UartHardware> Future for FlushFuture<'_, '_, H> {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        match this.uart.is_transmit_pending(this.id) {
            Ok(false) => return Poll::Ready(Ok(())),
            Ok(true) => {}
            Err(e) => return Poll::Ready(Err(e)),
        }

        this.uart.wakers.tx(this.id).register(cx.waker());

        match this.uart.is_transmit_pending(this.id) {
            Ok(false) => Poll::Ready(Ok(())),
            Ok(true) => Poll::Pending,
            Err(e) => Poll::Ready(Err(e)),
        }
    }
}

/// Future resolving once a block has been queued and its transmission started.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct WriteFuture<'s, 'a, 'b, H: UartHardware> {
    uart: &'s SharedDualUart<'a, H>,
    id: ChannelId,
    bytes: &'b [u8],
}

impl<H: UartHardware> WriteFuture<'_, '_, '_, H> {
    /// Start the block if the channel is idle; `Ok(false)` means wait.
    fn try_start(&self) -> Result<bool> {
        match self.uart.with_channel(self.id, |ch| ch.poll_send_block(self.bytes))? {
            Ok(()) => Ok(true),
            Err(nb::Error::WouldBlock) => Ok(false),
            Err(nb::Error::Other(e)) => Err(e.into()),
        }
    }
}

impl<H: UartHardware> Future for WriteFuture<'_, '_, '_, H> {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        match this.try_start() {
            Ok(true) => return Poll::Ready(Ok(())),
            Ok(false) => {}
            Err(e) => return Poll::Ready(Err(e)),
        }

        this.uart.wakers.tx(this.id).register(cx.waker());

        match this.try_start() {
            Ok(true) => Poll::Ready(Ok(())),
            Ok(false) => Poll::Pending,
            Err(e) => Poll::Ready(Err(e)),
        }
    }
}

// =============================================================================
// Async Operations
// =============================================================================

impl<'a, H: UartHardware> SharedDualUart<'a, H> {
    /// Wait for the next received byte on `id`.
    ///
    /// Bytes consumed by a receive handler never reach this future.
    pub fn receive_async(&self, id: ChannelId) -> ReceiveFuture<'_, 'a, H> {
        ReceiveFuture { uart: self, id }
    }

    /// Wait until `id` has nothing in flight.
    pub fn flush_async(&self, id: ChannelId) -> FlushFuture<'_, 'a, H> {
        FlushFuture { uart: self, id }
    }

    /// Wait for `id` to go idle, then queue `bytes` and start sending them.
    ///
    /// Resolves once the block is queued, not once it has left the wire;
    /// follow with [`flush_async`](Self::flush_async) for that. Bytes left
    /// queued by [`Channel::enqueue_byte`](crate::driver::Channel::enqueue_byte)
    /// without a started send are started first, ahead of `bytes`.
    ///
    /// # Errors
    ///
    /// - [`IoError::EmptyBlock`](crate::driver::error::IoError::EmptyBlock)
    ///   for an empty slice
    /// - [`IoError::BlockTooLarge`](crate::driver::error::IoError::BlockTooLarge)
    ///   if the block can never pass the transmit headroom check
    /// - [`ConfigError::NotInitialized`](crate::driver::error::ConfigError::NotInitialized)
    ///   if no driver is installed
    pub fn write_async<'b>(&self, id: ChannelId, bytes: &'b [u8]) -> WriteFuture<'_, 'a, 'b, H> {
        WriteFuture {
            uart: self,
            id,
            bytes,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]
mod tests {
    extern crate std;
    use core::pin::pin;
    use std::vec;

    use super::*;
    use crate::driver::dual::DualUart;
    use crate::driver::error::{ConfigError, Error, IoError};
    use crate::testing::{MockUart, WakeCounter, mock_channel, test_waker};

    fn with_shared<F>(f: F)
    where
        F: FnOnce(&SharedDualUart<'_, MockUart>),
    {
        let (mut rx0, mut tx0) = ([0u8; 8], [0u8; 8]);
        let (mut rx1, mut tx1) = ([0u8; 8], [0u8; 8]);
        let shared = SharedDualUart::new();
        shared.install(DualUart::new(
            mock_channel(&mut rx0, &mut tx0),
            mock_channel(&mut rx1, &mut tx1),
        ));
        f(&shared);
    }

    fn inject(shared: &SharedDualUart<'_, MockUart>, id: ChannelId, byte: u8) {
        shared
            .with_channel(id, |ch| ch.hardware_mut().inject(byte))
            .unwrap();
    }

    #[test]
    fn receive_async_waits_for_interrupt() {
        with_shared(|shared| {
            let counter = WakeCounter::new();
            let waker = test_waker(counter.clone());
            let mut cx = Context::from_waker(&waker);
            let mut fut = pin!(shared.receive_async(ChannelId::Uart1));

            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
            assert!(shared.wakers.rx(ChannelId::Uart1).is_registered());

            // Traffic on the other channel does not wake this one
            inject(shared, ChannelId::Uart0, 0x10);
            shared.on_receive_complete(ChannelId::Uart0);
            assert_eq!(counter.count(), 0);

            inject(shared, ChannelId::Uart1, 0x20);
            shared.on_receive_complete(ChannelId::Uart1);
            assert_eq!(counter.count(), 1);
            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(Ok(0x20)));
        });
    }

    #[test]
    fn receive_async_ready_when_buffered() {
        with_shared(|shared| {
            inject(shared, ChannelId::Uart0, 0x7E);
            shared.on_receive_complete(ChannelId::Uart0);

            let waker = test_waker(WakeCounter::new());
            let mut cx = Context::from_waker(&waker);
            let mut fut = pin!(shared.receive_async(ChannelId::Uart0));
            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(Ok(0x7E)));
        });
    }

    #[test]
    fn receive_async_without_driver_fails() {
        let shared: SharedDualUart<'_, MockUart> = SharedDualUart::new();
        let waker = test_waker(WakeCounter::new());
        let mut cx = Context::from_waker(&waker);
        let mut fut = pin!(shared.receive_async(ChannelId::Uart0));
        assert_eq!(
            fut.as_mut().poll(&mut cx),
            Poll::Ready(Err(Error::Config(ConfigError::NotInitialized)))
        );
    }

    #[test]
    fn flush_async_completes_after_buffered_send() {
        with_shared(|shared| {
            shared.send_block(ChannelId::Uart0, &[1, 2]).unwrap();

            let counter = WakeCounter::new();
            let waker = test_waker(counter.clone());
            let mut cx = Context::from_waker(&waker);
            let mut fut = pin!(shared.flush_async(ChannelId::Uart0));

            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
            shared.on_transmit_complete(ChannelId::Uart0);
            assert_eq!(counter.count(), 1);
            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
            shared.on_transmit_complete(ChannelId::Uart0);
            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(Ok(())));
        });
    }

    #[test]
    fn write_async_waits_for_idle_channel() {
        with_shared(|shared| {
            shared.send_byte(ChannelId::Uart1, 0xEE).unwrap();

            let counter = WakeCounter::new();
            let waker = test_waker(counter.clone());
            let mut cx = Context::from_waker(&waker);
            let mut fut = pin!(shared.write_async(ChannelId::Uart1, b"go"));

            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
            shared.on_transmit_complete(ChannelId::Uart1);
            assert_eq!(counter.count(), 1);
            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(Ok(())));

            let written = shared
                .with_channel(ChannelId::Uart1, |ch| ch.hardware().written.clone())
                .unwrap();
            assert_eq!(written, vec![0xEE, b'g']);
        });
    }

    #[test]
    fn write_async_drains_bytes_queued_without_send() {
        with_shared(|shared| {
            shared
                .with_channel(ChannelId::Uart0, |ch| {
                    for b in 0..7 {
                        ch.enqueue_byte(b).unwrap();
                    }
                })
                .unwrap();

            let counter = WakeCounter::new();
            let waker = test_waker(counter.clone());
            let mut cx = Context::from_waker(&waker);
            let mut fut = pin!(shared.write_async(ChannelId::Uart0, b"go"));

            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
            assert_eq!(shared.is_transmit_pending(ChannelId::Uart0), Ok(true));

            for _ in 0..7 {
                shared.on_transmit_complete(ChannelId::Uart0);
            }
            assert_eq!(counter.count(), 1);
            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(Ok(())));

            let written = shared
                .with_channel(ChannelId::Uart0, |ch| ch.hardware().written.clone())
                .unwrap();
            assert_eq!(written, vec![0, 1, 2, 3, 4, 5, 6, b'g']);
        });
    }

    #[test]
    fn write_async_rejects_unsendable_blocks() {
        with_shared(|shared| {
            let waker = test_waker(WakeCounter::new());
            let mut cx = Context::from_waker(&waker);

            let mut empty = pin!(shared.write_async(ChannelId::Uart0, &[]));
            assert_eq!(
                empty.as_mut().poll(&mut cx),
                Poll::Ready(Err(Error::Io(IoError::EmptyBlock)))
            );

            let mut too_large = pin!(shared.write_async(ChannelId::Uart0, &[0; 8]));
            assert_eq!(
                too_large.as_mut().poll(&mut cx),
                Poll::Ready(Err(Error::Io(IoError::BlockTooLarge)))
            );
        });
    }
}
