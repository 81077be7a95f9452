//! Synchronization and Concurrency Support
//!
//! This module provides synchronization primitives and an ISR-safe wrapper
//! for the dual UART driver. It includes:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!   - [`AtomicWaker`] - Async waker storage for interrupts
//!
//! - **Shared Wrapper** (`shared`): [`SharedDualUart`], the critical-section
//!   protected driver both interrupt vectors and application code go through
//!
//! - **Async Support** (`asynch`): futures woken from the interrupt entry
//!   points ([`ReceiveFuture`], [`FlushFuture`], [`WriteFuture`])
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables `primitives` and `shared` modules
//! - `async`: Enables `asynch` module (also requires `critical-section`)
//!
//! # Example
//!
//! ```ignore
//! use ph_dual_uart::sync::SharedDualUart;
//!
//! static UART: SharedDualUart<'static, MmioUsart> = SharedDualUart::new();
//!
//! #[interrupt]
//! fn USART1_RX() {
//!     UART.on_receive_complete(ChannelId::Uart1);
//! }
//!
//! async fn echo() -> Result<()> {
//!     loop {
//!         let byte = UART.receive_async(ChannelId::Uart1).await?;
//!         UART.write_async(ChannelId::Uart1, &[byte]).await?;
//!     }
//! }
//! ```

mod primitives;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedDualUart;

#[cfg(feature = "async")]
pub mod asynch;

#[cfg(feature = "async")]
pub use asynch::{ChannelWakers, FlushFuture, ReceiveFuture, WriteFuture};
