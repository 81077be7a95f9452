//! Dual UART Driver
//!
//! A `no_std`, `no_alloc` interrupt-driven driver for microcontrollers with two
//! independent hardware serial channels.
//!
//! Application code queues outgoing bytes and collects incoming ones through
//! per-channel ring buffers; the transmit-complete and receive-complete
//! interrupts move bytes between those buffers and the data registers. The
//! application never waits on the line except in the explicit busy-wait
//! [`Channel::send_byte`].
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): [`Channel`] facade, interrupt service
//!    routines and the two-channel [`DualUart`]
//! 2. **Buffer Layer** ([`buffer`]): [`RingBuffer`] and static storage
//! 3. **HAL Layer** ([`hal`]): the [`UartHardware`] trait, baud rate math and
//!    the memory-mapped [`MmioUsart`]
//!
//! # Contexts
//!
//! Each ring buffer has one producer and one consumer: the transmit buffer is
//! filled by call context and drained by the transmit interrupt, the receive
//! buffer the other way round. The channel flags are touched by both. With
//! the `critical-section` feature, [`sync::SharedDualUart`] puts every access
//! from either side inside a short critical section.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for error types and driver logging
//! - `critical-section`: Enable the ISR-safe `SharedDualUart` wrapper
//! - `async`: Enable async/await support with wakers
//! - `embedded-hal-nb`: Implement `embedded_hal_nb::serial` on [`Channel`]
//! - `embedded-io`: Implement blocking `embedded_io` traits on a shared
//!   channel handle
//!
//! # Example
//!
//! ```ignore
//! use ph_dual_uart::{Channel, ChannelId, DefaultBuffers, DualUart, MmioUsart, UartConfig};
//!
//! static mut BUFS0: DefaultBuffers = DefaultBuffers::new();
//! static mut BUFS1: DefaultBuffers = DefaultBuffers::new();
//!
//! let (rx0, tx0) = unsafe { (*core::ptr::addr_of_mut!(BUFS0)).rings() };
//! let (rx1, tx1) = unsafe { (*core::ptr::addr_of_mut!(BUFS1)).rings() };
//!
//! let mut uart = DualUart::new(
//!     Channel::new(unsafe { MmioUsart::usart0() }, rx0, tx0),
//!     Channel::new(unsafe { MmioUsart::usart1() }, rx1, tx1),
//! );
//! uart.init(UartConfig::default(), UartConfig::default().with_baud_rate(38_400))?;
//!
//! uart.channel_mut(ChannelId::Uart0).send_block(b"hello\r\n")?;
//!
//! // From the interrupt vectors
//! uart.on_transmit_complete(ChannelId::Uart0);
//! uart.on_receive_complete(ChannelId::Uart1);
//!
//! while let Some(byte) = uart.channel_mut(ChannelId::Uart1).receive_byte() {
//!     // ...
//! }
//! ```
//!
//! # Memory Requirements
//!
//! With default buffer sizes (128 byte receive, 16 byte transmit):
//! - 144 bytes of storage per channel, 288 bytes for both

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod buffer;
pub mod driver;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(any(feature = "embedded-hal-nb", feature = "embedded-io"))]
#[cfg_attr(
    docsrs,
    doc(cfg(any(feature = "embedded-hal-nb", feature = "embedded-io")))
)]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use buffer::{ChannelBuffers, DefaultBuffers, LargeBuffers, RingBuffer, SmallBuffers};
pub use driver::channel::{Channel, ChannelState, RxHandler};
pub use driver::config::{ChannelId, TxMode, UartConfig};
pub use driver::dual::DualUart;
pub use driver::error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use driver::interrupt::UartEvent;
pub use hal::{MmioUsart, UartHardware, actual_baud_rate, baud_divisor};

/// Low-level register accessors for advanced use.
///
/// These are intentionally separated from the primary facade. Most users should
/// prefer the safe driver APIs instead of touching registers directly.
///
/// # Safety
///
/// Direct register access bypasses driver invariants. Use only if you fully
/// understand the USART hardware and accept responsibility for correct
/// sequencing and synchronization.
pub mod unsafe_registers {
    pub use crate::internal::register::usart::{
        UCSRA_RXC, UCSRA_TXC, UCSRA_UDRE, UCSRB_INIT, UCSRB_RXCIE, UCSRB_RXEN, UCSRB_TXCIE,
        UCSRB_TXEN, UsartRegs,
    };
}

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedDualUart;

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use sync::asynch::{FlushFuture, ReceiveFuture, WriteFuture};

#[cfg(feature = "embedded-io")]
#[cfg_attr(docsrs, doc(cfg(feature = "embedded-io")))]
pub use integration::SharedChannel;

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Baud divisor
        BAUD_DIVISOR_MAX,
        BAUD_OVERSAMPLING,
        // Channels
        CHANNEL_COUNT,
        // Line defaults
        DEFAULT_BAUD_RATE,
        DEFAULT_CPU_FREQ_HZ,
        // Buffer sizes
        DEFAULT_RX_BUFFER_SIZE,
        DEFAULT_TX_BUFFER_SIZE,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static, ISR-safe dual UART.
///
/// Expands to an empty `SharedDualUart` static; install the driver at
/// startup. The hardware type defaults to [`MmioUsart`].
///
/// # Examples
///
/// ```ignore
/// ph_dual_uart::dual_uart_static!(UART);
///
/// UART.install(uart);
/// UART.with(|u| u.init(UartConfig::default(), UartConfig::default()))??;
/// ```
#[cfg(feature = "critical-section")]
#[macro_export]
macro_rules! dual_uart_static {
    ($name:ident) => {
        $crate::dual_uart_static!($name, $crate::hal::MmioUsart);
    };
    ($name:ident, $hw:ty) => {
        static $name: $crate::sync::SharedDualUart<'static, $hw> =
            $crate::sync::SharedDualUart::new();
    };
}
