//! Ecosystem Trait Integrations
//!
//! This module implements the embedded Rust serial traits for the driver:
//!
//! - **embedded-hal-nb** (`serial`): non-blocking `Read`/`Write` on
//!   [`Channel`](crate::driver::Channel)
//!   - Requires `embedded-hal-nb` feature
//!
//! - **embedded-io** (`io`): blocking `Read`/`Write` on [`SharedChannel`], a
//!   handle to one channel of a [`SharedDualUart`](crate::sync::SharedDualUart)
//!   - Requires `embedded-io` feature (enables `critical-section`)
//!
//! # Example
//!
//! ```ignore
//! // With embedded-hal-nb
//! use embedded_hal_nb::serial::Write;
//! nb::block!(uart.channel_mut(ChannelId::Uart0).write(b'!'))?;
//!
//! // With embedded-io
//! use embedded_io::Write;
//! UART.io(ChannelId::Uart1).write_all(b"ready\r\n")?;
//! ```

#[cfg(feature = "embedded-hal-nb")]
pub mod serial;

#[cfg(feature = "embedded-io")]
pub mod io;

#[cfg(feature = "embedded-io")]
pub use io::SharedChannel;
