//! Hardware Abstraction Layer
//!
//! This module separates the driver core from the peripheral it runs on.
//!
//! # Modules
//!
//! - [`uart`]: The [`UartHardware`] capability trait and the memory-mapped
//!   [`MmioUsart`] implementation
//! - [`baud`]: Baud rate divisor computation
//!
//! Board or HAL crates with their own register access implement
//! [`UartHardware`] directly.

pub mod baud;
pub mod uart;

// Re-export commonly used types
pub use baud::{actual_baud_rate, baud_divisor};
pub use uart::{MmioUsart, UartHardware};
