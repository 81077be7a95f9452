//! Core driver components for the dual UART.
//!
//! - [`config`] - Channel selection, transmit mode and line configuration
//! - [`error`] - Error types and result aliases
//! - [`channel`] - The per-channel facade (call context)
//! - [`interrupt`] - Transmit and receive service routines (handler context)
//! - [`dual`] - The two-channel driver instance
//!
//! # Example
//!
//! ```ignore
//! use ph_dual_uart::driver::{ChannelId, DualUart, UartConfig};
//!
//! uart.init(UartConfig::default(), UartConfig::default())?;
//! uart.channel_mut(ChannelId::Uart0).send_block(b"hi")?;
//! ```

// Submodules
pub mod channel;
pub mod config;
pub mod dual;
pub mod error;
pub mod interrupt;

// Re-exports for convenience
pub use channel::{Channel, ChannelState, RxHandler};
pub use config::{ChannelId, TxMode, UartConfig};
pub use dual::DualUart;
pub use error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use interrupt::UartEvent;
