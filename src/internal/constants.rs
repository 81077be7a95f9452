//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers and
//! configuration defaults used throughout the UART driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Channels**: number of hardware serial lines
//! - **Buffer sizes**: default ring buffer capacities per direction
//! - **Line defaults**: baud rate and peripheral clock
//! - **Baud divisor**: limits of the divisor register
//!
//! # Note
//!
//! Register addresses and bit definitions remain in `internal::register`
//! as they are specific to the memory-mapped USART block.

// =============================================================================
// Channels
// =============================================================================

/// Number of independent hardware serial channels
pub const CHANNEL_COUNT: usize = 2;

// =============================================================================
// Default Buffer Sizes
// =============================================================================

/// Default receive buffer size for each channel (bytes)
pub const DEFAULT_RX_BUFFER_SIZE: usize = 0x0080;

/// Default transmit buffer size for each channel (bytes)
pub const DEFAULT_TX_BUFFER_SIZE: usize = 0x0010;

// =============================================================================
// Line Defaults
// =============================================================================

/// Default baud rate applied at channel initialization
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default peripheral clock frequency in Hz (16 MHz crystal)
pub const DEFAULT_CPU_FREQ_HZ: u32 = 16_000_000;

// =============================================================================
// Baud Divisor
// =============================================================================

/// Oversampling factor of the asynchronous normal-speed mode
pub const BAUD_OVERSAMPLING: u64 = 16;

/// Largest value the 12-bit UBRR divisor register accepts
pub const BAUD_DIVISOR_MAX: u16 = 0x0FFF;
