//! Configuration types for the dual UART driver

use super::error::ConfigError;
use crate::internal::constants::{CHANNEL_COUNT, DEFAULT_BAUD_RATE, DEFAULT_CPU_FREQ_HZ};

/// One of the two hardware serial channels
///
/// Raw indices are validated once, here; everything past this boundary takes
/// a `ChannelId` and cannot name a channel that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ChannelId {
    /// First channel (USART0)
    Uart0 = 0,
    /// Second channel (USART1)
    Uart1 = 1,
}

impl ChannelId {
    /// Both channels, in index order
    pub const ALL: [ChannelId; CHANNEL_COUNT] = [ChannelId::Uart0, ChannelId::Uart1];

    /// Validate a raw channel index
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidChannel`] for any index other than 0 or 1.
    pub const fn new(index: u8) -> Result<Self, ConfigError> {
        match index {
            0 => Ok(ChannelId::Uart0),
            1 => Ok(ChannelId::Uart1),
            _ => Err(ConfigError::InvalidChannel),
        }
    }

    /// Array index of this channel
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for ChannelId {
    type Error = ConfigError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<ChannelId> for u8 {
    fn from(id: ChannelId) -> Self {
        id as u8
    }
}

/// Transmit engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxMode {
    /// Caller-driven, one byte at a time; the transmit buffer is bypassed
    #[default]
    SingleByte,
    /// Transmit-complete events feed bytes from the transmit buffer
    Buffered,
}

/// Line configuration for one channel
///
/// # Example
///
/// ```ignore
/// let config = UartConfig::new()
///     .with_cpu_freq_hz(7_372_800)
///     .with_baud_rate(115_200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Line rate in bits per second
    pub baud_rate: u32,
    /// Peripheral clock feeding the baud rate generator, in Hz
    pub cpu_freq_hz: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl UartConfig {
    /// Default configuration: 9600 baud from a 16 MHz clock
    #[must_use]
    pub const fn new() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            cpu_freq_hz: DEFAULT_CPU_FREQ_HZ,
        }
    }

    /// Set the line rate
    #[must_use]
    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the peripheral clock frequency
    #[must_use]
    pub const fn with_cpu_freq_hz(mut self, cpu_freq_hz: u32) -> Self {
        self.cpu_freq_hz = cpu_freq_hz;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
