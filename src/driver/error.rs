//! Error types for the dual UART driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Channel selection and initialization failures
//! - [`IoError`]: Runtime transmit failures
//!
//! The unified [`Error`] enum wraps both domain errors. Receive overflow is
//! deliberately not an error: it is counted per channel and never interrupts
//! the data stream.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Channel index outside the supported set (0 or 1)
    InvalidChannel,
    /// Baud rate is zero or needs a divisor the hardware cannot hold
    InvalidBaudRate,
    /// No driver installed in the shared wrapper yet
    NotInitialized,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidChannel => "invalid channel",
            ConfigError::InvalidBaudRate => "invalid baud rate",
            ConfigError::NotInitialized => "driver not initialized",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime transmit errors
///
/// A failed operation never leaves a partial write behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Not enough headroom in the transmit buffer for the whole block
    TxBufferFull,
    /// Zero-length block
    EmptyBlock,
    /// Buffered send started with nothing queued
    TxBufferEmpty,
    /// Block can never fit the transmit buffer, however long one waits
    BlockTooLarge,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::TxBufferFull => "transmit buffer full",
            IoError::EmptyBlock => "empty block",
            IoError::TxBufferEmpty => "transmit buffer empty",
            IoError::BlockTooLarge => "block larger than transmit buffer",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::InvalidChannel)) => { /* ... */ }
///     Err(Error::Io(IoError::TxBufferFull)) => { /* retry later */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn config_error_as_str_non_empty() {
        let variants = [
            ConfigError::InvalidChannel,
            ConfigError::InvalidBaudRate,
            ConfigError::NotInitialized,
        ];

        for variant in variants {
            let s = variant.as_str();
            assert!(!s.is_empty(), "ConfigError::{variant:?} has empty string");
        }
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidChannel;
        assert_eq!(format!("{err}"), "invalid channel");
    }

    #[test]
    fn io_error_as_str_non_empty() {
        let variants = [
            IoError::TxBufferFull,
            IoError::EmptyBlock,
            IoError::TxBufferEmpty,
            IoError::BlockTooLarge,
        ];

        for variant in variants {
            let s = variant.as_str();
            assert!(!s.is_empty(), "IoError::{variant:?} has empty string");
        }
    }

    #[test]
    fn io_error_display() {
        let err = IoError::TxBufferFull;
        assert_eq!(format!("{err}"), "transmit buffer full");
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::InvalidBaudRate.into();
        assert_eq!(err, Error::Config(ConfigError::InvalidBaudRate));
    }

    #[test]
    fn error_from_io_error() {
        let err: Error = IoError::EmptyBlock.into();
        assert_eq!(err, Error::Io(IoError::EmptyBlock));
    }

    #[test]
    fn error_display_prefixes_domain() {
        let err = Error::Config(ConfigError::InvalidChannel);
        let display = format!("{err}");
        assert!(display.contains("config"));
        assert!(display.contains("channel"));

        let err = Error::Io(IoError::TxBufferFull);
        let display = format!("{err}");
        assert!(display.contains("io"));
        assert!(display.contains("full"));
    }

    #[test]
    fn question_mark_converts_domain_errors() {
        fn select() -> Result<u8> {
            Err(ConfigError::InvalidChannel)?
        }

        assert_eq!(select(), Err(Error::Config(ConfigError::InvalidChannel)));
    }
}
