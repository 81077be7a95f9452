//! Baud rate divisor computation.

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{BAUD_DIVISOR_MAX, BAUD_OVERSAMPLING};

/// Compute the UBRR divisor for `baud_rate` at `cpu_freq_hz`.
///
/// Uses normal-speed asynchronous mode (16x oversampling) and rounds to the
/// nearest divisor: `(f + 8 * baud) / (16 * baud) - 1`.
///
/// # Errors
///
/// [`ConfigError::InvalidBaudRate`] for a zero rate, a rate too fast for the
/// clock, or a divisor that does not fit the 12-bit register.
pub fn baud_divisor(cpu_freq_hz: u32, baud_rate: u32) -> ConfigResult<u16> {
    if baud_rate == 0 {
        return Err(ConfigError::InvalidBaudRate);
    }

    let baud = u64::from(baud_rate);
    let rounded = (u64::from(cpu_freq_hz) + baud * (BAUD_OVERSAMPLING / 2)) / (baud * BAUD_OVERSAMPLING);
    let divisor = rounded.checked_sub(1).ok_or(ConfigError::InvalidBaudRate)?;

    if divisor > u64::from(BAUD_DIVISOR_MAX) {
        return Err(ConfigError::InvalidBaudRate);
    }
    Ok(divisor as u16)
}

/// Actual line rate produced by `divisor` at `cpu_freq_hz`.
pub fn actual_baud_rate(cpu_freq_hz: u32, divisor: u16) -> u32 {
    (u64::from(cpu_freq_hz) / (BAUD_OVERSAMPLING * (u64::from(divisor) + 1))) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_16mhz_divisors() {
        assert_eq!(baud_divisor(16_000_000, 9600), Ok(103));
        assert_eq!(baud_divisor(16_000_000, 19_200), Ok(51));
        assert_eq!(baud_divisor(16_000_000, 38_400), Ok(25));
        assert_eq!(baud_divisor(16_000_000, 115_200), Ok(8));
    }

    #[test]
    fn rounding_picks_nearest() {
        // 7.3728 MHz is an exact crystal for 115200 baud
        assert_eq!(baud_divisor(7_372_800, 115_200), Ok(3));
        assert_eq!(baud_divisor(7_372_800, 9600), Ok(47));
    }

    #[test]
    fn zero_rate_rejected() {
        assert_eq!(baud_divisor(16_000_000, 0), Err(ConfigError::InvalidBaudRate));
    }

    #[test]
    fn rate_above_clock_rejected() {
        assert_eq!(
            baud_divisor(1_000_000, 1_000_000),
            Err(ConfigError::InvalidBaudRate)
        );
    }

    #[test]
    fn divisor_overflow_rejected() {
        // 16 MHz / (16 * 100) - 1 = 9999 > 4095
        assert_eq!(baud_divisor(16_000_000, 100), Err(ConfigError::InvalidBaudRate));
    }

    #[test]
    fn actual_rate_close_to_requested() {
        let divisor = baud_divisor(16_000_000, 9600).unwrap();
        let actual = actual_baud_rate(16_000_000, divisor);
        assert_eq!(actual, 9615);
    }
}
