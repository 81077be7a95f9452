//! USART register block layout (ATmega128 family)
//!
//! Each channel has five byte-wide registers. The addresses are data-space
//! addresses, i.e. I/O addresses plus 0x20 for the low I/O range.

// =============================================================================
// Register Addresses
// =============================================================================

/// USART0 data register
pub const UDR0: usize = 0x2C;
/// USART0 control and status register A
pub const UCSR0A: usize = 0x2B;
/// USART0 control and status register B
pub const UCSR0B: usize = 0x2A;
/// USART0 baud rate register, low byte
pub const UBRR0L: usize = 0x29;
/// USART0 baud rate register, high nibble
pub const UBRR0H: usize = 0x90;

/// USART1 data register
pub const UDR1: usize = 0x9C;
/// USART1 control and status register A
pub const UCSR1A: usize = 0x9B;
/// USART1 control and status register B
pub const UCSR1B: usize = 0x9A;
/// USART1 baud rate register, low byte
pub const UBRR1L: usize = 0x99;
/// USART1 baud rate register, high nibble
pub const UBRR1H: usize = 0x98;

// =============================================================================
// UCSRnA Bits
// =============================================================================

/// Receive complete
pub const UCSRA_RXC: u8 = 1 << 7;
/// Transmit complete
pub const UCSRA_TXC: u8 = 1 << 6;
/// Data register empty
pub const UCSRA_UDRE: u8 = 1 << 5;

// =============================================================================
// UCSRnB Bits
// =============================================================================

/// RX complete interrupt enable
pub const UCSRB_RXCIE: u8 = 1 << 7;
/// TX complete interrupt enable
pub const UCSRB_TXCIE: u8 = 1 << 6;
/// Receiver enable
pub const UCSRB_RXEN: u8 = 1 << 4;
/// Transmitter enable
pub const UCSRB_TXEN: u8 = 1 << 3;

/// Bits written to UCSRnB at channel initialization
pub const UCSRB_INIT: u8 = UCSRB_RXCIE | UCSRB_TXCIE | UCSRB_RXEN | UCSRB_TXEN;

// =============================================================================
// Register Block
// =============================================================================

/// Addresses of one USART register block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsartRegs {
    /// Data register (read: receive buffer, write: transmit buffer)
    pub udr: usize,
    /// Control and status register A
    pub ucsra: usize,
    /// Control and status register B
    pub ucsrb: usize,
    /// Baud rate register, low byte
    pub ubrrl: usize,
    /// Baud rate register, high nibble
    pub ubrrh: usize,
}

impl UsartRegs {
    /// USART0 register block
    pub const USART0: Self = Self {
        udr: UDR0,
        ucsra: UCSR0A,
        ucsrb: UCSR0B,
        ubrrl: UBRR0L,
        ubrrh: UBRR0H,
    };

    /// USART1 register block
    pub const USART1: Self = Self {
        udr: UDR1,
        ucsra: UCSR1A,
        ucsrb: UCSR1B,
        ubrrl: UBRR1L,
        ubrrh: UBRR1H,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_bits_enable_both_directions_and_interrupts() {
        assert_eq!(UCSRB_INIT, 0b1101_1000);
    }

    #[test]
    fn channel_blocks_do_not_overlap() {
        let a = UsartRegs::USART0;
        let b = UsartRegs::USART1;
        for x in [a.udr, a.ucsra, a.ucsrb, a.ubrrl, a.ubrrh] {
            for y in [b.udr, b.ucsra, b.ucsrb, b.ubrrl, b.ubrrh] {
                assert_ne!(x, y);
            }
        }
    }
}
