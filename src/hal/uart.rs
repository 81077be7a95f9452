//! Hardware capability trait for one serial channel.
//!
//! The driver core never touches registers itself. Everything it needs from
//! the peripheral goes through [`UartHardware`], which keeps the transmit
//! and receive engines portable and lets host tests run against a mock.

use crate::internal::register::usart::{UCSRA_UDRE, UCSRB_INIT, UsartRegs};
use crate::internal::register::{read_reg, set_bits, write_reg};

/// Primitive operations on one UART peripheral
pub trait UartHardware {
    /// Check if the transmit data register can accept a byte
    fn is_tx_empty(&self) -> bool;

    /// Write a byte to the transmit data register
    ///
    /// Must not block; callers check [`is_tx_empty`](Self::is_tx_empty)
    /// first or know from the transmit-complete event that it is free.
    fn write_data(&mut self, byte: u8);

    /// Read the byte from the receive data register
    ///
    /// Reading also acknowledges the receive-complete condition.
    fn read_data(&mut self) -> u8;

    /// Enable the receiver, the transmitter and both completion interrupts
    fn enable_interrupts(&mut self);

    /// Program the baud rate divisor register
    fn set_baud_divisor(&mut self, divisor: u16);
}

// =============================================================================
// Memory-Mapped USART
// =============================================================================

/// [`UartHardware`] backed by a memory-mapped USART register block.
#[derive(Debug)]
pub struct MmioUsart {
    regs: UsartRegs,
}

impl MmioUsart {
    /// Wrap a USART register block.
    ///
    /// # Safety
    ///
    /// `regs` must describe a real, mapped USART register block, and the
    /// returned value must be the only handle driving it.
    pub const unsafe fn new(regs: UsartRegs) -> Self {
        Self { regs }
    }

    /// Handle for USART0.
    ///
    /// # Safety
    ///
    /// See [`MmioUsart::new`].
    pub const unsafe fn usart0() -> Self {
        // SAFETY: forwarded to the caller
        unsafe { Self::new(UsartRegs::USART0) }
    }

    /// Handle for USART1.
    ///
    /// # Safety
    ///
    /// See [`MmioUsart::new`].
    pub const unsafe fn usart1() -> Self {
        // SAFETY: forwarded to the caller
        unsafe { Self::new(UsartRegs::USART1) }
    }

    /// Register block this handle drives
    pub const fn regs(&self) -> &UsartRegs {
        &self.regs
    }
}

impl UartHardware for MmioUsart {
    #[inline(always)]
    fn is_tx_empty(&self) -> bool {
        // SAFETY: register block validity is guaranteed at construction
        unsafe { read_reg(self.regs.ucsra) & UCSRA_UDRE != 0 }
    }

    #[inline(always)]
    fn write_data(&mut self, byte: u8) {
        // SAFETY: register block validity is guaranteed at construction
        unsafe { write_reg(self.regs.udr, byte) }
    }

    #[inline(always)]
    fn read_data(&mut self) -> u8 {
        // SAFETY: register block validity is guaranteed at construction
        unsafe { read_reg(self.regs.udr) }
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: register block validity is guaranteed at construction
        unsafe { set_bits(self.regs.ucsrb, UCSRB_INIT) }
    }

    fn set_baud_divisor(&mut self, divisor: u16) {
        let [high, low] = divisor.to_be_bytes();
        // High byte first: writing the low byte latches the divisor
        // SAFETY: register block validity is guaranteed at construction
        unsafe {
            write_reg(self.regs.ubrrh, high);
            write_reg(self.regs.ubrrl, low);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::register::usart::UCSRB_RXCIE;

    /// Fake register file laid out as [udr, ucsra, ucsrb, ubrrl, ubrrh].
    fn fake_usart(file: &mut [u8; 5]) -> MmioUsart {
        let base = file.as_mut_ptr() as usize;
        let regs = UsartRegs {
            udr: base,
            ucsra: base + 1,
            ucsrb: base + 2,
            ubrrl: base + 3,
            ubrrh: base + 4,
        };
        // SAFETY: the register file outlives every use in these tests
        unsafe { MmioUsart::new(regs) }
    }

    #[test]
    fn tx_empty_follows_udre_bit() {
        let mut file = [0u8; 5];
        let usart = fake_usart(&mut file);
        assert!(!usart.is_tx_empty());
        // SAFETY: address points into `file`
        unsafe { write_reg(usart.regs().ucsra, UCSRA_UDRE) };
        assert!(usart.is_tx_empty());
    }

    #[test]
    fn data_register_round_trip() {
        let mut file = [0u8; 5];
        let mut usart = fake_usart(&mut file);
        usart.write_data(0x5A);
        assert_eq!(usart.read_data(), 0x5A);
    }

    #[test]
    fn enable_interrupts_preserves_other_bits() {
        let mut file = [0u8; 5];
        let mut usart = fake_usart(&mut file);
        // SAFETY: address points into `file`
        unsafe { write_reg(usart.regs().ucsrb, 0b0000_0100) };
        usart.enable_interrupts();
        // SAFETY: address points into `file`
        let value = unsafe { read_reg(usart.regs().ucsrb) };
        assert_eq!(value, UCSRB_INIT | 0b0000_0100);
        assert_ne!(value & UCSRB_RXCIE, 0);
    }

    #[test]
    fn baud_divisor_split_across_registers() {
        let mut file = [0u8; 5];
        let mut usart = fake_usart(&mut file);
        usart.set_baud_divisor(0x0A67);
        // SAFETY: addresses point into `file`
        let (low, high) = unsafe { (read_reg(usart.regs().ubrrl), read_reg(usart.regs().ubrrh)) };
        assert_eq!(low, 0x67);
        assert_eq!(high, 0x0A);
    }
}
