//! Memory-mapped register definitions for the USART peripherals
//!
//! This module provides volatile 8-bit register access and the register
//! block layout of the two USART channels.
//! All register access is volatile to ensure proper hardware interaction.

pub mod usart;

/// Read an 8-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is a valid, mapped register.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u8 {
    unsafe { core::ptr::read_volatile(addr as *const u8) }
}

/// Write an 8-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is a valid, mapped register.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u8) {
    unsafe { core::ptr::write_volatile(addr as *mut u8, value) }
}

/// Modify a register using a read-modify-write operation
///
/// # Safety
/// The caller must ensure the address is a valid, mapped register.
#[inline(always)]
pub unsafe fn modify_reg<F>(addr: usize, f: F)
where
    F: FnOnce(u8) -> u8,
{
    // SAFETY: caller guarantees address validity
    let value = unsafe { read_reg(addr) };
    unsafe { write_reg(addr, f(value)) }
}

/// Set bits in a register (read-modify-write)
///
/// # Safety
/// The caller must ensure the address is a valid, mapped register.
#[inline(always)]
pub unsafe fn set_bits(addr: usize, bits: u8) {
    // SAFETY: caller guarantees address validity
    unsafe { modify_reg(addr, |v| v | bits) }
}
