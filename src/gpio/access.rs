// CLASSIFICATION: COMMUNITY
// Filename: access.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! GPIO register layout shared by AR9331 and QCA955x.
//!
//! Outputs are driven through the write-one SET/CLEAR registers, so a write
//! is a single store and never a read-modify-write.

use log::error;

use super::regs::RegisterBlock;
use crate::error::{BoardError, Result};

/// Output enable.
pub const GPIO_OE: usize = 0x00;
/// Input level.
pub const GPIO_IN: usize = 0x04;
/// Output latch.
pub const GPIO_OUT: usize = 0x08;
/// Write-one-to-set.
pub const GPIO_SET: usize = 0x0c;
/// Write-one-to-clear.
pub const GPIO_CLEAR: usize = 0x10;
/// First output function select register (four gpios per word).
pub const GPIO_OUT_FUNC: usize = 0x2c;
/// First input function select register.
pub const GPIO_IN_FUNC: usize = 0x44;

/// Gpios per SoC; both AR9331 and QCA955x fit one bank.
pub const GPIO_MAX: u32 = 32;

#[inline]
fn bank(pin: u32) -> usize {
    (pin / 32) as usize * 4
}

#[inline]
fn mask(pin: u32) -> u32 {
    1 << (pin % 32)
}

/// Offset of `reg` for `pin`, rejecting gpios past the SoC or the window.
fn banked(regs: &dyn RegisterBlock, reg: usize, pin: u32) -> Result<usize> {
    let offset = reg + bank(pin);
    if pin >= GPIO_MAX || offset + 4 > regs.len() {
        error!("gpio {pin}: register {offset:#x} outside window {:#x}", regs.len());
        return Err(BoardError::InvalidParameter(format!(
            "gpio {pin} out of range"
        )));
    }
    Ok(offset)
}

/// Drive `pin` high or low.
pub fn write(regs: &dyn RegisterBlock, pin: u32, value: bool) -> Result<()> {
    let reg = if value { GPIO_SET } else { GPIO_CLEAR };
    regs.write32(banked(regs, reg, pin)?, mask(pin));
    Ok(())
}

/// Sample `pin`; returns 1 when the input bit is set, else 0.
pub fn read(regs: &dyn RegisterBlock, pin: u32) -> Result<u8> {
    let offset = banked(regs, GPIO_IN, pin)?;
    Ok(u8::from(regs.read32(offset) & mask(pin) != 0))
}

/// Test the output-enable bit of `gpio`.
pub fn output_enabled(regs: &dyn RegisterBlock, gpio: u32) -> bool {
    regs.read32(GPIO_OE) & mask(gpio) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::memory::MemoryRegion;

    #[test]
    fn write_hits_set_and_clear_registers() {
        let regs = MemoryRegion::new(0x70);
        write(&regs, 5, true).unwrap();
        assert_eq!(regs.read32(GPIO_SET), 1 << 5);
        write(&regs, 7, false).unwrap();
        assert_eq!(regs.read32(GPIO_CLEAR), 1 << 7);
    }

    #[test]
    fn read_reflects_input_bit() {
        let regs = MemoryRegion::new(0x70);
        regs.write32(GPIO_IN, 1 << 12);
        assert_eq!(read(&regs, 12).unwrap(), 1);
        assert_eq!(read(&regs, 11).unwrap(), 0);
    }

    #[test]
    fn set_clear_round_trip() {
        let regs = MemoryRegion::with_set_clear(0x70);
        write(&regs, 20, true).unwrap();
        assert_eq!(read(&regs, 20).unwrap(), 1);
        write(&regs, 20, false).unwrap();
        assert_eq!(read(&regs, 20).unwrap(), 0);
    }

    #[test]
    fn gpio_past_bank_rejected_without_store() {
        let regs = MemoryRegion::with_set_clear(0x30);
        write(&regs, 0, true).unwrap();
        let err = write(&regs, 32, true).unwrap_err();
        assert!(matches!(err, BoardError::InvalidParameter(_)));
        assert_eq!(read(&regs, 0).unwrap(), 1);
        assert!(matches!(read(&regs, 400), Err(BoardError::InvalidParameter(_))));
    }

    #[test]
    fn offset_past_window_rejected() {
        let regs = MemoryRegion::new(0x08);
        assert!(matches!(write(&regs, 3, true), Err(BoardError::InvalidParameter(_))));
        assert_eq!(read(&regs, 3).unwrap(), 0);
    }
}
