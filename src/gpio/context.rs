// CLASSIFICATION: COMMUNITY
// Filename: context.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Per-gpio context carrying optional mapped accessors.

use super::access;
use super::register_map::MappingLease;
use crate::error::Result;

/// Mapped read/write entry points installed on a [`GpioContext`].
pub struct MappedGpio {
    gpio: u32,
    lease: MappingLease,
}

impl MappedGpio {
    pub(super) fn new(gpio: u32, lease: MappingLease) -> Self {
        Self { gpio, lease }
    }

    pub(super) fn into_lease(self) -> MappingLease {
        self.lease
    }

    pub fn write(&self, value: bool) -> Result<()> {
        self.lease
            .with_registers(|regs| access::write(regs, self.gpio, value))?
    }

    pub fn read(&self) -> Result<u8> {
        self.lease.with_registers(|regs| access::read(regs, self.gpio))?
    }
}

/// A SoC gpio opened by a caller.
pub struct GpioContext {
    gpio: u32,
    mapped: Option<MappedGpio>,
}

impl GpioContext {
    pub fn new(gpio: u32) -> Self {
        Self { gpio, mapped: None }
    }

    pub fn gpio(&self) -> u32 {
        self.gpio
    }

    /// Mapped accessors, present while the context is enabled.
    pub fn mapped(&self) -> Option<&MappedGpio> {
        self.mapped.as_ref()
    }

    pub(super) fn install(&mut self, mapped: MappedGpio) {
        self.mapped = Some(mapped);
    }

    pub(super) fn uninstall(&mut self) -> Option<MappedGpio> {
        self.mapped.take()
    }
}
