// CLASSIFICATION: COMMUNITY
// Filename: backend.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Gpio backends installed on a board descriptor.

use std::fs;
use std::path::PathBuf;

use log::{debug, error};

use super::access;
use super::register_map::MappingLease;
use crate::error::{BoardError, Result};

/// Which path a backend uses to reach the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    MemoryMapped,
    SysfsFallback,
}

/// Read/write access to SoC gpios by raw gpio number.
pub trait GpioBackend: Send + Sync {
    fn kind(&self) -> BackendKind;
    fn write(&self, gpio: u32, value: bool) -> Result<()>;
    /// Returns 1 for a high level, 0 for low.
    fn read(&self, gpio: u32) -> Result<u8>;
}

/// Direct register access through a held mapping.
pub struct MemoryMappedBackend {
    lease: MappingLease,
}

impl MemoryMappedBackend {
    pub fn new(lease: MappingLease) -> Self {
        Self { lease }
    }
}

impl GpioBackend for MemoryMappedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::MemoryMapped
    }

    fn write(&self, gpio: u32, value: bool) -> Result<()> {
        self.lease
            .with_registers(|regs| access::write(regs, gpio, value))?
    }

    fn read(&self, gpio: u32) -> Result<u8> {
        self.lease.with_registers(|regs| access::read(regs, gpio))?
    }
}

/// Kernel sysfs gpio class, for exported gpios.
pub struct SysfsBackend {
    root: PathBuf,
}

impl SysfsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn value_path(&self, gpio: u32) -> PathBuf {
        self.root.join(format!("gpio{gpio}")).join("value")
    }
}

impl GpioBackend for SysfsBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::SysfsFallback
    }

    fn write(&self, gpio: u32, value: bool) -> Result<()> {
        let path = self.value_path(gpio);
        debug!("sysfs write {} <- {}", path.display(), u8::from(value));
        fs::write(&path, if value { "1" } else { "0" }).map_err(|e| {
            error!("sysfs gpio {gpio}: write failed: {e}");
            BoardError::Io(e)
        })
    }

    fn read(&self, gpio: u32) -> Result<u8> {
        let path = self.value_path(gpio);
        let text = fs::read_to_string(&path).map_err(|e| {
            error!("sysfs gpio {gpio}: read failed: {e}");
            BoardError::Io(e)
        })?;
        match text.trim() {
            "0" => Ok(0),
            "1" => Ok(1),
            other => Err(BoardError::InvalidResource(format!(
                "unexpected value {other:?} in {}",
                path.display()
            ))),
        }
    }
}
