// CLASSIFICATION: COMMUNITY
// Filename: descriptor.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Finished board description handed back to callers.

use std::sync::Arc;

use log::error;

use super::bus::BusInventory;
use super::pins::{Capabilities, PinInfo};
use crate::error::{BoardError, Result};
use crate::gpio::{GpioBackend, GpioContext, RegisterMapHandle};

pub struct BoardDescriptor {
    pub platform_name: String,
    /// Indexed by physical pin number.
    pub pins: Vec<PinInfo>,
    pub gpio_count: usize,
    pub buses: BusInventory,
    backend: Arc<dyn GpioBackend>,
    map: RegisterMapHandle,
}

impl BoardDescriptor {
    pub(super) fn new(
        platform_name: &str,
        pins: Vec<PinInfo>,
        gpio_count: usize,
        buses: BusInventory,
        backend: Arc<dyn GpioBackend>,
        map: RegisterMapHandle,
    ) -> Self {
        Self {
            platform_name: platform_name.to_string(),
            pins,
            gpio_count,
            buses,
            backend,
            map,
        }
    }

    pub fn phy_pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Backend used for gpio reads and writes on this board.
    pub fn backend(&self) -> Arc<dyn GpioBackend> {
        Arc::clone(&self.backend)
    }

    /// Open the gpio wired to physical `pin`.
    pub fn gpio_context(&self, pin: usize) -> Result<GpioContext> {
        let info = self
            .pins
            .get(pin)
            .ok_or_else(|| BoardError::InvalidParameter(format!("no physical pin {pin}")))?;
        if !info.caps.contains(Capabilities::GPIO) {
            error!("{}: pin {pin} ({}) is not a gpio", self.platform_name, info.name);
            return Err(BoardError::InvalidParameter(format!(
                "pin {pin} ({}) has no gpio capability",
                info.name
            )));
        }
        Ok(GpioContext::new(info.gpio))
    }

    /// Enable or disable mapped access on `ctx`.
    pub fn mmap_setup(&self, ctx: &mut GpioContext, enable: bool) -> Result<()> {
        self.map.setup(ctx, enable)
    }
}
