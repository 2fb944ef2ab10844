// CLASSIFICATION: COMMUNITY
// Filename: builder.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Board capability builder.
//!
//! Runs the static table through each overlay in a fixed order:
//! static table, busy gpios, function groups, then the signal mux. A later
//! pass may overwrite what an earlier one found.

use std::sync::Arc;

use log::{debug, error, info, warn};

use super::busy::{self, BusyGpioEntry, BusyMode};
use super::bus::BusInventory;
use super::descriptor::BoardDescriptor;
use super::pins::{Capabilities, PinInfo};
use super::BoardDefinition;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::gpio::regs::RegisterBlock;
use crate::gpio::{GpioBackend, MappingLease, MemoryMappedBackend, RegisterMapHandle, SysfsBackend};
use crate::mux::resolver::{resolve_by_function_group, resolve_signal_mux};
use crate::mux::SocMux;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Uninitialized,
    PinsLoaded,
    BusyOverlayApplied,
    FunctionOverlayApplied,
    Finalized,
    Failed,
}

impl BuildState {
    fn name(self) -> &'static str {
        match self {
            BuildState::Uninitialized => "Uninitialized",
            BuildState::PinsLoaded => "PinsLoaded",
            BuildState::BusyOverlayApplied => "BusyOverlayApplied",
            BuildState::FunctionOverlayApplied => "FunctionOverlayApplied",
            BuildState::Finalized => "Finalized",
            BuildState::Failed => "Failed",
        }
    }
}

/// Mark the pins the kernel reports as claimed by a bus driver.
///
/// Entries without a matching gpio-capable pin are skipped.
pub fn apply_busy_entries(pins: &mut [PinInfo], entries: &[BusyGpioEntry]) {
    for entry in entries {
        let Ok(index) = busy::lookup_pin_for_gpio(pins, entry.gpio) else {
            continue;
        };
        let bus = match entry.mode {
            BusyMode::I2c => Capabilities::I2C,
            BusyMode::Spi => Capabilities::SPI,
            BusyMode::Uart => Capabilities::UART,
            BusyMode::Gpio | BusyMode::Unclaimed => continue,
        };
        let pin = &mut pins[index];
        pin.caps.remove(Capabilities::GPIO);
        pin.caps.insert(bus);
        debug!("pin {index} ({}) claimed by kernel as {:?}", pin.name, entry.mode);
    }
}

/// Resolve one pin against the mux registers.
pub fn resolve_pin(
    regs: &dyn RegisterBlock,
    gpio: u32,
    caps: Capabilities,
    mux: &SocMux,
    use_signal_mux: bool,
) -> Capabilities {
    let mut caps = caps;
    if caps.contains(Capabilities::GPIO) {
        caps = resolve_by_function_group(regs, gpio, caps, mux);
    }
    if caps.contains(Capabilities::GPIO) && use_signal_mux {
        caps = resolve_signal_mux(regs, gpio, caps, mux);
    }
    caps
}

/// Builds one [`BoardDescriptor`].
pub struct BoardBuilder<'a> {
    definition: &'a BoardDefinition,
    config: &'a BoardConfig,
    map: RegisterMapHandle,
    state: BuildState,
    pins: Vec<PinInfo>,
    lease: Option<MappingLease>,
}

impl<'a> BoardBuilder<'a> {
    pub fn new(
        definition: &'a BoardDefinition,
        config: &'a BoardConfig,
        map: RegisterMapHandle,
    ) -> Self {
        Self {
            definition,
            config,
            map,
            state: BuildState::Uninitialized,
            pins: Vec::new(),
            lease: None,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn pins(&self) -> &[PinInfo] {
        &self.pins
    }

    fn expect(&self, step: &'static str, state: BuildState) -> Result<()> {
        if self.state == state {
            return Ok(());
        }
        Err(BoardError::InvalidState {
            step,
            state: self.state.name(),
        })
    }

    /// Copy the static pin table in.
    pub fn load_pins(&mut self) -> Result<()> {
        self.expect("load_pins", BuildState::Uninitialized)?;
        if self.definition.pins.is_empty() {
            error!("{}: empty pin table", self.definition.name);
            self.state = BuildState::Failed;
            return Err(BoardError::InvalidHandle("empty pin table"));
        }
        self.pins = self.definition.pins.iter().map(PinInfo::from).collect();
        self.state = BuildState::PinsLoaded;
        Ok(())
    }

    /// Overlay the kernel's busy gpio list. A missing listing is not fatal.
    pub fn apply_busy_overlay(&mut self) -> Result<()> {
        self.expect("apply_busy_overlay", BuildState::PinsLoaded)?;
        match busy::detect(&self.config.gpio_debug_path, self.pins.len()) {
            Ok(entries) => apply_busy_entries(&mut self.pins, &entries),
            Err(e) => warn!(
                "Can't detect busy GPIOs (check {}): {e}",
                self.config.gpio_debug_path.display()
            ),
        }
        self.state = BuildState::BusyOverlayApplied;
        Ok(())
    }

    /// Resolve gpio pins against the mux registers when the window maps.
    pub fn apply_function_overlay(&mut self) -> Result<()> {
        self.expect("apply_function_overlay", BuildState::BusyOverlayApplied)?;
        match self.map.acquire() {
            Ok(lease) => {
                let mux = self.definition.mux;
                let signal_mux = self.definition.use_signal_mux;
                let pins = &mut self.pins;
                lease.with_registers(|regs| {
                    for pin in pins.iter_mut() {
                        pin.caps = resolve_pin(regs, pin.gpio, pin.caps, mux, signal_mux);
                    }
                })?;
                self.lease = Some(lease);
            }
            Err(e) => error!(
                "{}: gpio capabilities unavailable, due to failed mmap: {e}",
                self.definition.name
            ),
        }
        self.state = BuildState::FunctionOverlayApplied;
        Ok(())
    }

    /// Tally gpios, probe buses and install the gpio backend.
    pub fn finalize(mut self) -> Result<BoardDescriptor> {
        self.expect("finalize", BuildState::FunctionOverlayApplied)?;
        let gpio_count = self
            .pins
            .iter()
            .filter(|p| p.caps.contains(Capabilities::GPIO))
            .count();
        let buses = BusInventory::probe(&self.config.dev_root);
        let backend: Arc<dyn GpioBackend> = match self.lease.take() {
            Some(lease) => Arc::new(MemoryMappedBackend::new(lease)),
            None => Arc::new(SysfsBackend::new(&self.config.sysfs_gpio_root)),
        };
        self.state = BuildState::Finalized;
        info!(
            "{}: {} pins, {} gpio, {:?} backend",
            self.definition.name,
            self.pins.len(),
            gpio_count,
            backend.kind()
        );
        Ok(BoardDescriptor::new(
            self.definition.name,
            std::mem::take(&mut self.pins),
            gpio_count,
            buses,
            backend,
            self.map.clone(),
        ))
    }

    /// Run every step in order.
    pub fn build(mut self) -> Result<BoardDescriptor> {
        self.load_pins()?;
        self.apply_busy_overlay()?;
        self.apply_function_overlay()?;
        self.finalize()
    }
}
