// CLASSIFICATION: COMMUNITY
// Filename: resolver.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Infer which peripheral currently owns a gpio from the SoC mux registers.
//!
//! Two register schemes feed one name-to-capability mapping:
//! - function groups: a named enable bit per gpio in the function registers;
//! - signal mux: the per-gpio output function id, or for inputs the input
//!   function fields that select this gpio as their source.

use log::trace;

use super::{FunctionGroup, InputSignal, OutputSignal, SocMux};
use crate::board::pins::Capabilities;
use crate::gpio::access::{self, GPIO_OUT_FUNC};
use crate::gpio::regs::RegisterBlock;

fn peripherals() -> Capabilities {
    Capabilities::GPIO | Capabilities::I2C | Capabilities::SPI | Capabilities::UART
}

/// Map a mux function name onto pin capabilities.
///
/// `SPI*`, `UART*` and `I2C*` leave exactly that bus set, `GPIO*` adds gpio,
/// and any other name (or none) clears every bus and gpio bit.
pub fn caps_for_function(name: Option<&str>, caps: Capabilities) -> Capabilities {
    let bare = caps.difference(peripherals());
    match name {
        Some(n) if n.starts_with("SPI") => bare | Capabilities::SPI,
        Some(n) if n.starts_with("UART") => bare | Capabilities::UART,
        Some(n) if n.starts_with("I2C") => bare | Capabilities::I2C,
        Some(n) if n.starts_with("GPIO") => caps | Capabilities::GPIO,
        _ => bare,
    }
}

fn group_asserted(regs: &dyn RegisterBlock, group: &FunctionGroup, mux: &SocMux) -> bool {
    mux.functions
        .iter()
        .filter(|f| f.name == group.enable)
        .any(|f| {
            let set = (regs.read32(f.reg) >> f.bit) & 0x1 == 1;
            set != group.inverted
        })
}

/// Resolve `gpio` through the function groups; the first asserted group in
/// table order wins. Without one, `caps` is returned untouched.
pub fn resolve_by_function_group(
    regs: &dyn RegisterBlock,
    gpio: u32,
    caps: Capabilities,
    mux: &SocMux,
) -> Capabilities {
    mux.groups
        .iter()
        .filter(|g| g.gpio == gpio)
        .find(|g| group_asserted(regs, g, mux))
        .map_or(caps, |g| {
            trace!("gpio {gpio}: function group {} asserted", g.name);
            caps_for_function(Some(g.name), caps)
        })
}

/// Resolve an output gpio from its 8-bit output function id.
pub fn resolve_output_function(
    regs: &dyn RegisterBlock,
    gpio: u32,
    caps: Capabilities,
    outputs: &[OutputSignal],
) -> Capabilities {
    let word = regs.read32(GPIO_OUT_FUNC + (gpio / 4) as usize * 4);
    let id = (word >> (8 * (gpio % 4))) & 0xff;
    let name = outputs.iter().find(|s| u32::from(s.id) == id).map(|s| s.name);
    trace!("gpio {gpio}: output function {id} -> {name:?}");
    caps_for_function(name, caps)
}

/// Resolve an input gpio from the first input function that selects it.
pub fn resolve_input_function(
    regs: &dyn RegisterBlock,
    gpio: u32,
    caps: Capabilities,
    inputs: &[InputSignal],
) -> Capabilities {
    let name = inputs
        .iter()
        .find(|s| (regs.read32(s.reg) >> s.shift) & 0xff == gpio)
        .map(|s| s.name);
    trace!("gpio {gpio}: input function -> {name:?}");
    caps_for_function(name, caps)
}

/// Pick the output or input scheme from the gpio's output-enable bit.
pub fn resolve_signal_mux(
    regs: &dyn RegisterBlock,
    gpio: u32,
    caps: Capabilities,
    mux: &SocMux,
) -> Capabilities {
    if access::output_enabled(regs, gpio) {
        resolve_output_function(regs, gpio, caps, mux.outputs)
    } else {
        resolve_input_function(regs, gpio, caps, mux.inputs)
    }
}
