// CLASSIFICATION: COMMUNITY
// Filename: mod.rs · mux v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! SoC pin multiplexer description and capability resolution.

pub mod resolver;
pub mod soc;

/// Names the function a gpio carries while `enable` reads asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionGroup {
    pub gpio: u32,
    pub name: &'static str,
    /// Key into [`SocMux::functions`].
    pub enable: &'static str,
    /// The function is active while the enable bit is clear.
    pub inverted: bool,
}

/// Location of a named function-enable bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionRegister {
    pub name: &'static str,
    pub reg: usize,
    pub bit: u32,
}

/// Output function select id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSignal {
    pub id: u8,
    pub name: &'static str,
}

/// Input function whose 8-bit source gpio field sits at `reg >> shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSignal {
    pub reg: usize,
    pub shift: u32,
    pub name: &'static str,
}

/// Mux tables for one SoC family.
#[derive(Debug)]
pub struct SocMux {
    pub groups: &'static [FunctionGroup],
    pub functions: &'static [FunctionRegister],
    pub outputs: &'static [OutputSignal],
    pub inputs: &'static [InputSignal],
}
