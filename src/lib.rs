// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Board support for 8devices boards on AR9331 and QCA955x SoCs.
//!
//! Resolves which capability each header pin actually has (static table,
//! kernel-claimed gpios, SoC mux registers) and provides memory-mapped gpio
//! access through one shared `/dev/mem` mapping.

/// Board detection, pin tables and the capability builder
pub mod board;

/// `qca-pins` command line
pub mod cli;

/// Probe path configuration
pub mod config;

pub mod error;

/// Register mapping and mapped gpio access
pub mod gpio;

/// SoC mux tables and capability resolution
pub mod mux;

pub use board::{build_board, detect_board, qca_8devices, BoardDescriptor, BoardId};
pub use config::BoardConfig;
pub use error::{BoardError, Result};
