// CLASSIFICATION: COMMUNITY
// Filename: mod.rs · gpio v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Memory-mapped gpio access.
//!
//! `regs` defines the injectable register window, `register_map` shares one
//! mapping between every user, `access` holds the bit-level register
//! primitives and `backend` exposes them as a [`GpioBackend`].

pub mod access;
pub mod backend;
pub mod context;
pub mod memory;
pub mod register_map;
pub mod regs;

pub use backend::{BackendKind, GpioBackend, MemoryMappedBackend, SysfsBackend};
pub use context::{GpioContext, MappedGpio};
pub use register_map::{shared_dev_mem, MappingLease, RegisterMapHandle};
pub use regs::{DevMemProvider, MapWindow, MappedRegion, RegionProvider, RegisterBlock};
