// CLASSIFICATION: COMMUNITY
// Filename: memory.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! In-memory register window.
//!
//! Stands in for `/dev/mem` when no hardware is present. With
//! [`MemoryRegion::with_set_clear`] stores to SET/CLEAR update the OUT and IN
//! words the way the GPIO block loops an output back to its input.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use log::debug;

use super::access::{GPIO_CLEAR, GPIO_IN, GPIO_OUT, GPIO_SET};
use super::regs::{MapWindow, MappedRegion, RegionProvider, RegisterBlock};
use crate::error::{BoardError, Result};

/// Word-addressed fake register block.
#[derive(Debug)]
pub struct MemoryRegion {
    words: Vec<AtomicU32>,
    set_clear: bool,
}

impl MemoryRegion {
    /// Plain storage; every store lands where it is addressed.
    pub fn new(size: usize) -> Self {
        Self {
            words: (0..size.div_ceil(4)).map(|_| AtomicU32::new(0)).collect(),
            set_clear: false,
        }
    }

    /// Storage that emulates the SET/CLEAR output registers.
    pub fn with_set_clear(size: usize) -> Self {
        Self {
            set_clear: true,
            ..Self::new(size)
        }
    }

    fn slot(&self, offset: usize) -> &AtomicU32 {
        assert!(offset % 4 == 0, "unaligned register offset {offset:#x}");
        &self.words[offset / 4]
    }
}

impl RegisterBlock for MemoryRegion {
    fn len(&self) -> usize {
        self.words.len() * 4
    }

    fn read32(&self, offset: usize) -> u32 {
        self.slot(offset).load(Ordering::SeqCst)
    }

    fn write32(&self, offset: usize, value: u32) {
        if self.set_clear && (offset == GPIO_SET || offset == GPIO_CLEAR) {
            let latched = [GPIO_OUT, GPIO_IN];
            for reg in latched {
                if offset == GPIO_SET {
                    self.slot(reg).fetch_or(value, Ordering::SeqCst);
                } else {
                    self.slot(reg).fetch_and(!value, Ordering::SeqCst);
                }
            }
            return;
        }
        self.slot(offset).store(value, Ordering::SeqCst);
    }
}

struct SharedRegion {
    region: Arc<MemoryRegion>,
    unmaps: Arc<AtomicUsize>,
    fail_unmap: Arc<AtomicBool>,
}

impl MappedRegion for SharedRegion {
    fn registers(&self) -> &dyn RegisterBlock {
        self.region.as_ref()
    }

    fn unmap(self: Box<Self>) -> Result<()> {
        if self.fail_unmap.load(Ordering::SeqCst) {
            return Err(BoardError::InvalidResource("memory provider set to fail unmap".into()));
        }
        self.unmaps.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Provider handing out one shared [`MemoryRegion`] and counting map calls.
#[derive(Clone)]
pub struct MemoryProvider {
    region: Arc<MemoryRegion>,
    maps: Arc<AtomicUsize>,
    unmaps: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
    fail_unmap: Arc<AtomicBool>,
}

impl MemoryProvider {
    pub fn new(region: MemoryRegion) -> Self {
        Self {
            region: Arc::new(region),
            maps: Arc::new(AtomicUsize::new(0)),
            unmaps: Arc::new(AtomicUsize::new(0)),
            fail: Arc::new(AtomicBool::new(false)),
            fail_unmap: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register block seen by every mapping from this provider.
    pub fn region(&self) -> &MemoryRegion {
        &self.region
    }

    /// Make subsequent `map` calls fail with `NoResources`.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Make teardown of mappings fail with `InvalidResource`.
    pub fn set_unmap_failing(&self, fail: bool) {
        self.fail_unmap.store(fail, Ordering::SeqCst);
    }

    pub fn map_count(&self) -> usize {
        self.maps.load(Ordering::SeqCst)
    }

    pub fn unmap_count(&self) -> usize {
        self.unmaps.load(Ordering::SeqCst)
    }
}

impl RegionProvider for MemoryProvider {
    fn map(&self, window: MapWindow) -> Result<Box<dyn MappedRegion>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BoardError::NoResources("memory provider set to fail".into()));
        }
        if window.size > self.region.len() {
            return Err(BoardError::NoResources(format!(
                "window {:#x} larger than backing region",
                window.size
            )));
        }
        self.maps.fetch_add(1, Ordering::SeqCst);
        debug!("memory provider mapped window {:#x}+{:#x}", window.base, window.size);
        Ok(Box::new(SharedRegion {
            region: Arc::clone(&self.region),
            unmaps: Arc::clone(&self.unmaps),
            fail_unmap: Arc::clone(&self.fail_unmap),
        }))
    }
}
