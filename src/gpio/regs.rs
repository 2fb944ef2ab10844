// CLASSIFICATION: COMMUNITY
// Filename: regs.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Register window abstraction.
//!
//! The GPIO block is reached through a [`RegionProvider`] that hands out a
//! [`MappedRegion`]. On hardware this is an `mmap` of `/dev/mem`; tests
//! substitute the in-memory region from [`super::memory`].
//!
//! Safety notes:
//! - A `DevMemRegion` pointer stays valid until `unmap` consumes the region.
//! - Every access is a single volatile 32-bit load or store; offsets outside
//!   the window are rejected before the pointer is dereferenced.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, IntoRawFd};
use std::path::PathBuf;
use std::ptr::{self, NonNull};

use log::{debug, error};

use crate::error::{BoardError, Result};

/// Physical placement of the GPIO register block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapWindow {
    pub base: u64,
    pub size: usize,
}

/// 32-bit register access relative to the start of the window.
pub trait RegisterBlock: Send + Sync {
    /// Size of the window in bytes.
    fn len(&self) -> usize;

    fn read32(&self, offset: usize) -> u32;

    fn write32(&self, offset: usize, value: u32);
}

/// A live mapping that must be torn down explicitly.
pub trait MappedRegion: Send + Sync {
    fn registers(&self) -> &dyn RegisterBlock;

    /// Unmap the window and release the backing descriptor.
    fn unmap(self: Box<Self>) -> Result<()>;
}

/// Source of register mappings.
pub trait RegionProvider: Send + Sync {
    fn map(&self, window: MapWindow) -> Result<Box<dyn MappedRegion>>;
}

/// Maps the register window out of a physical memory device.
#[derive(Clone, Debug)]
pub struct DevMemProvider {
    path: PathBuf,
}

impl DevMemProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RegionProvider for DevMemProvider {
    fn map(&self, window: MapWindow) -> Result<Box<dyn MappedRegion>> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(&self.path)
            .map_err(|source| {
                error!("mmap: unable to open {}", self.path.display());
                BoardError::ResourceUnavailable {
                    path: self.path.clone(),
                    source,
                }
            })?;
        let offset = libc::off_t::try_from(window.base).map_err(|_| {
            BoardError::InvalidParameter(format!("map base {:#x} out of range", window.base))
        })?;
        // SAFETY: fresh shared mapping of an open descriptor, no existing
        // Rust object aliases the returned pages.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                window.size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                offset,
            )
        };
        if addr == libc::MAP_FAILED {
            let err = std::io::Error::last_os_error();
            error!("mmap: failed to map {:#x}+{:#x}: {}", window.base, window.size, err);
            return Err(BoardError::NoResources(format!(
                "mmap of {} failed: {err}",
                self.path.display()
            )));
        }
        let base = NonNull::new(addr.cast::<u8>())
            .ok_or_else(|| BoardError::NoResources("mmap returned null".into()))?;
        debug!("mapped {:#x}+{:#x} from {}", window.base, window.size, self.path.display());
        Ok(Box::new(DevMemRegion {
            base,
            size: window.size,
            file,
        }))
    }
}

/// `mmap`ed register window.
struct DevMemRegion {
    base: NonNull<u8>,
    size: usize,
    file: File,
}

// SAFETY: the mapping is device memory accessed only through volatile word
// operations; it is not tied to the creating thread.
unsafe impl Send for DevMemRegion {}
unsafe impl Sync for DevMemRegion {}

impl DevMemRegion {
    fn word(&self, offset: usize) -> *mut u32 {
        assert!(
            offset % 4 == 0 && offset + 4 <= self.size,
            "register offset {offset:#x} outside window"
        );
        // SAFETY: bounds checked above against the mapped length.
        unsafe { self.base.as_ptr().add(offset).cast::<u32>() }
    }
}

impl RegisterBlock for DevMemRegion {
    fn len(&self) -> usize {
        self.size
    }

    fn read32(&self, offset: usize) -> u32 {
        // SAFETY: `word` yields an aligned in-window pointer.
        unsafe { ptr::read_volatile(self.word(offset)) }
    }

    fn write32(&self, offset: usize, value: u32) {
        // SAFETY: `word` yields an aligned in-window pointer.
        unsafe { ptr::write_volatile(self.word(offset), value) }
    }
}

impl MappedRegion for DevMemRegion {
    fn registers(&self) -> &dyn RegisterBlock {
        self
    }

    fn unmap(self: Box<Self>) -> Result<()> {
        let DevMemRegion { base, size, file } = *self;
        // SAFETY: `base`/`size` describe the mapping created in `map`; the
        // region is consumed so no accessor can outlive it.
        let unmapped = match unsafe { libc::munmap(base.as_ptr().cast(), size) } {
            0 => Ok(()),
            _ => Err(std::io::Error::last_os_error()),
        };
        let fd = file.into_raw_fd();
        // SAFETY: fd ownership was released by `into_raw_fd`.
        let closed = unsafe { libc::close(fd) };
        if let Err(err) = unmapped {
            return Err(BoardError::InvalidResource(format!("munmap failed: {err}")));
        }
        if closed != 0 {
            return Err(BoardError::InvalidResource(format!(
                "close failed: {}",
                std::io::Error::last_os_error()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_device_is_resource_unavailable() {
        let provider = DevMemProvider::new("/nonexistent/qca/mem");
        let err = provider
            .map(MapWindow {
                base: 0,
                size: 0x30,
            })
            .err()
            .unwrap();
        assert!(matches!(err, BoardError::ResourceUnavailable { .. }));
    }
}
