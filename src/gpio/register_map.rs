// CLASSIFICATION: COMMUNITY
// Filename: register_map.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Shared, reference-counted mapping of the GPIO register block.
//!
//! Every pin that switches to mapped access and every board build that
//! probes the mux registers holds one reference. The window is mapped on the
//! first reference and unmapped when the last one is released. The whole
//! check-then-act sequence on the count runs under the write lock, so
//! concurrent enables never map twice.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::{debug, error, info};
use once_cell::sync::OnceCell;

use super::context::{GpioContext, MappedGpio};
use super::regs::{DevMemProvider, MapWindow, MappedRegion, RegionProvider, RegisterBlock};
use crate::error::{BoardError, Result};

struct MapState {
    region: Option<Box<dyn MappedRegion>>,
    refs: usize,
}

/// Cloneable handle onto one register mapping.
#[derive(Clone)]
pub struct RegisterMapHandle {
    state: Arc<RwLock<MapState>>,
    provider: Arc<dyn RegionProvider>,
    window: MapWindow,
}

impl fmt::Debug for RegisterMapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterMapHandle")
            .field("window", &self.window)
            .field("refs", &self.refs().ok())
            .finish()
    }
}

static DEV_MEM: OnceCell<(PathBuf, RegisterMapHandle)> = OnceCell::new();

/// Process-wide `/dev/mem` mapping. The first caller fixes the device and window.
pub fn shared_dev_mem(mem_path: &Path, window: MapWindow) -> Result<RegisterMapHandle> {
    let (path, handle) = DEV_MEM.get_or_init(|| {
        (
            mem_path.to_path_buf(),
            RegisterMapHandle::new(Arc::new(DevMemProvider::new(mem_path)), window),
        )
    });
    if path != mem_path {
        error!("register map already set up on {}", path.display());
        return Err(BoardError::InvalidParameter(format!(
            "{} conflicts with existing mapping of {}",
            mem_path.display(),
            path.display()
        )));
    }
    if handle.window != window {
        error!(
            "register map already set up for {:#x}+{:#x}",
            handle.window.base, handle.window.size
        );
        return Err(BoardError::InvalidParameter(format!(
            "window {:#x}+{:#x} conflicts with existing mapping",
            window.base, window.size
        )));
    }
    Ok(handle.clone())
}

impl RegisterMapHandle {
    pub fn new(provider: Arc<dyn RegionProvider>, window: MapWindow) -> Self {
        Self {
            state: Arc::new(RwLock::new(MapState {
                region: None,
                refs: 0,
            })),
            provider,
            window,
        }
    }

    pub fn window(&self) -> MapWindow {
        self.window
    }

    /// Number of outstanding references.
    pub fn refs(&self) -> Result<usize> {
        Ok(self.state.read().map_err(|_| BoardError::LockPoisoned)?.refs)
    }

    pub fn is_mapped(&self) -> Result<bool> {
        Ok(self
            .state
            .read()
            .map_err(|_| BoardError::LockPoisoned)?
            .region
            .is_some())
    }

    /// Take a reference, mapping the window if this is the first one.
    ///
    /// A provider failure leaves the count and mapping untouched.
    pub fn acquire(&self) -> Result<MappingLease> {
        let mut state = self.state.write().map_err(|_| BoardError::LockPoisoned)?;
        if state.region.is_none() {
            let region = self.provider.map(self.window)?;
            info!(
                "register window {:#x}+{:#x} mapped",
                self.window.base, self.window.size
            );
            state.region = Some(region);
        }
        state.refs += 1;
        debug!("register map refs -> {}", state.refs);
        Ok(MappingLease {
            map: self.clone(),
            live: true,
        })
    }

    fn release_ref(&self) -> Result<()> {
        let mut state = self.state.write().map_err(|_| BoardError::LockPoisoned)?;
        if state.refs == 0 {
            error!("mmap: release without outstanding reference");
            return Err(BoardError::InvalidResource("reference count already zero".into()));
        }
        state.refs -= 1;
        debug!("register map refs -> {}", state.refs);
        if state.refs > 0 {
            return Ok(());
        }
        let region = state.region.take().ok_or_else(|| {
            error!("mmap: null register cant unsetup");
            BoardError::InvalidResource("register window not mapped".into())
        })?;
        region.unmap().map_err(|e| {
            error!("mmap: teardown failed: {e}");
            e
        })?;
        info!("register window {:#x} unmapped", self.window.base);
        Ok(())
    }

    /// Run `f` against the mapped registers.
    pub fn with_registers<T>(&self, f: impl FnOnce(&dyn RegisterBlock) -> T) -> Result<T> {
        let state = self.state.read().map_err(|_| BoardError::LockPoisoned)?;
        let region = state
            .region
            .as_ref()
            .ok_or_else(|| BoardError::InvalidResource("register window not mapped".into()))?;
        Ok(f(region.registers()))
    }

    /// Switch `ctx` to mapped register access.
    pub fn enable(&self, ctx: &mut GpioContext) -> Result<()> {
        if ctx.mapped().is_some() {
            error!("mmap: can't enable enabled mmap gpio {}", ctx.gpio());
            return Err(BoardError::AlreadyEnabled(ctx.gpio()));
        }
        let lease = self.acquire()?;
        ctx.install(MappedGpio::new(ctx.gpio(), lease));
        Ok(())
    }

    /// Drop mapped access from `ctx`, unmapping on the last reference.
    pub fn disable(&self, ctx: &mut GpioContext) -> Result<()> {
        let mapped = ctx.uninstall().ok_or_else(|| {
            error!("mmap: can't disable disabled mmap gpio {}", ctx.gpio());
            BoardError::AlreadyDisabled(ctx.gpio())
        })?;
        mapped.into_lease().release()
    }

    pub fn setup(&self, ctx: &mut GpioContext, enable: bool) -> Result<()> {
        if enable {
            self.enable(ctx)
        } else {
            self.disable(ctx)
        }
    }
}

/// One counted reference on a [`RegisterMapHandle`].
///
/// Dropping the lease releases it; use [`MappingLease::release`] to observe
/// teardown errors.
pub struct MappingLease {
    map: RegisterMapHandle,
    live: bool,
}

impl MappingLease {
    pub fn handle(&self) -> &RegisterMapHandle {
        &self.map
    }

    pub fn with_registers<T>(&self, f: impl FnOnce(&dyn RegisterBlock) -> T) -> Result<T> {
        self.map.with_registers(f)
    }

    pub fn release(mut self) -> Result<()> {
        self.live = false;
        self.map.release_ref()
    }
}

impl Drop for MappingLease {
    fn drop(&mut self) {
        if self.live {
            if let Err(e) = self.map.release_ref() {
                error!("mmap: dropping lease failed: {e}");
            }
        }
    }
}
