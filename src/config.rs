// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Filesystem locations used while probing a board.
//!
//! Every path defaults to the system location and can be redirected through
//! an environment variable or a TOML file, which is how the tests point the
//! detectors at a temporary tree.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{BoardError, Result};

fn env_path(var: &str, fallback: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(fallback))
}

/// Runtime configurable probe paths.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// File holding the OpenWrt board name.
    pub board_name_path: PathBuf,
    /// Kernel gpio debug listing.
    pub gpio_debug_path: PathBuf,
    /// Physical memory device backing the register map.
    pub mem_path: PathBuf,
    /// Directory probed for i2c, spidev and tty nodes.
    pub dev_root: PathBuf,
    /// Root of the sysfs gpio class used by the fallback backend.
    pub sysfs_gpio_root: PathBuf,
    /// Overrides the SoC default base of the register window.
    pub map_base: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_name_path: env_path("QCA_BOARD_NAME_PATH", "/tmp/sysinfo/board_name"),
            gpio_debug_path: env_path("QCA_GPIO_DEBUG_PATH", "/sys/kernel/debug/gpio"),
            mem_path: env_path("QCA_MEM_PATH", "/dev/mem"),
            dev_root: env_path("QCA_DEV_ROOT", "/dev"),
            sysfs_gpio_root: env_path("QCA_SYSFS_GPIO_ROOT", "/sys/class/gpio"),
            map_base: None,
        }
    }
}

impl BoardConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| BoardError::Config(e.to_string()))
    }

    /// Load the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading board config from {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| BoardError::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = BoardConfig::from_toml("mem_path = \"/tmp/fake_mem\"\nmap_base = 402915328\n")
            .unwrap();
        assert_eq!(cfg.mem_path, PathBuf::from("/tmp/fake_mem"));
        assert_eq!(cfg.map_base, Some(0x1804_0000));
        assert_eq!(cfg.dev_root, BoardConfig::default().dev_root);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = BoardConfig::from_toml("mem_path = [").unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }
}
