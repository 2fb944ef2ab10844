// CLASSIFICATION: COMMUNITY
// Filename: busy.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Gpios already claimed by a kernel driver.
//!
//! The debugfs listing prints one line per requested gpio:
//!
//! ```text
//!  gpio-12  (sda                 ) in  hi
//!  gpio-7   (sysfs               ) out lo
//!  gpio-3   (                    |spi-cs0     ) out hi
//! ```
//!
//! Only the number and the consumer label are used.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use super::pins::{Capabilities, PinInfo};
use crate::error::{BoardError, Result};

const MAX_GPIO_DIGITS: usize = 5;
const MAX_ROLE_CHARS: usize = 40;

/// Consumer class of a requested gpio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyMode {
    Unclaimed,
    Gpio,
    I2c,
    Spi,
    Uart,
}

impl BusyMode {
    fn classify(role: &str) -> Self {
        if role.starts_with("sda") || role.starts_with("scl") {
            BusyMode::I2c
        } else if role.starts_with("spi") {
            BusyMode::Spi
        } else if role.starts_with("sysfs") {
            BusyMode::Gpio
        } else {
            BusyMode::Unclaimed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyGpioEntry {
    pub gpio: u32,
    pub mode: BusyMode,
}

/// Parse one debugfs line, `None` when it is not a `gpio-N(role)` entry.
pub fn parse_line(line: &str) -> Option<BusyGpioEntry> {
    let rest = line.trim_start().strip_prefix("gpio-")?;
    let (number, rest) = rest.split_once('(')?;
    if number.is_empty() || number.len() > MAX_GPIO_DIGITS {
        return None;
    }
    let digits: String = number
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let gpio = digits.parse::<u32>().ok()?;

    let role: String = rest
        .chars()
        .take_while(|c| *c != ')' && *c != '\n')
        .take(MAX_ROLE_CHARS)
        .collect();
    if role.is_empty() {
        return None;
    }
    // Newer kernels print `consumer|label`.
    let role = match role.split_once('|') {
        Some((_, label)) => label.trim(),
        None => role.trim(),
    };
    Some(BusyGpioEntry {
        gpio,
        mode: BusyMode::classify(role),
    })
}

/// Collect at most `max` entries from a debugfs listing.
pub fn parse_busy_gpios<R: BufRead>(reader: R, max: usize) -> Vec<BusyGpioEntry> {
    let mut found = Vec::new();
    for line in reader.split(b'\n') {
        if found.len() >= max {
            debug!("busy gpio list truncated at {max} entries");
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("busy gpio listing unreadable after {} entries: {e}", found.len());
                break;
            }
        };
        if let Some(entry) = parse_line(&String::from_utf8_lossy(&line)) {
            found.push(entry);
        }
    }
    found
}

/// Read the kernel's view of claimed gpios from `path`.
pub fn detect(path: &Path, max: usize) -> Result<Vec<BusyGpioEntry>> {
    let file = File::open(path).map_err(|e| {
        warn!("can't open {}: {e}", path.display());
        BoardError::NotFound(format!("{} ({e})", path.display()))
    })?;
    let found = parse_busy_gpios(BufReader::new(file), max);
    debug!("{} busy gpios listed in {}", found.len(), path.display());
    Ok(found)
}

/// Index of the first gpio-capable pin wired to `gpio`.
pub fn lookup_pin_for_gpio(pins: &[PinInfo], gpio: u32) -> Result<usize> {
    pins.iter()
        .position(|p| p.gpio == gpio && p.caps.contains(Capabilities::GPIO))
        .ok_or_else(|| BoardError::NotFound(format!("no gpio pin for gpio {gpio}")))
}
