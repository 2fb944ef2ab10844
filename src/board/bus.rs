// CLASSIFICATION: COMMUNITY
// Filename: bus.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Bus inventory from the device nodes present under `/dev`.

use std::path::{Path, PathBuf};

use log::debug;

const MAX_I2C_BUSES: u32 = 12;
const MAX_SPI_BUSES: u32 = 6;
const MAX_SPI_CHIP_SELECTS: u32 = 6;
const MAX_UART_DEVICES: usize = 6;
const UART_PREFIXES: [&str; 2] = ["ttyATH", "ttyS"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusInventory {
    /// Bus ids with an `i2c-N` node.
    pub i2c: Vec<u32>,
    /// Bus ids with at least one `spidevN.M` node.
    pub spi: Vec<u32>,
    /// UART device paths, on-chip `ttyATH` ports first.
    pub uart: Vec<PathBuf>,
}

impl BusInventory {
    /// Probe `dev_root` for i2c, spidev and serial nodes.
    pub fn probe(dev_root: &Path) -> Self {
        let i2c = (0..MAX_I2C_BUSES)
            .filter(|n| dev_root.join(format!("i2c-{n}")).exists())
            .collect();
        let spi = (0..MAX_SPI_BUSES)
            .filter(|bus| {
                (0..MAX_SPI_CHIP_SELECTS)
                    .any(|cs| dev_root.join(format!("spidev{bus}.{cs}")).exists())
            })
            .collect();
        let uart = UART_PREFIXES
            .iter()
            .flat_map(|prefix| (0..6).map(move |n| format!("{prefix}{n}")))
            .map(|name| dev_root.join(name))
            .filter(|path| path.exists())
            .take(MAX_UART_DEVICES)
            .collect();
        let inventory = Self { i2c, spi, uart };
        debug!(
            "buses under {}: i2c {:?}, spi {:?}, {} uart",
            dev_root.display(),
            inventory.i2c,
            inventory.spi,
            inventory.uart.len()
        );
        inventory
    }
}
