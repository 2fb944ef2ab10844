// CLASSIFICATION: COMMUNITY
// Filename: board_build.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use qca_board::board::builder::BoardBuilder;
use qca_board::board::pins::{Capabilities, PinInfo, PinMux};
use qca_board::board::{build_board, BoardDefinition, BoardId, SocFamily};
use qca_board::gpio::access::{GPIO_IN_FUNC, GPIO_OE, GPIO_OUT_FUNC};
use qca_board::gpio::memory::{MemoryProvider, MemoryRegion};
use qca_board::gpio::{BackendKind, MapWindow, RegisterBlock, RegisterMapHandle};
use qca_board::mux::soc::AR9331_MUX;
use qca_board::{BoardConfig, BoardError};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const G: Capabilities = Capabilities::VALID.union(Capabilities::GPIO);
const BUSES: Capabilities = Capabilities::GPIO
    .union(Capabilities::I2C)
    .union(Capabilities::SPI)
    .union(Capabilities::UART);

static THREE_PINS: [PinMux; 3] = [
    PinMux { name: "GPIO11", gpio: 11, caps: G },
    PinMux { name: "GPIO12", gpio: 12, caps: G },
    PinMux { name: "GPIO18", gpio: 18, caps: G },
];

static THREE_PIN_BOARD: BoardDefinition = BoardDefinition {
    name: "ThreePin",
    soc: SocFamily::Ar9331,
    pins: &THREE_PINS,
    mux: &AR9331_MUX,
    use_signal_mux: false,
};

fn config(root: &Path) -> BoardConfig {
    fs::create_dir_all(root.join("dev")).unwrap();
    fs::create_dir_all(root.join("sys")).unwrap();
    BoardConfig {
        board_name_path: root.join("board_name"),
        gpio_debug_path: root.join("debug_gpio"),
        mem_path: root.join("mem"),
        dev_root: root.join("dev"),
        sysfs_gpio_root: root.join("sys"),
        map_base: None,
    }
}

fn memory_map(provider: &MemoryProvider, size: usize) -> RegisterMapHandle {
    RegisterMapHandle::new(Arc::new(provider.clone()), MapWindow { base: 0, size })
}

#[test]
fn busy_spi_without_mapping() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    fs::write(&cfg.gpio_debug_path, " gpio-18  (spi0.cs             ) out hi\n").unwrap();
    let provider = MemoryProvider::new(MemoryRegion::new(0x30));
    provider.set_failing(true);
    let map = memory_map(&provider, 0x30);

    let board = BoardBuilder::new(&THREE_PIN_BOARD, &cfg, map.clone())
        .build()
        .unwrap();

    assert_eq!(board.pins[2].caps, Capabilities::VALID | Capabilities::SPI);
    assert_eq!(board.pins[0].caps, G);
    assert_eq!(board.pins[1].caps, G);
    assert_eq!(board.gpio_count, 2);
    assert_eq!(board.backend().kind(), BackendKind::SysfsFallback);
    assert!(!map.is_mapped().unwrap());
}

#[test]
fn missing_debugfs_keeps_static_table() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    let provider = MemoryProvider::new(MemoryRegion::new(0x30));
    // JTAG disabled, nothing else enabled.
    provider.region().write32(0x28, 1);
    let board = build_board(BoardId::Carambola2, &cfg, memory_map(&provider, 0x30)).unwrap();
    let statics = BoardId::Carambola2.definition().pins;
    for (pin, mux) in board.pins.iter().zip(statics) {
        assert_eq!(pin.caps, mux.caps, "{}", mux.name);
    }
    assert_eq!(board.phy_pin_count(), 41);
}

#[test]
fn carambola_uart_and_spi_enables_resolve() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    fs::write(
        &cfg.gpio_debug_path,
        "gpiochip0: GPIOs 0-29, parent: platform/18040000.gpio, ath79-gpio:\n gpio-0   (i2c-gpio-sda        ) in  hi\n gpio-1   (scl                 ) in  hi\n",
    )
    .unwrap();
    for node in ["i2c-0", "spidev0.0", "ttyATH0"] {
        fs::write(cfg.dev_root.join(node), "").unwrap();
    }
    let provider = MemoryProvider::new(MemoryRegion::new(0x30));
    provider.region().write32(0x28, (1 << 18) | (1 << 1) | 1);
    let board = build_board(BoardId::Carambola2, &cfg, memory_map(&provider, 0x30)).unwrap();

    let by_name = |name: &str| {
        board
            .pins
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.caps)
            .unwrap()
    };
    assert_eq!(by_name("SPI_CLK"), Capabilities::VALID | Capabilities::SPI);
    assert_eq!(by_name("UART_TX"), Capabilities::VALID | Capabilities::UART);
    // `i2c-gpio-sda` is not an `sda` prefix; `scl` is.
    assert_eq!(by_name("GPIO0"), G);
    assert_eq!(by_name("GPIO1"), Capabilities::VALID | Capabilities::I2C);
    assert_eq!(board.buses.i2c, vec![0]);
    assert_eq!(board.buses.spi, vec![0]);
    assert_eq!(board.buses.uart.len(), 1);
    assert_eq!(board.backend().kind(), BackendKind::MemoryMapped);
}

#[test]
fn every_pin_ends_with_at_most_one_bus() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    let provider = MemoryProvider::new(MemoryRegion::new(0x70));
    let regs = provider.region();
    regs.write32(GPIO_OE, 0x00ff_00f0);
    regs.write32(GPIO_OUT_FUNC, 0x0c08_0900);
    regs.write32(GPIO_OUT_FUNC + 4, 0x1600_0a0b);
    regs.write32(GPIO_IN_FUNC, (9 << 8) | 0x80);
    regs.write32(0x6c, 1 << 1);
    let board = build_board(BoardId::Rambutan, &cfg, memory_map(&provider, 0x70)).unwrap();
    assert_single_bus(&board.pins);

    let provider = MemoryProvider::new(MemoryRegion::new(0x30));
    provider.region().write32(0x28, (1 << 18) | (1 << 1));
    let board = build_board(BoardId::Carambola2, &cfg, memory_map(&provider, 0x30)).unwrap();
    assert_single_bus(&board.pins);
    let spi = board
        .pins
        .iter()
        .filter(|p| p.caps == Capabilities::VALID | Capabilities::SPI)
        .count();
    assert!(spi >= 4, "spi pins kept gpio: {spi}");
}

fn assert_single_bus(pins: &[PinInfo]) {
    for pin in pins {
        let buses = (pin.caps & BUSES).bits().count_ones();
        assert!(buses <= 1, "{} has {:?}", pin.name, pin.caps);
    }
}

#[test]
fn mapped_backend_drives_registers() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    let provider = MemoryProvider::new(MemoryRegion::with_set_clear(0x30));
    let map = memory_map(&provider, 0x30);
    let board = build_board(BoardId::Centipede, &cfg, map.clone()).unwrap();
    assert_eq!(map.refs().unwrap(), 1);

    let backend = board.backend();
    backend.write(21, true).unwrap();
    assert_eq!(backend.read(21).unwrap(), 1);
    backend.write(21, false).unwrap();
    assert_eq!(backend.read(21).unwrap(), 0);

    drop(backend);
    drop(board);
    assert_eq!(map.refs().unwrap(), 0);
    assert_eq!(provider.unmap_count(), 1);
}

#[test]
fn mapped_backend_rejects_gpio_outside_soc() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    let provider = MemoryProvider::new(MemoryRegion::with_set_clear(0x30));
    let board = build_board(BoardId::Carambola2, &cfg, memory_map(&provider, 0x30)).unwrap();
    let backend = board.backend();
    backend.write(0, true).unwrap();
    assert!(matches!(backend.write(32, true), Err(BoardError::InvalidParameter(_))));
    assert_eq!(backend.read(0).unwrap(), 1);
    assert!(matches!(backend.read(400), Err(BoardError::InvalidParameter(_))));
}
