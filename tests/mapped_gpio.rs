// CLASSIFICATION: COMMUNITY
// Filename: mapped_gpio.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use qca_board::board::build_board;
use qca_board::gpio::access::GPIO_OE;
use qca_board::gpio::memory::{MemoryProvider, MemoryRegion};
use qca_board::gpio::{GpioContext, MapWindow, RegisterBlock, RegisterMapHandle};
use qca_board::{BoardConfig, BoardError, BoardId};
use std::sync::Arc;
use tempfile::tempdir;

fn rig() -> (MemoryProvider, RegisterMapHandle) {
    let provider = MemoryProvider::new(MemoryRegion::with_set_clear(0x70));
    let map = RegisterMapHandle::new(
        Arc::new(provider.clone()),
        MapWindow {
            base: 0x1804_0000,
            size: 0x70,
        },
    );
    (provider, map)
}

#[test]
fn pin_contexts_share_one_mapping() {
    let dir = tempdir().unwrap();
    let cfg = BoardConfig {
        gpio_debug_path: dir.path().join("none"),
        dev_root: dir.path().to_path_buf(),
        sysfs_gpio_root: dir.path().to_path_buf(),
        ..BoardConfig::default()
    };
    let (provider, map) = rig();
    // Outputs on function 0 keep their gpio capability.
    provider.region().write32(GPIO_OE, (1 << 11) | (1 << 12));
    let board = build_board(BoardId::Lima, &cfg, map.clone()).unwrap();

    // Lima header pins 1 and 2 carry GPIO11 and GPIO12.
    let mut a = board.gpio_context(1).unwrap();
    let mut b = board.gpio_context(2).unwrap();
    board.mmap_setup(&mut a, true).unwrap();
    board.mmap_setup(&mut b, true).unwrap();
    assert_eq!(provider.map_count(), 1);
    assert_eq!(map.refs().unwrap(), 3);

    a.mapped().unwrap().write(true).unwrap();
    assert_eq!(b.mapped().unwrap().read().unwrap(), 0);
    assert_eq!(a.mapped().unwrap().read().unwrap(), 1);

    board.mmap_setup(&mut a, false).unwrap();
    board.mmap_setup(&mut b, false).unwrap();
    assert!(matches!(
        board.mmap_setup(&mut b, false),
        Err(BoardError::AlreadyDisabled(12))
    ));
    drop(board);
    assert!(!map.is_mapped().unwrap());
}

#[test]
fn non_gpio_pin_has_no_context() {
    let dir = tempdir().unwrap();
    let cfg = BoardConfig {
        gpio_debug_path: dir.path().join("none"),
        dev_root: dir.path().to_path_buf(),
        ..BoardConfig::default()
    };
    let (_provider, map) = rig();
    let board = build_board(BoardId::Lima, &cfg, map).unwrap();
    // Pin 7 is GND.
    assert!(matches!(
        board.gpio_context(7),
        Err(BoardError::InvalidParameter(_))
    ));
    assert!(board.gpio_context(99).is_err());
}

#[test]
fn unmapped_enable_propagates_failure() {
    let (provider, map) = rig();
    provider.set_failing(true);
    let mut ctx = GpioContext::new(4);
    assert!(matches!(
        map.setup(&mut ctx, true),
        Err(BoardError::NoResources(_))
    ));
    assert!(matches!(
        map.setup(&mut ctx, false),
        Err(BoardError::AlreadyDisabled(4))
    ));
    provider.set_failing(false);
    map.setup(&mut ctx, true).unwrap();
    map.setup(&mut ctx, false).unwrap();
    assert_eq!(provider.map_count(), 1);
    assert_eq!(provider.unmap_count(), 1);
}
