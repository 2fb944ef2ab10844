// CLASSIFICATION: COMMUNITY
// Filename: shared_map.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use qca_board::gpio::{shared_dev_mem, MapWindow};
use qca_board::BoardError;
use tempfile::tempdir;

const WINDOW: MapWindow = MapWindow {
    base: 0x1804_0000,
    size: 0x30,
};

#[test]
fn process_map_is_pinned_to_first_device_and_window() {
    let dir = tempdir().unwrap();
    let mem = dir.path().join("mem");
    let first = shared_dev_mem(&mem, WINDOW).unwrap();
    let again = shared_dev_mem(&mem, WINDOW).unwrap();
    assert_eq!(again.window(), first.window());

    let other = dir.path().join("mem2");
    assert!(matches!(
        shared_dev_mem(&other, WINDOW),
        Err(BoardError::InvalidParameter(_))
    ));
    let wider = MapWindow { size: 0x70, ..WINDOW };
    assert!(matches!(
        shared_dev_mem(&mem, wider),
        Err(BoardError::InvalidParameter(_))
    ));
}
