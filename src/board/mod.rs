// CLASSIFICATION: COMMUNITY
// Filename: mod.rs · board v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! 8devices board support.
//!
//! Picks the board from the OpenWrt board name, then runs its static pin
//! table through [`builder::BoardBuilder`].

pub mod builder;
pub mod bus;
pub mod busy;
pub mod descriptor;
pub mod pins;
pub mod tables;

use std::fs;
use std::path::Path;

use log::{error, info};

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::gpio::{shared_dev_mem, MapWindow, RegisterMapHandle};
use crate::mux::soc::{AR9331_MUX, LIMA_MUX, RAMBUTAN_MUX};
use crate::mux::SocMux;

pub use builder::{BoardBuilder, BuildState};
pub use descriptor::BoardDescriptor;
pub use pins::{Capabilities, PinInfo, PinMux};

/// Physical address of the GPIO block (KSEG1 alias 0xb804_0000).
const QCA_GPIO_BASE: u64 = 0x1804_0000;

/// SoC family, which fixes the register window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocFamily {
    Ar9331,
    Qca955x,
}

impl SocFamily {
    pub fn window(self, base_override: Option<u64>) -> MapWindow {
        let size = match self {
            SocFamily::Ar9331 => 0x30,
            SocFamily::Qca955x => 0x70,
        };
        MapWindow {
            base: base_override.unwrap_or(QCA_GPIO_BASE),
            size,
        }
    }
}

#[derive(Debug)]
pub struct BoardDefinition {
    pub name: &'static str,
    pub soc: SocFamily,
    pub pins: &'static [PinMux],
    pub mux: &'static SocMux,
    /// Consult the output/input function registers as well.
    pub use_signal_mux: bool,
}

static CARAMBOLA2: BoardDefinition = BoardDefinition {
    name: "Carambola2",
    soc: SocFamily::Ar9331,
    pins: &tables::CARAMBOLA2_PINS,
    mux: &AR9331_MUX,
    use_signal_mux: false,
};

static CENTIPEDE: BoardDefinition = BoardDefinition {
    name: "Centipede",
    soc: SocFamily::Ar9331,
    pins: &tables::CENTIPEDE_PINS,
    mux: &AR9331_MUX,
    use_signal_mux: false,
};

static LIMA: BoardDefinition = BoardDefinition {
    name: "Lima",
    soc: SocFamily::Qca955x,
    pins: &tables::LIMA_PINS,
    mux: &LIMA_MUX,
    use_signal_mux: true,
};

static RAMBUTAN: BoardDefinition = BoardDefinition {
    name: "Rambutan",
    soc: SocFamily::Qca955x,
    pins: &tables::RAMBUTAN_PINS,
    mux: &RAMBUTAN_MUX,
    use_signal_mux: true,
};

/// Supported boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardId {
    Carambola2,
    Centipede,
    Lima,
    Rambutan,
}

impl BoardId {
    /// Match the start of an OpenWrt board name.
    pub fn from_board_name(name: &str) -> Option<Self> {
        [
            ("carambola2", BoardId::Carambola2),
            ("centipede", BoardId::Centipede),
            ("lima", BoardId::Lima),
            ("rambutan", BoardId::Rambutan),
        ]
        .into_iter()
        .find(|(prefix, _)| name.starts_with(*prefix))
        .map(|(_, id)| id)
    }

    pub fn definition(self) -> &'static BoardDefinition {
        match self {
            BoardId::Carambola2 => &CARAMBOLA2,
            BoardId::Centipede => &CENTIPEDE,
            BoardId::Lima => &LIMA,
            BoardId::Rambutan => &RAMBUTAN,
        }
    }
}

/// Identify the board from the board name file.
pub fn detect_board(path: &Path) -> Result<BoardId> {
    let name = fs::read_to_string(path).map_err(|e| {
        error!("Failed to detect 8devices board ({}): {e}", path.display());
        BoardError::NotFound(format!("board name file {}", path.display()))
    })?;
    BoardId::from_board_name(&name).ok_or_else(|| {
        error!("Unknown 8devices board {:?}", name.trim());
        BoardError::NotFound(format!("unknown board {:?}", name.trim()))
    })
}

/// Build the descriptor for `id` using the given register map.
pub fn build_board(
    id: BoardId,
    config: &BoardConfig,
    map: RegisterMapHandle,
) -> Result<BoardDescriptor> {
    BoardBuilder::new(id.definition(), config, map).build()
}

/// Detect the board and build it against the process-wide `/dev/mem` map.
pub fn qca_8devices(config: &BoardConfig) -> Result<BoardDescriptor> {
    let id = detect_board(&config.board_name_path)?;
    info!("detected 8devices {:?}", id);
    let window = id.definition().soc.window(config.map_base);
    let map = shared_dev_mem(&config.mem_path, window)?;
    build_board(id, config, map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_names_match_by_prefix() {
        assert_eq!(BoardId::from_board_name("carambola2\n"), Some(BoardId::Carambola2));
        assert_eq!(BoardId::from_board_name("lima-v2"), Some(BoardId::Lima));
        assert_eq!(BoardId::from_board_name("rambutan"), Some(BoardId::Rambutan));
        assert_eq!(BoardId::from_board_name("centipede"), Some(BoardId::Centipede));
        assert_eq!(BoardId::from_board_name("tl-wr703n"), None);
    }

    #[test]
    fn windows_follow_soc() {
        assert_eq!(BoardId::Lima.definition().soc.window(None).size, 0x70);
        let w = BoardId::Carambola2.definition().soc.window(Some(0x1000_0000));
        assert_eq!(w, MapWindow { base: 0x1000_0000, size: 0x30 });
        assert_eq!(BoardId::Lima.definition().pins.len(), 33);
    }
}
