//! rpg-save: Save slots for the grid-world text RPG
//!
//! A save is one JSON document: a small [`SaveHeader`] that the slot
//! browser can read on its own, followed by the full [`GameState`]. The
//! world is not stored; it is rebuilt from the state's seed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rpg_core::GameState;

/// Bumped whenever `GameState` changes shape incompatibly
pub const SAVE_VERSION: u32 = 2;

/// Slots are numbered 1..=SLOT_COUNT
pub const SLOT_COUNT: u8 = 3;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Could not access save: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save data is damaged: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No save there")]
    NotFound,

    #[error("Save is from version {found}, this game reads version {expected}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Not a textrpg save")]
    InvalidHeader,

    #[error("Invalid save slot {0} (choose 1-{max})", max = SLOT_COUNT)]
    InvalidSlot(u8),
}

/// What the slot list shows without restoring the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    pub magic: String,
    pub version: u32,
    pub player_name: String,
    pub class: String,
    pub level: u32,
    /// Zone the player stood in
    pub zone: String,
    pub turns: u64,
    /// Unix seconds
    pub timestamp: i64,
}

impl SaveHeader {
    const MAGIC: &'static str = "TRPG";

    pub fn new(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            magic: Self::MAGIC.into(),
            version: SAVE_VERSION,
            player_name: player.name.clone(),
            class: player.class().to_string(),
            level: player.level,
            zone: state.position.zone.to_string(),
            turns: state.turns,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Reject foreign files and other format versions
    pub fn validate(&self) -> Result<(), SaveError> {
        match (self.magic == Self::MAGIC, self.version) {
            (false, _) => Err(SaveError::InvalidHeader),
            (true, SAVE_VERSION) => Ok(()),
            (true, found) => Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found,
            }),
        }
    }

    pub fn saved_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.timestamp, 0).single()
    }

    /// "Melon the Mage (level 2) in C3, 14 turns, saved 2024-05-01 18:30"
    pub fn summary(&self) -> String {
        let when = match self.saved_at() {
            Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
            None => "at an unknown time".into(),
        };
        format!(
            "{} the {} (level {}) in {}, {} turns, saved {}",
            self.player_name, self.class, self.level, self.zone, self.turns, when
        )
    }
}

/// On-disk layout of a save
#[derive(Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub state: GameState,
}

#[derive(Serialize)]
struct SaveFileRef<'a> {
    header: SaveHeader,
    state: &'a GameState,
}

fn read_save(path: &Path) -> Result<String, SaveError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SaveError::NotFound,
        _ => SaveError::Io(e),
    })
}

/// Write `state` to `path`, creating parent directories as needed
pub fn save_game(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_vec_pretty(&SaveFileRef {
        header: SaveHeader::new(state),
        state,
    })?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), player = %state.player.name, "game saved");
    Ok(())
}

pub fn load_game(path: impl AsRef<Path>) -> Result<GameState, SaveError> {
    let path = path.as_ref();
    let save: SaveFile = serde_json::from_str(&read_save(path)?)?;
    save.header.validate()?;
    tracing::info!(path = %path.display(), player = %save.header.player_name, "game loaded");
    Ok(save.state)
}

/// Read just the header, skipping over the state
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    #[derive(Deserialize)]
    struct HeaderOnly {
        header: SaveHeader,
    }

    let parsed: HeaderOnly = serde_json::from_str(&read_save(path.as_ref())?)?;
    parsed.header.validate()?;
    Ok(parsed.header)
}

pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    fs::remove_file(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SaveError::NotFound,
        _ => SaveError::Io(e),
    })
}

/// `<local data dir>/textrpg/saves`, or `./textrpg/saves` without one
pub fn default_save_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("textrpg")
        .join("saves")
}

pub fn slot_path(dir: impl AsRef<Path>, slot: u8) -> Result<PathBuf, SaveError> {
    if !(1..=SLOT_COUNT).contains(&slot) {
        return Err(SaveError::InvalidSlot(slot));
    }
    Ok(dir.as_ref().join(format!("slot{slot}.json")))
}

/// Whether anything occupies the slot, even something unreadable
pub fn slot_exists(dir: impl AsRef<Path>, slot: u8) -> Result<bool, SaveError> {
    Ok(slot_path(dir, slot)?.exists())
}

pub fn save_slot(dir: impl AsRef<Path>, slot: u8, state: &GameState) -> Result<(), SaveError> {
    save_game(state, slot_path(dir, slot)?)
}

pub fn load_slot(dir: impl AsRef<Path>, slot: u8) -> Result<GameState, SaveError> {
    load_game(slot_path(dir, slot)?)
}

pub fn delete_slot(dir: impl AsRef<Path>, slot: u8) -> Result<(), SaveError> {
    delete_save(slot_path(dir, slot)?)
}

/// Every slot with its header; `None` for empty or unreadable slots
pub fn list_slots(dir: impl AsRef<Path>) -> Vec<(u8, Option<SaveHeader>)> {
    let dir = dir.as_ref();
    (1..=SLOT_COUNT)
        .map(|slot| {
            let header = match slot_path(dir, slot).and_then(|path| load_header(path)) {
                Ok(header) => Some(header),
                Err(SaveError::NotFound) => None,
                Err(e) => {
                    tracing::warn!(slot, error = %e, "unreadable save slot");
                    None
                }
            };
            (slot, header)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::GameRng;
    use rpg_core::monster::EnemyRegistry;
    use rpg_core::player::{Character, ClassKind};
    use rpg_core::world::{World, Zone, ZoneGraph};

    fn one_zone_game() -> GameState {
        let mut zone = Zone::new("A1".parse().unwrap(), "start");
        zone.add_area("Crossroads", "");
        let world = World::new(ZoneGraph::grid(1, 1).unwrap(), [zone], EnemyRegistry::new()).unwrap();
        GameState::new(Character::new("Melon", ClassKind::Mage), &world, GameRng::new(12)).unwrap()
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("textrpg_{name}_{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_file_keeps_player_and_seed() {
        let dir = scratch("file");
        let path = dir.join("nested").join("game.json");
        let mut game = one_zone_game();
        for _ in 0..5 {
            game.rng.rn2(100);
        }

        save_game(&game, &path).unwrap();
        let back = load_game(&path).unwrap();
        assert_eq!(back.player, game.player);
        assert_eq!(back.position, game.position);
        assert_eq!(back.rng.seed(), 12);

        // The random stream resumes rather than restarting
        let mut resumed = back;
        assert_eq!(game.rng.rn2(1_000_000), resumed.rng.rn2(1_000_000));

        let header = load_header(&path).unwrap();
        assert_eq!(header.player_name, "Melon");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_header_rejects_foreign_and_newer_files() {
        let header = SaveHeader::new(&one_zone_game());
        assert!(header.validate().is_ok());
        assert_eq!((header.zone.as_str(), header.class.as_str()), ("A1", "Mage"));

        let foreign = SaveHeader {
            magic: "NHSV".into(),
            ..header.clone()
        };
        assert!(matches!(foreign.validate(), Err(SaveError::InvalidHeader)));

        let newer = SaveHeader {
            version: SAVE_VERSION + 1,
            ..header
        };
        assert!(matches!(
            newer.validate(),
            Err(SaveError::IncompatibleVersion { found, .. }) if found == SAVE_VERSION + 1
        ));
    }

    #[test]
    fn test_summary_line() {
        let summary = SaveHeader::new(&one_zone_game()).summary();
        assert!(summary.starts_with("Melon the Mage (level 0) in A1, 0 turns, saved "));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = scratch("missing");
        assert!(matches!(load_game(dir.join("nope.json")), Err(SaveError::NotFound)));
        assert!(matches!(delete_save(dir.join("nope.json")), Err(SaveError::NotFound)));
    }

    #[test]
    fn test_slot_bounds() {
        let dir = scratch("bounds");
        assert!(matches!(slot_path(&dir, 0), Err(SaveError::InvalidSlot(0))));
        assert!(matches!(slot_path(&dir, 4), Err(SaveError::InvalidSlot(4))));
        assert!(slot_path(&dir, 3).unwrap().ends_with("slot3.json"));
        assert_eq!(
            SaveError::InvalidSlot(7).to_string(),
            "Invalid save slot 7 (choose 1-3)"
        );
    }
}
