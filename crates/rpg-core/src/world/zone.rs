//! Zones, areas and their identifiers

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::errors::GameError;
use crate::{MAX_HEIGHT, MAX_WIDTH};

/// Grid cell identifier: column letter + 1-based row (e.g. "C4")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneId {
    // Row first so zones sort row by row
    row: u8,
    col: u8,
}

impl ZoneId {
    /// Create from 0-based column and row
    pub fn new(col: u8, row: u8) -> Result<Self, GameError> {
        if col >= MAX_WIDTH || row >= MAX_HEIGHT {
            return Err(GameError::not_found("zone", format!("({col}, {row})")));
        }
        Ok(Self { row, col })
    }

    /// 0-based column (A = 0)
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// 0-based row (1 = 0)
    pub const fn row(&self) -> u8 {
        self.row
    }

    pub fn column_letter(&self) -> char {
        (b'A' + self.col) as char
    }

    /// Whether this id falls inside a width x height grid
    pub const fn in_grid(&self, width: u8, height: u8) -> bool {
        self.col < width && self.row < height
    }

    /// The zone one step away, if it stays inside the grid
    pub fn step(&self, direction: Direction, width: u8, height: u8) -> Option<ZoneId> {
        let (dc, dr) = direction.delta();
        let col = self.col as i16 + dc as i16;
        let row = self.row as i16 + dr as i16;
        if col < 0 || row < 0 || col >= width as i16 || row >= height as i16 {
            return None;
        }
        Some(ZoneId {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Every id of a width x height grid, row by row
    pub fn grid(width: u8, height: u8) -> impl Iterator<Item = ZoneId> {
        let width = width.min(MAX_WIDTH);
        let height = height.min(MAX_HEIGHT);
        (0..height).flat_map(move |row| (0..width).map(move |col| ZoneId { row, col }))
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row as u16 + 1)
    }
}

impl FromStr for ZoneId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .ok_or_else(|| GameError::not_found("zone", s))?;
        let row: u16 = chars
            .as_str()
            .parse()
            .map_err(|_| GameError::not_found("zone", s))?;
        if row == 0 || row > MAX_HEIGHT as u16 {
            return Err(GameError::not_found("zone", s));
        }
        let col = letter.to_ascii_uppercase() as u8 - b'A';
        ZoneId::new(col, (row - 1) as u8)
    }
}

impl TryFrom<String> for ZoneId {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneId> for String {
    fn from(id: ZoneId) -> Self {
        id.to_string()
    }
}

/// Area identifier: owning zone + 0-based slot (printed "B3.2")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId {
    pub zone: ZoneId,
    pub slot: u8,
}

impl AreaId {
    pub const fn new(zone: ZoneId, slot: u8) -> Self {
        Self { zone, slot }
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.zone, self.slot as u16 + 1)
    }
}

/// Grid directions, up being row - 1
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (column delta, row delta)
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Terrain tag shared by areas and enemies
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Biome {
    Forest,
    Plains,
    Swamp,
    Caves,
    Mountains,
}

/// A sub-location inside a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    pub description: String,
    pub biome: Option<Biome>,
    /// Percent chance of an encounter on entry (0-100)
    pub difficulty: Option<u8>,
}

impl Area {
    pub fn new(id: AreaId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            biome: None,
            difficulty: None,
        }
    }

    pub fn with_biome(&mut self, biome: Biome) -> &mut Self {
        self.biome = Some(biome);
        self
    }

    /// Encounter chance, capped at 100
    pub fn with_difficulty(&mut self, difficulty: u8) -> &mut Self {
        self.difficulty = Some(difficulty.min(100));
        self
    }

    /// Owning zone
    pub fn zone(&self) -> ZoneId {
        self.id.zone
    }

    pub fn describe(&self) -> String {
        match self.biome {
            Some(biome) => format!("{} ({}): {}", self.name, biome, self.description),
            None => format!("{}: {}", self.name, self.description),
        }
    }
}

/// A grid cell of the world and the areas it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub description: String,
    /// Areas in stable order; the first is where arrivals land
    pub areas: Vec<Area>,
}

impl Zone {
    pub fn new(id: ZoneId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            areas: Vec::new(),
        }
    }

    /// Append an area in the next free slot
    pub fn add_area(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Area {
        let slot = self.areas.len() as u8;
        self.areas
            .push(Area::new(AreaId::new(self.id, slot), name, description));
        let last = self.areas.len() - 1;
        &mut self.areas[last]
    }

    /// Canonical entry area
    pub fn entry_area(&self) -> Option<&Area> {
        self.areas.first()
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        if id.zone != self.id {
            return None;
        }
        self.areas.get(id.slot as usize)
    }

    pub fn describe(&self) -> String {
        format!("Name: {}, Description: {}", self.id, self.description)
    }
}
