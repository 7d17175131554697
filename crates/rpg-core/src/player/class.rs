//! Character classes and their starting presets

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::AttackMove;

/// Player class
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ClassKind {
    #[default]
    Warrior,
    Mage,
    Rogue,
}

/// Base stats a class starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatPreset {
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic: i32,
}

impl ClassKind {
    pub const fn preset(&self) -> StatPreset {
        match self {
            ClassKind::Warrior => StatPreset {
                health: 100,
                attack: 15,
                defense: 10,
                magic: 5,
            },
            ClassKind::Mage => StatPreset {
                health: 75,
                attack: 5,
                defense: 5,
                magic: 15,
            },
            ClassKind::Rogue => StatPreset {
                health: 50,
                attack: 15,
                defense: 0,
                magic: 5,
            },
        }
    }

    pub fn starting_moves(&self) -> Vec<AttackMove> {
        match self {
            ClassKind::Warrior => vec![
                AttackMove::new("Slash", 10),
                AttackMove::defensive("Shield Block", 4, 10),
                AttackMove::new("Cleave", 18),
            ],
            ClassKind::Mage => vec![
                AttackMove::new("Staff Strike", 6),
                AttackMove::new("Arcane Bolt", 16),
                AttackMove::defensive("Mana Ward", 2, 12),
            ],
            ClassKind::Rogue => vec![
                AttackMove::new("Stab", 12),
                AttackMove::defensive("Parry", 3, 8),
                AttackMove::new("Backstab", 20),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_presets() {
        assert_eq!(
            ClassKind::Warrior.preset(),
            StatPreset {
                health: 100,
                attack: 15,
                defense: 10,
                magic: 5
            }
        );
        assert_eq!(ClassKind::Mage.preset().magic, 15);
        assert_eq!(ClassKind::Rogue.preset().defense, 0);
    }

    #[test]
    fn test_parse_class_name() {
        assert_eq!("warrior".parse::<ClassKind>().unwrap(), ClassKind::Warrior);
        assert_eq!("MAGE".parse::<ClassKind>().unwrap(), ClassKind::Mage);
        assert!("Warrior('x'); import os".parse::<ClassKind>().is_err());
    }

    #[test]
    fn test_every_class_has_a_defensive_move() {
        for class in ClassKind::iter() {
            let moves = class.starting_moves();
            assert!(!moves.is_empty());
            assert!(moves.iter().any(|m| m.defensive), "{class} lacks a defensive move");
        }
    }
}
