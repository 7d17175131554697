//! Attack moves

use serde::{Deserialize, Serialize};

/// A named combat action with a damage value and optional defensive bonus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackMove {
    pub name: String,
    pub damage: i32,
    pub defensive: bool,
    /// Defense added for the next incoming hit; 0 unless defensive
    pub defense_bonus: i32,
}

impl AttackMove {
    pub fn new(name: impl Into<String>, damage: i32) -> Self {
        Self {
            name: name.into(),
            damage,
            defensive: false,
            defense_bonus: 0,
        }
    }

    pub fn defensive(name: impl Into<String>, damage: i32, defense_bonus: i32) -> Self {
        Self {
            name: name.into(),
            damage,
            defensive: true,
            defense_bonus,
        }
    }

    pub fn describe(&self) -> String {
        if self.defensive {
            format!(
                "{} (damage {}, +{} defense)",
                self.name, self.damage, self.defense_bonus
            )
        } else {
            format!("{} (damage {})", self.name, self.damage)
        }
    }
}
