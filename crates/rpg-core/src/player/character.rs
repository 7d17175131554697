//! The player character

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{AttackMove, ClassKind};
use crate::combat::Combatant;
use crate::errors::GameError;
use crate::{
    ATTACK_INCREMENT, DEFENSE_INCREMENT, EXP_PER_LEVEL, HEALTH_INCREMENT, MAGIC_INCREMENT,
    POINTS_PER_LEVEL, STARTING_POINTS,
};

/// Stats a point can be spent on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Stat {
    Health,
    Attack,
    Defense,
    Magic,
}

impl Stat {
    /// Amount one point adds
    pub const fn increment(&self) -> i32 {
        match self {
            Stat::Health => HEALTH_INCREMENT,
            Stat::Attack => ATTACK_INCREMENT,
            Stat::Defense => DEFENSE_INCREMENT,
            Stat::Magic => MAGIC_INCREMENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    class: ClassKind,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic: i32,
    pub level: u32,
    pub experience: u32,
    pub gold: u32,
    pub points: u32,
    pub moves: Vec<AttackMove>,
}

impl Character {
    /// Build a fresh character from a class preset
    pub fn new(name: impl Into<String>, class: ClassKind) -> Self {
        let preset = class.preset();
        Self {
            name: name.into(),
            class,
            health: preset.health,
            max_health: preset.health,
            attack: preset.attack,
            defense: preset.defense,
            magic: preset.magic,
            level: 0,
            experience: 0,
            gold: 0,
            points: STARTING_POINTS,
            moves: class.starting_moves(),
        }
    }

    /// Class is fixed at creation
    pub fn class(&self) -> ClassKind {
        self.class
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Spend one point on a stat. Returns the stat's new value.
    pub fn upgrade_stat(&mut self, stat: Stat) -> Result<i32, GameError> {
        if self.points == 0 {
            return Err(GameError::NoPointsRemaining);
        }
        let amount = stat.increment();
        let value = match stat {
            Stat::Health => {
                self.health += amount;
                self.max_health += amount;
                self.health
            }
            Stat::Attack => {
                self.attack += amount;
                self.attack
            }
            Stat::Defense => {
                self.defense += amount;
                self.defense
            }
            Stat::Magic => {
                self.magic += amount;
                self.magic
            }
        };
        self.points -= 1;
        Ok(value)
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Health => self.health,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Magic => self.magic,
        }
    }

    /// Experience still needed for the next level
    pub fn exp_to_next_level(&self) -> u32 {
        (EXP_PER_LEVEL * (self.level + 1)).saturating_sub(self.experience)
    }

    /// Add experience, leveling up as thresholds are crossed.
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut gained = 0;
        loop {
            let needed = EXP_PER_LEVEL * (self.level + 1);
            if self.experience < needed {
                break;
            }
            self.experience -= needed;
            self.level += 1;
            self.points += POINTS_PER_LEVEL;
            gained += 1;
        }
        gained
    }

    /// 1-based lookup used by the battle menu
    pub fn move_at(&self, index: usize) -> Option<&AttackMove> {
        index.checked_sub(1).and_then(|i| self.moves.get(i))
    }

    pub fn describe(&self) -> String {
        format!(
            "Class: {}, Name: {}, Health: {}/{}, Attack: {}, Defense: {}, Magic: {}, \
             Level: {}, Exp: {}, Gold: {}, Points: {}",
            self.class,
            self.name,
            self.health.max(0),
            self.max_health,
            self.attack,
            self.defense,
            self.magic,
            self.level,
            self.experience,
            self.gold,
            self.points
        )
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn attack(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn magic(&self) -> i32 {
        self.magic
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }
}
