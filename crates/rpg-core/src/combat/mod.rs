//! Combat system
//!
//! Implements the player-vs-enemy battle state machine and the encounter
//! rolls that start battles.

mod battle;
mod encounter;

pub use battle::{Battle, BattleEvent, BattleOutcome, BattleState, PlayerAction};
pub use encounter::{roll_for_battle, select_enemy};

/// Anything with a stat block that can take hits
pub trait Combatant {
    fn name(&self) -> &str;
    fn health(&self) -> i32;
    fn attack(&self) -> i32;
    fn defense(&self) -> i32;
    fn magic(&self) -> i32;
    fn set_health(&mut self, health: i32);

    /// Subtract damage (negative counts as 0), flooring health at 0.
    /// Returns the remaining health. Death is decided by the battle.
    fn apply_damage(&mut self, amount: i32) -> i32 {
        let remaining = (self.health() - amount.max(0)).max(0);
        self.set_health(remaining);
        remaining
    }
}

/// Damage of an attack against a defense; never negative
pub const fn damage(attack: i32, defense: i32) -> i32 {
    let raw = attack - defense;
    if raw > 0 { raw } else { 0 }
}
