//! Player system
//!
//! Contains the Character struct, classes and attack moves.

mod character;
mod class;
mod moves;

pub use character::{Character, Stat};
pub use class::{ClassKind, StatPreset};
pub use moves::AttackMove;
