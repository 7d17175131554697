//! rpg-core: Core game logic for the grid-world text RPG
//!
//! This crate contains all game logic with no I/O dependencies.
//! Front ends drive it through query and command methods; everything
//! that reaches the player comes back as values or messages.

pub mod combat;
pub mod monster;
pub mod navigation;
pub mod player;
pub mod world;

mod consts;
mod errors;
mod gameloop;
mod rng;

pub use consts::*;
pub use errors::GameError;
pub use gameloop::{AreaEntry, GameState, Position};
pub use rng::GameRng;
