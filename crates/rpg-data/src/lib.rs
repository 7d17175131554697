//! rpg-data: Static game data for the grid-world text RPG
//!
//! Contains enemy definitions, area names, flavor text and the default
//! world generator.

pub mod areas;
pub mod descriptions;
pub mod enemies;
pub mod world;

pub use areas::{area_names, ENTRY_AREA};
pub use descriptions::{create_description, ordinal, zone_description, STARTING_ZONE};
pub use enemies::{enemies_in, enemy_registry, EnemyDef, ENEMIES};
pub use world::{area_difficulty, default_world, MAX_WILD_AREAS};
