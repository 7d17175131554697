//! Enemy definitions
//!
//! Static enemy table, grouped by biome. Difficulty doubles as the
//! encounter weight, so a higher number also means the enemy shows up more
//! often once an area is dangerous enough.

use rpg_core::monster::{EnemyRegistry, EnemyTemplate};
use rpg_core::world::Biome;
use strum::IntoEnumIterator;

/// Static enemy definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDef {
    pub name: &'static str,
    /// 0-100
    pub difficulty: u8,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic: i32,
    pub biome: Biome,
}

impl EnemyDef {
    const fn new(
        name: &'static str,
        difficulty: u8,
        health: i32,
        attack: i32,
        defense: i32,
        magic: i32,
        biome: Biome,
    ) -> Self {
        Self {
            name,
            difficulty,
            health,
            attack,
            defense,
            magic,
            biome,
        }
    }

    pub fn template(&self) -> EnemyTemplate {
        EnemyTemplate::new(
            self.name,
            self.difficulty,
            self.health,
            self.attack,
            self.defense,
            self.magic,
            self.biome,
        )
    }
}

pub static ENEMIES: &[EnemyDef] = &[
    // Forest
    EnemyDef::new("Sprite", 5, 12, 6, 0, 8, Biome::Forest),
    EnemyDef::new("Wolf", 20, 30, 12, 2, 0, Biome::Forest),
    EnemyDef::new("Treant", 50, 90, 18, 12, 0, Biome::Forest),
    EnemyDef::new("Bear", 65, 80, 24, 8, 0, Biome::Forest),
    // Plains
    EnemyDef::new("Rat", 5, 10, 8, 0, 0, Biome::Plains),
    EnemyDef::new("Bandit", 15, 25, 13, 3, 0, Biome::Plains),
    EnemyDef::new("Orc", 30, 40, 15, 10, 0, Biome::Plains),
    EnemyDef::new("Centaur", 55, 70, 22, 10, 6, Biome::Plains),
    // Swamp
    EnemyDef::new("Leech", 5, 8, 7, 0, 0, Biome::Swamp),
    EnemyDef::new("Bog Witch", 35, 35, 10, 4, 20, Biome::Swamp),
    EnemyDef::new("Hydra", 80, 120, 26, 12, 10, Biome::Swamp),
    // Caves
    EnemyDef::new("Bat", 10, 12, 9, 0, 0, Biome::Caves),
    EnemyDef::new("Goblin", 25, 28, 14, 5, 0, Biome::Caves),
    EnemyDef::new("Troll", 60, 100, 25, 14, 0, Biome::Caves),
    // Mountains
    EnemyDef::new("Goat", 10, 20, 10, 4, 0, Biome::Mountains),
    EnemyDef::new("Harpy", 40, 45, 18, 6, 8, Biome::Mountains),
    EnemyDef::new("Dragon", 95, 200, 35, 20, 25, Biome::Mountains),
];

/// Every enemy of one biome, in table order
pub fn enemies_in(biome: Biome) -> impl Iterator<Item = &'static EnemyDef> {
    ENEMIES.iter().filter(move |e| e.biome == biome)
}

/// Registry holding a template for every table entry, biome by biome
pub fn enemy_registry() -> EnemyRegistry {
    Biome::iter()
        .flat_map(enemies_in)
        .map(EnemyDef::template)
        .collect()
}
