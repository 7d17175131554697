//! Enemies
//!
//! Enemy templates are immutable and grouped by biome. Combat only ever
//! touches an [`Enemy`] spawned from a template.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::combat::Combatant;
use crate::world::Biome;

/// Enemy template (never mutated by combat)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub difficulty: u8,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic: i32,
    pub biome: Biome,
}

impl EnemyTemplate {
    pub fn new(
        name: impl Into<String>,
        difficulty: u8,
        health: i32,
        attack: i32,
        defense: i32,
        magic: i32,
        biome: Biome,
    ) -> Self {
        Self {
            name: name.into(),
            difficulty,
            health,
            attack,
            defense,
            magic,
            biome,
        }
    }

    /// Fresh per-encounter copy
    pub fn spawn(&self) -> Enemy {
        Enemy {
            name: self.name.clone(),
            difficulty: self.difficulty,
            health: self.health,
            attack: self.attack,
            defense: self.defense,
            magic: self.magic,
            biome: self.biome,
        }
    }
}

/// An enemy instance in a battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub difficulty: u8,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic: i32,
    pub biome: Biome,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn describe(&self) -> String {
        format!(
            "{} ({}, difficulty {}): Health: {}, Attack: {}, Defense: {}, Magic: {}",
            self.name,
            self.biome,
            self.difficulty,
            self.health.max(0),
            self.attack,
            self.defense,
            self.magic
        )
    }
}

impl Combatant for Enemy {
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

/// Enemy templates keyed by biome
#[derive(Debug, Clone, Default)]
pub struct EnemyRegistry {
    by_biome: HashMap<Biome, Vec<EnemyTemplate>>,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template: EnemyTemplate) {
        self.by_biome
            .entry(template.biome)
            .or_default()
            .push(template);
    }

    /// Templates for a biome, in insertion order
    pub fn templates(&self, biome: Biome) -> &[EnemyTemplate] {
        self.by_biome
            .get(&biome)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, name: &str) -> Option<&EnemyTemplate> {
        self.by_biome
            .values()
            .flatten()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.by_biome.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<EnemyTemplate> for EnemyRegistry {
    fn from_iter<I: IntoIterator<Item = EnemyTemplate>>(iter: I) -> Self {
        let mut registry = Self::new();
        for template in iter {
            registry.insert(template);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orc() -> EnemyTemplate {
        EnemyTemplate::new("Orc", 30, 40, 15, 10, 0, Biome::Plains)
    }

    #[test]
    fn test_spawn_is_independent_copy() {
        let template = orc();
        let mut enemy = template.spawn();
        enemy.apply_damage(25);
        assert_eq!(enemy.health, 15);
        assert_eq!(template.health, 40);
    }

    #[test]
    fn test_registry_groups_by_biome() {
        let registry: EnemyRegistry = [
            orc(),
            EnemyTemplate::new("Wolf", 20, 30, 8, 2, 0, Biome::Forest),
            EnemyTemplate::new("Bear", 60, 80, 20, 8, 0, Biome::Forest),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.templates(Biome::Forest).len(), 2);
        assert!(registry.templates(Biome::Caves).is_empty());
        assert_eq!(registry.find("orc").unwrap().attack, 15);
    }
}
