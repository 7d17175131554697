//! Default world generation
//!
//! Every zone gets a safe entry area plus one to three wild areas. Wild
//! areas get a random biome and a difficulty that grows with the distance
//! from the starting zone.

use rpg_core::world::{Biome, World, Zone, ZoneGraph, ZoneId};
use rpg_core::{GameError, GameRng, MAX_HEIGHT, MAX_WIDTH};
use strum::IntoEnumIterator;

use crate::areas::{ENTRY_AREA, area_names};
use crate::descriptions::{create_description, zone_description};
use crate::enemies::enemy_registry;

/// Most wild areas a zone can have
pub const MAX_WILD_AREAS: u32 = 3;

/// Difficulty added per step away from the starting zone
const DIFFICULTY_PER_STEP: u32 = 10;
const BASE_DIFFICULTY: u32 = 10;

/// Encounter chance for a wild area `distance` steps from A1
pub fn area_difficulty(distance: u32, rng: &mut GameRng) -> u8 {
    let value = BASE_DIFFICULTY + DIFFICULTY_PER_STEP * distance + rng.rn2(11);
    value.min(100) as u8
}

fn build_zone(id: ZoneId, height: u8, rng: &mut GameRng) -> Zone {
    // Zones are counted down each column, then across
    let index = id.col() as usize * height as usize + id.row() as usize;
    let mut zone = Zone::new(id, zone_description(index));
    zone.add_area(ENTRY_AREA, create_description(rng));

    let biomes: Vec<Biome> = Biome::iter().collect();
    let distance = id.col() as u32 + id.row() as u32;
    // The starting zone always has somewhere to go
    let wild = if distance == 0 { 2 } else { rng.rnd(MAX_WILD_AREAS) };

    for _ in 0..wild {
        let biome = rng.choose(&biomes).copied().unwrap_or(Biome::Plains);
        let names = area_names(biome);
        let start = rng.rn2(names.len() as u32) as usize;
        let Some(name) = (0..names.len())
            .map(|i| names[(start + i) % names.len()])
            .find(|n| zone.areas.iter().all(|a| a.name != *n))
        else {
            continue;
        };

        let difficulty = area_difficulty(distance, rng);
        let description = create_description(rng);
        zone.add_area(name, description)
            .with_biome(biome)
            .with_difficulty(difficulty);
    }
    zone
}

/// Generate the full `width` x `height` world with the standard enemy table
pub fn default_world(width: u8, height: u8, rng: &mut GameRng) -> Result<World, GameError> {
    if width == 0 || height == 0 || width > MAX_WIDTH || height > MAX_HEIGHT {
        return Err(GameError::InvalidSelection(format!(
            "world size {width}x{height} (1-{MAX_WIDTH} x 1-{MAX_HEIGHT})"
        )));
    }

    let graph = ZoneGraph::grid(width, height)?;
    let zones: Vec<Zone> = graph.zones().map(|id| build_zone(id, height, rng)).collect();
    let world = World::new(graph, zones, enemy_registry())?;

    tracing::info!(
        width,
        height,
        areas = world.zones().map(|z| z.areas.len()).sum::<usize>(),
        "generated world"
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_zone() {
        let mut rng = GameRng::new(1);
        let world = default_world(5, 5, &mut rng).unwrap();
        let a1 = world.zone("A1".parse().unwrap()).unwrap();

        assert_eq!(a1.description, "This is the starting zone.");
        assert_eq!(a1.areas.len(), 3);
        let entry = a1.entry_area().unwrap();
        assert_eq!(entry.name, ENTRY_AREA);
        assert!(entry.biome.is_none());
        assert!(entry.difficulty.is_none());
    }

    #[test]
    fn test_ordinals_run_down_columns() {
        let mut rng = GameRng::new(1);
        let world = default_world(5, 5, &mut rng).unwrap();
        let b2 = world.zone("B2".parse().unwrap()).unwrap();
        assert_eq!(b2.description, "This is the seventh zone.");
        let a2 = world.zone("A2".parse().unwrap()).unwrap();
        assert_eq!(a2.description, "This is the second zone.");
    }

    #[test]
    fn test_area_names_unique_per_zone() {
        let mut rng = GameRng::new(99);
        let world = default_world(8, 8, &mut rng).unwrap();
        for zone in world.zones() {
            let mut names: Vec<&str> = zone.areas.iter().map(|a| a.name.as_str()).collect();
            let count = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), count, "{}", zone.id);
            assert!(count <= 1 + MAX_WILD_AREAS as usize);
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = default_world(4, 4, &mut GameRng::new(5)).unwrap();
        let b = default_world(4, 4, &mut GameRng::new(5)).unwrap();
        let za: Vec<_> = a.zones().cloned().collect();
        let zb: Vec<_> = b.zones().cloned().collect();
        assert_eq!(za, zb);
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let mut rng = GameRng::new(1);
        assert!(default_world(0, 5, &mut rng).is_err());
        assert!(default_world(27, 5, &mut rng).is_err());
        assert!(default_world(1, 1, &mut rng).is_ok());
    }

    #[test]
    fn test_difficulty_grows_and_caps() {
        let mut rng = GameRng::new(1);
        for _ in 0..100 {
            let near = area_difficulty(0, &mut rng);
            assert!((10..=20).contains(&near));
            assert_eq!(area_difficulty(20, &mut rng), 100);
        }
    }
}
