//! Generated world driven through the core game state

use proptest::prelude::*;
use rpg_core::navigation::list_reachable_zones;
use rpg_core::player::{Character, ClassKind};
use rpg_core::world::Direction;
use rpg_core::{AreaEntry, GameRng, GameState};
use rpg_data::default_world;

#[test]
fn test_walk_to_far_corner() {
    let world = default_world(5, 5, &mut GameRng::new(8)).unwrap();
    let player = Character::new("Melon", ClassKind::Warrior);
    let mut game = GameState::new(player, &world, GameRng::new(8)).unwrap();

    for direction in [Direction::Right; 4].into_iter().chain([Direction::Down; 4]) {
        // Entry areas are safe, so zone moves never start a battle
        let entry = game.move_direction(&world, direction).unwrap();
        assert!(entry.is_quiet());
    }
    assert_eq!(game.position.zone.to_string(), "E5");
    assert_eq!(game.turns, 8);
    assert!(game.move_direction(&world, Direction::Right).is_err());
}

#[test]
fn test_wild_areas_can_start_battles() {
    let world = default_world(5, 5, &mut GameRng::new(2)).unwrap();
    let player = Character::new("Melon", ClassKind::Rogue);
    let mut game = GameState::new(player, &world, GameRng::new(2)).unwrap();

    let wild = world.areas_of(game.position.zone).unwrap()[1].id;
    game.move_area(&world, wild).unwrap();
    let fought = (0..300).any(|_| matches!(game.enter_area(&world).unwrap(), AreaEntry::Encounter(_)));
    assert!(fought);
}

proptest! {
    #[test]
    fn prop_generated_world_is_consistent(seed in any::<u64>(), w in 1u8..=7, h in 1u8..=7) {
        let world = default_world(w, h, &mut GameRng::new(seed)).unwrap();
        prop_assert_eq!(world.zones().count(), w as usize * h as usize);

        for zone in world.zones() {
            let entry = zone.entry_area().unwrap();
            prop_assert!(entry.difficulty.is_none());
            for area in &zone.areas {
                prop_assert_eq!(area.zone(), zone.id);
                if let Some(d) = area.difficulty {
                    prop_assert!(d <= 100);
                    prop_assert!(area.biome.is_some());
                }
            }
        }

        let player = Character::new("P", ClassKind::Mage);
        let game = GameState::new(player, &world, GameRng::new(seed)).unwrap();
        let reachable = list_reachable_zones(&world, &game.position).unwrap();
        prop_assert_eq!(reachable.len(), (w > 1) as usize + (h > 1) as usize);
    }
}
