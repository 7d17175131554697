//! Encounter rolls and enemy selection

use crate::errors::GameError;
use crate::monster::{Enemy, EnemyRegistry};
use crate::rng::GameRng;
use crate::world::Biome;
use crate::ENCOUNTER_ROLL_MAX;

/// Roll 1..=100; a battle happens when the roll is at most `difficulty`.
///
/// Difficulty is therefore the percent chance of an encounter: 0 never
/// fights, 100 always does.
pub fn roll_for_battle(difficulty: u8, rng: &mut GameRng) -> bool {
    let roll = rng.rnd(ENCOUNTER_ROLL_MAX);
    let fight = roll <= difficulty as u32;
    tracing::trace!(roll, difficulty, fight, "encounter roll");
    fight
}

/// Pick an enemy of `biome` no harder than `difficulty`.
///
/// Eligible templates are weighted by their own difficulty, so harder
/// ones come up more often. If every eligible template has difficulty 0
/// the pick is uniform. The returned enemy is a fresh copy.
pub fn select_enemy(
    registry: &EnemyRegistry,
    biome: Biome,
    difficulty: u8,
    rng: &mut GameRng,
) -> Result<Enemy, GameError> {
    let candidates: Vec<_> = registry
        .templates(biome)
        .iter()
        .filter(|t| t.difficulty <= difficulty)
        .collect();

    if candidates.is_empty() {
        return Err(GameError::NoValidEnemies {
            biome: biome.to_string(),
            difficulty,
        });
    }

    let weights: Vec<u32> = candidates.iter().map(|t| t.difficulty as u32).collect();
    let picked = match rng.weighted_index(&weights) {
        Some(idx) => candidates[idx],
        None => candidates[rng.rn2(candidates.len() as u32) as usize],
    };

    tracing::debug!(enemy = %picked.name, %biome, difficulty, "enemy selected");
    Ok(picked.spawn())
}
