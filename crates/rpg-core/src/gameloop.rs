//! Game state and turn handling
//!
//! `GameState` is everything a save file needs: the player, where they
//! stand, the RNG and turn counter. The world itself is immutable and
//! passed in by reference.

use serde::{Deserialize, Serialize};

use crate::combat::{roll_for_battle, select_enemy, Battle, BattleEvent, BattleOutcome, PlayerAction};
use crate::errors::GameError;
use crate::navigation;
use crate::player::{Character, Stat};
use crate::rng::GameRng;
use crate::world::{Area, AreaId, Direction, World, ZoneId};
use crate::{DEFAULT_FLEE_CHANCE, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// The single place the player occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub zone: ZoneId,
    pub area: AreaId,
}

impl Position {
    /// Standing in the entry area of `zone`
    pub fn at_entry(world: &World, zone: ZoneId) -> Result<Self, GameError> {
        let area = world.entry_area(zone)?;
        Ok(Self {
            zone,
            area: area.id,
        })
    }

    pub fn is_in_zone(&self, zone: ZoneId) -> bool {
        self.zone == zone
    }

    pub fn is_in_area(&self, area: AreaId) -> bool {
        self.area == area
    }
}

/// What happened on arriving in an area
#[derive(Debug, Clone)]
pub enum AreaEntry {
    /// Nothing attacked
    Quiet,
    /// A battle is about to start
    Encounter(Battle),
}

impl AreaEntry {
    pub fn is_quiet(&self) -> bool {
        matches!(self, AreaEntry::Quiet)
    }
}

/// Main game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Character,

    pub position: Position,

    pub rng: GameRng,

    /// Successful moves so far
    pub turns: u64,

    /// Grid size of the world this game was started in
    #[serde(default = "default_world_size")]
    pub world_size: (u8, u8),

    /// Percent chance for Run to succeed
    #[serde(default = "default_flee_chance")]
    pub flee_chance: u32,

    /// Messages for the current turn
    #[serde(skip)]
    pub messages: Vec<String>,
}

fn default_flee_chance() -> u32 {
    DEFAULT_FLEE_CHANCE
}

fn default_world_size() -> (u8, u8) {
    (DEFAULT_WIDTH, DEFAULT_HEIGHT)
}

impl GameState {
    /// New game in the entry area of the first zone (A1)
    pub fn new(player: Character, world: &World, rng: GameRng) -> Result<Self, GameError> {
        let start = ZoneId::new(0, 0)?;
        let position = Position::at_entry(world, start)?;
        tracing::info!(player = %player.name, class = %player.class(), zone = %start, "new game");
        Ok(Self {
            player,
            position,
            rng,
            turns: 0,
            world_size: (world.width(), world.height()),
            flee_chance: DEFAULT_FLEE_CHANCE,
            messages: Vec::new(),
        })
    }

    pub fn with_flee_chance(mut self, flee_chance: u32) -> Self {
        self.flee_chance = flee_chance.min(100);
        self
    }

    /// Add a message to display
    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Take every pending message, oldest first
    pub fn drain_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    pub fn is_player_here(&self, zone: ZoneId) -> bool {
        self.position.is_in_zone(zone)
    }

    pub fn current_area<'w>(&self, world: &'w World) -> Result<&'w Area, GameError> {
        world.area(self.position.area)
    }

    /// Move to an adjacent zone, then roll for an encounter on arrival
    pub fn move_zone(&mut self, world: &World, target: ZoneId) -> Result<AreaEntry, GameError> {
        let entry = navigation::move_zone(world, &mut self.position, target)?;
        self.message(entry.describe());
        self.turns += 1;
        self.enter_area(world)
    }

    pub fn move_direction(
        &mut self,
        world: &World,
        direction: Direction,
    ) -> Result<AreaEntry, GameError> {
        let entry = navigation::move_direction(world, &mut self.position, direction)?;
        self.message(entry.describe());
        self.turns += 1;
        self.enter_area(world)
    }

    /// Move to another area of the current zone, rolling for an encounter
    pub fn move_area(&mut self, world: &World, target: AreaId) -> Result<AreaEntry, GameError> {
        let area = navigation::move_area(world, &mut self.position, target)?;
        self.message(format!("You are now in {}", area.describe()));
        self.turns += 1;
        self.enter_area(world)
    }

    /// Roll for a battle in the current area.
    ///
    /// Areas without a biome or difficulty are always safe, and an area
    /// whose biome has no enemy weak enough is quiet too.
    pub fn enter_area(&mut self, world: &World) -> Result<AreaEntry, GameError> {
        let area = self.current_area(world)?;
        let (Some(biome), Some(difficulty)) = (area.biome, area.difficulty) else {
            return Ok(AreaEntry::Quiet);
        };

        if !roll_for_battle(difficulty, &mut self.rng) {
            return Ok(AreaEntry::Quiet);
        }

        match select_enemy(world.enemies(), biome, difficulty, &mut self.rng) {
            Ok(enemy) => {
                tracing::info!(enemy = %enemy.name, area = %area.id, "encounter");
                Ok(AreaEntry::Encounter(Battle::new(enemy, self.flee_chance)))
            }
            Err(GameError::NoValidEnemies { .. }) => {
                tracing::debug!(area = %area.id, "encounter rolled but no enemy fits");
                Ok(AreaEntry::Quiet)
            }
            Err(e) => Err(e),
        }
    }

    /// Open a battle, queueing the intro as messages
    pub fn start_battle(&mut self, battle: &mut Battle) -> Result<Vec<BattleEvent>, GameError> {
        let events = battle.begin()?;
        for event in &events {
            self.message(event.to_string());
        }
        Ok(events)
    }

    /// Run one battle round with this state's player and RNG.
    ///
    /// Every event is also queued as a message.
    pub fn fight(
        &mut self,
        battle: &mut Battle,
        action: PlayerAction,
    ) -> Result<Vec<BattleEvent>, GameError> {
        let events = battle.resolve_round(&mut self.player, action, &mut self.rng)?;
        for event in &events {
            self.message(event.to_string());
        }
        if let Some(outcome) = battle.outcome() {
            self.conclude(outcome);
        }
        Ok(events)
    }

    fn conclude(&mut self, outcome: BattleOutcome) {
        tracing::info!(?outcome, player = %self.player.name, "battle over");
        if outcome == BattleOutcome::Victory && self.player.points > 0 {
            self.message(format!(
                "You have {} stat point(s) to spend.",
                self.player.points
            ));
        }
    }

    pub fn upgrade_stat(&mut self, stat: Stat) -> Result<i32, GameError> {
        let value = self.player.upgrade_stat(stat)?;
        self.message(format!(
            "Your {stat} is now {value}. Remaining points: {}",
            self.player.points
        ));
        Ok(value)
    }
}
