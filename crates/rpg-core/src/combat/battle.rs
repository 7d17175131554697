//! Turn-based battle between the player and one enemy
//!
//! `Intro -> PlayerTurn -> EnemyTurn -> PlayerTurn ...` until one of the
//! terminal states `Victory`, `Defeat`, `Fled` or `Forfeited` is reached.
//! Each step returns the events it produced so a front end can narrate
//! them; nothing here prints.

use core::fmt;

use super::{Combatant, damage};
use crate::errors::GameError;
use crate::monster::Enemy;
use crate::player::{AttackMove, Character};
use crate::rng::GameRng;

/// What the player chose to do on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Use an owned move, 1-based index
    Attack { move_index: usize },
    UseMagic,
    Run,
    Forfeit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleState {
    Intro,
    PlayerTurn,
    /// Enemy replies; carries the move the player just used, if any
    EnemyTurn(Option<AttackMove>),
    Victory,
    Defeat,
    Fled,
    Forfeited,
}

impl BattleState {
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self {
            BattleState::Victory => Some(BattleOutcome::Victory),
            BattleState::Defeat => Some(BattleOutcome::Defeat),
            BattleState::Fled => Some(BattleOutcome::Fled),
            BattleState::Forfeited => Some(BattleOutcome::Forfeited),
            _ => None,
        }
    }
}

/// Terminal result of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
    /// The player gave up; the driver decides whether that ends the program
    Forfeited,
}

/// Something that happened during a battle step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    Appeared {
        enemy: String,
        health: i32,
    },
    PlayerAttacked {
        move_name: String,
        damage: i32,
        enemy_health: i32,
    },
    PlayerCastMagic {
        damage: i32,
        enemy_health: i32,
    },
    EnemyDefeated {
        enemy: String,
    },
    Rewarded {
        experience: u32,
        gold: u32,
        levels_gained: u32,
    },
    Parried {
        enemy: String,
    },
    ParryFailed {
        enemy: String,
        damage: i32,
    },
    EnemyAttacked {
        enemy: String,
        damage: i32,
        player_health: i32,
    },
    PlayerDefeated,
    FleeSucceeded,
    FleeFailed,
    Forfeited,
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Appeared { enemy, health } => {
                write!(f, "A wild {enemy} appears! It has {} health.", health.max(&0))
            }
            BattleEvent::PlayerAttacked {
                move_name,
                damage,
                enemy_health,
            } => write!(
                f,
                "You use {move_name} and deal {damage} damage. The enemy has {} health left.",
                enemy_health.max(&0)
            ),
            BattleEvent::PlayerCastMagic {
                damage,
                enemy_health,
            } => write!(
                f,
                "You cast a spell and deal {damage} damage. The enemy has {} health left.",
                enemy_health.max(&0)
            ),
            BattleEvent::EnemyDefeated { enemy } => write!(f, "You defeated the {enemy}!"),
            BattleEvent::Rewarded {
                experience,
                gold,
                levels_gained,
            } => {
                write!(f, "You gain {experience} experience and {gold} gold.")?;
                if *levels_gained > 0 {
                    write!(f, " You reached a new level!")?;
                }
                Ok(())
            }
            BattleEvent::Parried { enemy } => write!(f, "You parried the {enemy}'s attack!"),
            BattleEvent::ParryFailed { enemy, damage } => write!(
                f,
                "You failed to parry the {enemy}'s attack and take {damage} damage."
            ),
            BattleEvent::EnemyAttacked {
                enemy,
                damage,
                player_health,
            } => write!(
                f,
                "The {enemy} attacks you for {damage} damage. You have {} health left.",
                player_health.max(&0)
            ),
            BattleEvent::PlayerDefeated => write!(f, "You have been defeated..."),
            BattleEvent::FleeSucceeded => write!(f, "You got away safely."),
            BattleEvent::FleeFailed => write!(f, "You couldn't get away!"),
            BattleEvent::Forfeited => write!(f, "You forfeit the battle."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Battle {
    enemy: Enemy,
    state: BattleState,
    /// Percent chance for Run to succeed
    flee_chance: u32,
    rounds: u32,
}

impl Battle {
    pub fn new(enemy: Enemy, flee_chance: u32) -> Self {
        Self {
            enemy,
            state: BattleState::Intro,
            flee_chance: flee_chance.min(100),
            rounds: 0,
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.state.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Completed player turns
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Announce the enemy and hand the first turn to the player
    pub fn begin(&mut self) -> Result<Vec<BattleEvent>, GameError> {
        self.ensure_state(|s| matches!(s, BattleState::Intro))?;
        self.state = BattleState::PlayerTurn;
        tracing::debug!(enemy = %self.enemy.name, "battle started");
        Ok(vec![BattleEvent::Appeared {
            enemy: self.enemy.name.clone(),
            health: self.enemy.health,
        }])
    }

    /// Resolve the player's choice.
    ///
    /// An out-of-range move index fails with `InvalidSelection` and leaves
    /// the battle untouched so the caller can ask again.
    pub fn player_action(
        &mut self,
        player: &mut Character,
        action: PlayerAction,
        rng: &mut GameRng,
    ) -> Result<Vec<BattleEvent>, GameError> {
        self.ensure_state(|s| matches!(s, BattleState::PlayerTurn))?;

        let mut events = Vec::new();
        match action {
            PlayerAction::Attack { move_index } => {
                let chosen = player.move_at(move_index).cloned().ok_or_else(|| {
                    GameError::InvalidSelection(format!(
                        "move {move_index} (choose 1-{})",
                        player.moves.len()
                    ))
                })?;
                let dealt = damage(chosen.damage, self.enemy.defense);
                let remaining = self.enemy.apply_damage(dealt);
                events.push(BattleEvent::PlayerAttacked {
                    move_name: chosen.name.clone(),
                    damage: dealt,
                    enemy_health: remaining,
                });
                self.after_player_hit(player, Some(chosen), &mut events);
            }
            PlayerAction::UseMagic => {
                let dealt = damage(player.magic, self.enemy.magic);
                let remaining = self.enemy.apply_damage(dealt);
                events.push(BattleEvent::PlayerCastMagic {
                    damage: dealt,
                    enemy_health: remaining,
                });
                self.after_player_hit(player, None, &mut events);
            }
            PlayerAction::Run => {
                if rng.percent(self.flee_chance) {
                    self.state = BattleState::Fled;
                    events.push(BattleEvent::FleeSucceeded);
                } else {
                    events.push(BattleEvent::FleeFailed);
                }
            }
            PlayerAction::Forfeit => {
                self.state = BattleState::Forfeited;
                events.push(BattleEvent::Forfeited);
            }
        }

        self.rounds += 1;
        tracing::trace!(round = self.rounds, state = ?self.state, "player acted");
        Ok(events)
    }

    fn after_player_hit(
        &mut self,
        player: &mut Character,
        used: Option<AttackMove>,
        events: &mut Vec<BattleEvent>,
    ) {
        if self.enemy.health > 0 {
            self.state = BattleState::EnemyTurn(used);
            return;
        }

        self.state = BattleState::Victory;
        events.push(BattleEvent::EnemyDefeated {
            enemy: self.enemy.name.clone(),
        });

        let experience = self.enemy.difficulty as u32;
        let gold = experience / 2;
        player.gold += gold;
        let levels_gained = player.gain_experience(experience);
        events.push(BattleEvent::Rewarded {
            experience,
            gold,
            levels_gained,
        });
    }

    /// The enemy's reply to a non-lethal player turn.
    ///
    /// A defensive move adds its bonus to the player's defense for this one
    /// hit only; the stored defense is never changed.
    pub fn enemy_action(&mut self, player: &mut Character) -> Result<Vec<BattleEvent>, GameError> {
        self.ensure_state(|s| matches!(s, BattleState::EnemyTurn(_)))?;
        let used = match core::mem::replace(&mut self.state, BattleState::PlayerTurn) {
            BattleState::EnemyTurn(used) => used,
            other => {
                self.state = other;
                return Err(GameError::NotYourTurn);
            }
        };

        let mut events = Vec::new();
        let guard = used.filter(|m| m.defensive);
        let defense = match &guard {
            Some(m) => {
                let effective = player.defense + m.defense_bonus;
                let parry = damage(self.enemy.attack, effective);
                if parry == 0 {
                    events.push(BattleEvent::Parried {
                        enemy: self.enemy.name.clone(),
                    });
                } else {
                    events.push(BattleEvent::ParryFailed {
                        enemy: self.enemy.name.clone(),
                        damage: parry,
                    });
                }
                effective
            }
            None => player.defense,
        };

        let dealt = damage(self.enemy.attack, defense);
        let remaining = player.apply_damage(dealt);
        events.push(BattleEvent::EnemyAttacked {
            enemy: self.enemy.name.clone(),
            damage: dealt,
            player_health: remaining,
        });

        if player.health <= 0 {
            self.state = BattleState::Defeat;
            events.push(BattleEvent::PlayerDefeated);
        }
        Ok(events)
    }

    /// Player action followed by the enemy's reply when one is due
    pub fn resolve_round(
        &mut self,
        player: &mut Character,
        action: PlayerAction,
        rng: &mut GameRng,
    ) -> Result<Vec<BattleEvent>, GameError> {
        let mut events = self.player_action(player, action, rng)?;
        if matches!(self.state, BattleState::EnemyTurn(_)) {
            events.extend(self.enemy_action(player)?);
        }
        Ok(events)
    }

    fn ensure_state(&self, expected: impl Fn(&BattleState) -> bool) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::BattleOver);
        }
        if !expected(&self.state) {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }
}
