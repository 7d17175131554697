//! Game errors
//!
//! Every failure the core can report to a front end. None of these are
//! fatal to the process; `NotFound` points at bad world data.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("You can't go that way: {reason}")]
    InvalidMove { reason: String },

    #[error("There are no other areas in zone {zone}")]
    NoOtherAreas { zone: String },

    #[error("Unknown {kind}: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("You have no points left.")]
    NoPointsRemaining,

    #[error("No enemy in {biome} is weak enough for difficulty {difficulty}")]
    NoValidEnemies { biome: String, difficulty: u8 },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("The battle is already over")]
    BattleOver,

    #[error("It is not your turn")]
    NotYourTurn,
}

impl GameError {
    pub(crate) fn invalid_move(reason: impl Into<String>) -> Self {
        GameError::InvalidMove {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        GameError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Whether the caller should simply re-prompt the player
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GameError::invalid_move("B2 is not next to E5");
        assert!(err.to_string().contains("B2 is not next to E5"));

        let err = GameError::not_found("zone", "Z9");
        assert_eq!(err.to_string(), "Unknown zone: Z9");
    }

    #[test]
    fn test_not_found_is_not_recoverable() {
        assert!(!GameError::not_found("area", "A1.9").is_recoverable());
        assert!(GameError::NoPointsRemaining.is_recoverable());
        assert!(GameError::invalid_move("border").is_recoverable());
    }
}
