//! Rejection reasons for battle intents.

use super::{Intent, Phase};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BoardError, Position, Team, UnitError, UnitId};

/// Why an intent was rejected. A rejected intent never changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("the battle is over")]
    GameOver,

    #[error("{intent} is not allowed during the {phase} phase")]
    WrongPhase { phase: Phase, intent: Intent },

    #[error("no unit is selected")]
    NoSelection,

    #[error("unit {0} is not on the battlefield")]
    UnknownUnit(UnitId),

    #[error("unit {unit} belongs to {team}, not the active team")]
    NotActiveTeam { unit: UnitId, team: Team },

    #[error("unit {0} has already acted this turn")]
    AlreadyActed(UnitId),

    #[error("unit {0} cannot move now")]
    CannotMove(UnitId),

    #[error("{destination} is not reachable")]
    Unreachable { destination: Position },

    #[error("unit {0} is not a hostile target")]
    NotHostile(UnitId),

    #[error("unit {0} is not an ally")]
    NotAlly(UnitId),

    #[error("unit {target} is out of range ({distance} tiles)")]
    OutOfRange { target: UnitId, distance: u32 },

    #[error("unit {0} has no healing staff equipped")]
    NoHealingStaff(UnitId),

    #[error("unit {0} is not wounded")]
    NotWounded(UnitId),

    #[error("there is no move to undo")]
    NothingToUndo,

    #[error("{position} is not an escape point")]
    NotAnEscapePoint { position: Position },

    #[error("unit {0} already exists")]
    DuplicateUnit(UnitId),

    #[error("unit {0} is defeated")]
    Defeated(UnitId),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Board(e) => e.severity(),
            ActionError::Unit(e) => e.severity(),
            ActionError::Unreachable { .. }
            | ActionError::OutOfRange { .. }
            | ActionError::NotWounded(_) => ErrorSeverity::Recoverable,
            ActionError::DuplicateUnit(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::GameOver => "ACTION_GAME_OVER",
            ActionError::WrongPhase { .. } => "ACTION_WRONG_PHASE",
            ActionError::NoSelection => "ACTION_NO_SELECTION",
            ActionError::UnknownUnit(_) => "ACTION_UNKNOWN_UNIT",
            ActionError::NotActiveTeam { .. } => "ACTION_NOT_ACTIVE_TEAM",
            ActionError::AlreadyActed(_) => "ACTION_ALREADY_ACTED",
            ActionError::CannotMove(_) => "ACTION_CANNOT_MOVE",
            ActionError::Unreachable { .. } => "ACTION_UNREACHABLE",
            ActionError::NotHostile(_) => "ACTION_NOT_HOSTILE",
            ActionError::NotAlly(_) => "ACTION_NOT_ALLY",
            ActionError::OutOfRange { .. } => "ACTION_OUT_OF_RANGE",
            ActionError::NoHealingStaff(_) => "ACTION_NO_HEALING_STAFF",
            ActionError::NotWounded(_) => "ACTION_NOT_WOUNDED",
            ActionError::NothingToUndo => "ACTION_NOTHING_TO_UNDO",
            ActionError::NotAnEscapePoint { .. } => "ACTION_NOT_AN_ESCAPE_POINT",
            ActionError::DuplicateUnit(_) => "ACTION_DUPLICATE_UNIT",
            ActionError::Defeated(_) => "ACTION_DEFEATED",
            ActionError::Board(e) => e.error_code(),
            ActionError::Unit(e) => e.error_code(),
        }
    }
}
