//! Errors surfaced by the session API
//!
//! The simulation core itself never fails: stale entity ids are no-ops. Only
//! host-facing operations (phase commands, tuning overrides) return errors.

use std::fmt;

use crate::sim::GamePhase;

/// Phase-advance commands a host can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Player accepted the opening prompt
    Start,
    /// Player asked for a fresh run
    Restart,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Restart => write!(f, "restart"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Command is not legal from the current phase
    InvalidTransition { from: GamePhase, command: Command },
    /// A tuning value is outside its usable range
    InvalidTuning { field: &'static str, reason: String },
    /// Tuning override could not be parsed
    TuningParse(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, command } => {
                write!(f, "cannot {command} while in {from:?} phase")
            }
            Self::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
            Self::TuningParse(msg) => write!(f, "failed to parse tuning: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::TuningParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_transition() {
        let err = GameError::InvalidTransition {
            from: GamePhase::Playing,
            command: Command::Start,
        };
        assert_eq!(err.to_string(), "cannot start while in Playing phase");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: GameError = json_err.into();
        assert!(matches!(err, GameError::TuningParse(_)));
    }
}
