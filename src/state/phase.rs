//! Session state machine.
//!
//! # State Diagram
//!
//! ```text
//! ┌───────────┐     start      ┌───────────┐
//! │  Waiting  │───────────────▶│  Started  │
//! └───────────┘                └─────┬─────┘
//!   ▲    │ reset                     │ reset
//!   │    ▼                           │
//!   └────┴───────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Accepting joins, no cards dealt
    #[default]
    Waiting,

    /// Hands dealt
    Started,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Started => "started",
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase transition events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Start,
    Reset,
}

/// Error when a phase transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid transition from {from} via {event:?}: {reason}")]
pub struct InvalidTransition {
    pub from: SessionPhase,
    pub event: PhaseEvent,
    pub reason: &'static str,
}

impl SessionPhase {
    /// Calculate the next phase for an event.
    pub fn transition(self, event: PhaseEvent) -> Result<Self, InvalidTransition> {
        use PhaseEvent::*;
        use SessionPhase::*;

        match (self, event) {
            (Waiting, Start) => Ok(Started),
            (Started, Start) => Err(InvalidTransition {
                from: self,
                event,
                reason: "Game already started",
            }),

            // Reset is always allowed
            (_, Reset) => Ok(Waiting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_from_waiting() {
        let phase = SessionPhase::default();
        assert_eq!(phase.transition(PhaseEvent::Start), Ok(SessionPhase::Started));
    }

    #[test]
    fn test_double_start_rejected() {
        let phase = SessionPhase::Started;
        let err = phase.transition(PhaseEvent::Start).unwrap_err();
        assert_eq!(err.from, SessionPhase::Started);
        assert_eq!(err.reason, "Game already started");
        assert_eq!(
            err.to_string(),
            "Invalid transition from started via Start: Game already started"
        );
    }

    #[test]
    fn test_reset_always_allowed() {
        assert_eq!(
            SessionPhase::Waiting.transition(PhaseEvent::Reset),
            Ok(SessionPhase::Waiting)
        );
        assert_eq!(
            SessionPhase::Started.transition(PhaseEvent::Reset),
            Ok(SessionPhase::Waiting)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionPhase::Started.to_string(), "started");
    }
}
