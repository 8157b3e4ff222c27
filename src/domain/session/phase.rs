//! SessionPhase - where the analyst is in the analysis flow.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Phase of the analyst session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Form visible, nothing analyzed.
    #[default]
    Idle,
    /// One prediction request in flight.
    Submitting,
    /// Record and result fixed.
    Analyzed,
}

impl StateMachine for SessionPhase {
    /// Valid transitions:
    /// - Idle -> Submitting
    /// - Submitting -> Analyzed (success) | Idle (failure)
    /// - Analyzed -> Idle (modify or new client)
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (Idle, Submitting) | (Submitting, Analyzed) | (Submitting, Idle) | (Analyzed, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionPhase::*;
        match self {
            Idle => vec![Submitting],
            Submitting => vec![Analyzed, Idle],
            Analyzed => vec![Idle],
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Submitting => "Submitting",
            SessionPhase::Analyzed => "Analyzed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(SessionPhase::default(), SessionPhase::Idle);
    }

    #[test]
    fn idle_can_only_submit() {
        assert_eq!(SessionPhase::Idle.valid_transitions(), vec![SessionPhase::Submitting]);
        assert!(!SessionPhase::Idle.can_transition_to(&SessionPhase::Analyzed));
    }

    #[test]
    fn analyzed_cannot_resubmit_directly() {
        assert!(SessionPhase::Analyzed
            .transition_to(SessionPhase::Submitting)
            .is_err());
    }

    #[test]
    fn no_phase_is_terminal() {
        for phase in [SessionPhase::Idle, SessionPhase::Submitting, SessionPhase::Analyzed] {
            assert!(!phase.is_terminal());
        }
    }
}
