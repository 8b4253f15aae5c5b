//! State machine trait for lifecycle enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions. The coach session lifecycle is the main implementor.

use super::TransitionError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for CoachState {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (NotStarted, Prompting { turn: 0 }) | /* ... */)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             NotStarted => vec![Prompting { turn: 0 }],
///             // ... etc
///         }
///     }
/// }
///
/// let next = state.transition_to(CoachState::Listening { turn: 0 }, "finish playback")?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + std::fmt::Display {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    ///
    /// `event` names what the caller was trying to do and ends up in the error.
    fn transition_to(&self, target: Self, event: &'static str) -> Result<Self, TransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError::new(self.to_string(), event))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Lamp {
        Off,
        Warming,
        On,
        Burnt,
    }

    impl fmt::Display for Lamp {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl StateMachine for Lamp {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Lamp::*;
            match self {
                Off => vec![Warming],
                Warming => vec![On, Burnt],
                On => vec![Off, Burnt],
                Burnt => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Lamp::Off.transition_to(Lamp::Warming, "switch on"), Ok(Lamp::Warming));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Lamp::Off.transition_to(Lamp::On, "switch on").unwrap_err();
        assert_eq!(err.from, "Off");
        assert_eq!(err.event, "switch on");
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(Lamp::Burnt.is_terminal());
        assert!(!Lamp::Off.is_terminal());
        assert!(!Lamp::On.is_terminal());
    }
}
