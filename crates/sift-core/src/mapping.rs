//! Canonical signal vocabulary and positional ground-truth mappings.

use std::collections::HashMap;
use std::hash::Hash;

use crate::space::{ActionSpace, StateSpace};

/// Canonical name for the signal at position `index`.
pub fn canonical_signal(index: usize) -> String {
    format!("signal_{index}")
}

/// Ground truth derived from a state space and an action space.
///
/// One signal is generated per state. States pair with signals by position,
/// and signals pair with actions by position. When the action space is
/// shorter than the state space, the trailing signals have no correct action.
#[derive(Debug, Clone)]
pub struct GroundTruth<S, A> {
    signals: Vec<String>,
    state_to_signal: HashMap<S, String>,
    signal_to_action: HashMap<String, A>,
}

impl<S, A> GroundTruth<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    pub fn build(state_space: &StateSpace<S>, action_space: &ActionSpace<A>) -> Self {
        let signals: Vec<String> = (0..state_space.len()).map(canonical_signal).collect();

        let state_to_signal = state_space
            .iter()
            .cloned()
            .zip(signals.iter().cloned())
            .collect();

        let signal_to_action = signals
            .iter()
            .cloned()
            .zip(action_space.iter().cloned())
            .collect();

        Self {
            signals,
            state_to_signal,
            signal_to_action,
        }
    }

    /// The canonical signal vocabulary, in state order.
    pub fn signals(&self) -> &[String] {
        &self.signals
    }

    pub fn signal_for(&self, state: &S) -> Option<&str> {
        self.state_to_signal.get(state).map(String::as_str)
    }

    /// The correct action for a signal, or `None` if the signal has no
    /// ground-truth counterpart (non-canonical or past the end of the
    /// action space).
    pub fn correct_action(&self, signal: &str) -> Option<&A> {
        self.signal_to_action.get(signal)
    }

    pub fn state_to_signal(&self) -> &HashMap<S, String> {
        &self.state_to_signal
    }
}
