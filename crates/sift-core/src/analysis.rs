//! Run analysis.
//!
//! Computes accuracy and two structural properties of the emergent signaling
//! scheme over a completed history:
//! - consistency: does each state always produce the same signal?
//! - ambiguity: is any signal shared by more than one state?

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::history::History;
use crate::space::{ActionSpace, StateSpace};

/// Aggregate statistics for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis<S: Ord> {
    pub num_rounds: usize,
    pub correct_count: usize,
    /// `correct_count / num_rounds`, or 0.0 for an empty run.
    pub accuracy: f64,
    /// One entry per state in the state space, sorted by state. A state
    /// never observed in the run is reported as inconsistent.
    pub signal_consistency: BTreeMap<S, bool>,
    /// One entry per signal that occurred at least once.
    pub signal_ambiguity: BTreeMap<String, bool>,
}

impl<S: Ord> Analysis<S> {
    /// States whose every observation produced the same signal, sorted by state.
    pub fn consistent_states(&self) -> impl Iterator<Item = &S> {
        self.signal_consistency
            .iter()
            .filter(|&(_, &consistent)| consistent)
            .map(|(state, _)| state)
    }

    /// Signals produced by more than one distinct state, in signal order.
    pub fn ambiguous_signals(&self) -> impl Iterator<Item = &str> {
        self.signal_ambiguity
            .iter()
            .filter(|&(_, &ambiguous)| ambiguous)
            .map(|(signal, _)| signal.as_str())
    }

    /// Fraction of states reported consistent (0.0-1.0).
    pub fn consistency_rate(&self) -> f64 {
        if self.signal_consistency.is_empty() {
            return 0.0;
        }
        self.consistent_states().count() as f64 / self.signal_consistency.len() as f64
    }
}

/// Analyze a completed history against the spaces it was run over.
///
/// The action space is not consulted; it is accepted so callers can hand
/// over the same inputs they gave the engine.
pub fn analyze<S, A>(
    history: &History<S, A>,
    state_space: &StateSpace<S>,
    _action_space: &ActionSpace<A>,
) -> Analysis<S>
where
    S: Clone + Ord,
{
    let num_rounds = history.len();
    let correct_count = history.correct_count();
    let accuracy = if num_rounds > 0 {
        correct_count as f64 / num_rounds as f64
    } else {
        0.0
    };

    let mut signals_by_state: BTreeMap<&S, Vec<&str>> =
        state_space.iter().map(|state| (state, Vec::new())).collect();
    for record in history {
        // Records for states outside the space get no consistency entry.
        if let Some(signals) = signals_by_state.get_mut(&record.state) {
            signals.push(&record.signal);
        }
    }

    let signal_consistency = signals_by_state
        .into_iter()
        .map(|(state, signals)| {
            let consistent = match signals.split_first() {
                Some((first, rest)) => rest.iter().all(|s| s == first),
                None => false,
            };
            (state.clone(), consistent)
        })
        .collect();

    let mut states_by_signal: BTreeMap<&str, BTreeSet<&S>> = BTreeMap::new();
    for record in history {
        states_by_signal
            .entry(&record.signal)
            .or_default()
            .insert(&record.state);
    }

    let signal_ambiguity = states_by_signal
        .into_iter()
        .map(|(signal, states)| (signal.to_string(), states.len() > 1))
        .collect();

    Analysis {
        num_rounds,
        correct_count,
        accuracy,
        signal_consistency,
        signal_ambiguity,
    }
}

/// Cumulative accuracy after a given round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyPoint {
    pub round: u32,
    pub correct_so_far: usize,
    /// Accuracy over rounds 1..=round (0.0-1.0).
    pub accuracy: f64,
}

/// Cumulative accuracy after every round, in round order.
///
/// Under a memory-driven listener this shows the convention forming: once
/// every signal has been seen, the curve only moves toward the final
/// accuracy.
pub fn accuracy_curve<S, A>(history: &History<S, A>) -> Vec<AccuracyPoint> {
    let mut correct_so_far = 0usize;
    history
        .iter()
        .enumerate()
        .map(|(i, record)| {
            if record.is_correct {
                correct_so_far += 1;
            }
            AccuracyPoint {
                round: record.round,
                correct_so_far,
                accuracy: correct_so_far as f64 / (i + 1) as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::RoundRecord;
    use crate::space::Space;

    fn record(
        round: u32,
        state: &'static str,
        signal: &str,
        correct: bool,
    ) -> RoundRecord<&'static str, &'static str> {
        RoundRecord {
            round,
            state,
            signal: signal.to_string(),
            action: "Left",
            is_correct: correct,
        }
    }

    fn spaces() -> (StateSpace<&'static str>, ActionSpace<&'static str>) {
        (
            Space::states(vec!["Red", "Blue", "Green"]).unwrap(),
            Space::actions(vec!["Left", "Right", "Up"]).unwrap(),
        )
    }

    #[test]
    fn test_empty_history() {
        let (states, actions) = spaces();
        let analysis = analyze(&History::default(), &states, &actions);

        assert_eq!(analysis.num_rounds, 0);
        assert_eq!(analysis.correct_count, 0);
        assert_eq!(analysis.accuracy, 0.0);
        assert_eq!(analysis.signal_consistency.len(), 3);
        assert!(analysis.signal_consistency.values().all(|&c| !c));
        assert!(analysis.signal_ambiguity.is_empty());
        assert_eq!(analysis.consistency_rate(), 0.0);
    }

    #[test]
    fn test_accuracy_counts_correct_rounds() {
        let (states, actions) = spaces();
        let history: History<_, _> = vec![
            record(1, "Red", "signal_0", true),
            record(2, "Blue", "signal_1", false),
            record(3, "Red", "signal_0", true),
            record(4, "Green", "signal_2", false),
        ]
        .into_iter()
        .collect();

        let analysis = analyze(&history, &states, &actions);
        assert_eq!(analysis.num_rounds, 4);
        assert_eq!(analysis.correct_count, 2);
        assert!((analysis.accuracy - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_inconsistent_state_detected() {
        let (states, actions) = spaces();
        let history: History<_, _> = vec![
            record(1, "Red", "signal_0", false),
            record(2, "Red", "crimson", false),
            record(3, "Blue", "signal_1", false),
        ]
        .into_iter()
        .collect();

        let analysis = analyze(&history, &states, &actions);
        assert_eq!(analysis.signal_consistency[&"Red"], false);
        assert_eq!(analysis.signal_consistency[&"Blue"], true);
        // Never observed: vacuously inconsistent.
        assert_eq!(analysis.signal_consistency[&"Green"], false);
        assert!((analysis.consistency_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_shared_signal_is_ambiguous() {
        let (states, actions) = spaces();
        let history: History<_, _> = vec![
            record(1, "Red", "shape", false),
            record(2, "Blue", "shape", false),
            record(3, "Green", "signal_2", false),
            record(4, "Green", "signal_2", false),
        ]
        .into_iter()
        .collect();

        let analysis = analyze(&history, &states, &actions);
        assert_eq!(analysis.signal_ambiguity.len(), 2);
        assert_eq!(analysis.signal_ambiguity["shape"], true);
        assert_eq!(analysis.signal_ambiguity["signal_2"], false);
        assert_eq!(analysis.ambiguous_signals().collect::<Vec<_>>(), vec!["shape"]);
        assert!(!analysis.signal_ambiguity.contains_key("signal_0"));
    }

    #[test]
    fn test_foreign_state_ignored_for_consistency() {
        let (states, actions) = spaces();
        let history: History<_, _> = vec![
            record(1, "Purple", "signal_9", false),
            record(2, "Red", "signal_0", true),
        ]
        .into_iter()
        .collect();

        let analysis = analyze(&history, &states, &actions);
        assert_eq!(analysis.signal_consistency.len(), 3);
        assert!(!analysis.signal_consistency.contains_key(&"Purple"));
        assert_eq!(analysis.signal_ambiguity["signal_9"], false);
    }

    #[test]
    fn test_serialized_analysis_is_stable() {
        let states = Space::states(vec![
            "Yellow Star".to_string(),
            "Red Circle".to_string(),
            "Green Triangle".to_string(),
            "Blue Square".to_string(),
        ])
        .unwrap();
        let actions = Space::actions(vec!["Left".to_string()]).unwrap();
        let history: History<String, String> = states
            .iter()
            .enumerate()
            .map(|(i, state)| RoundRecord {
                round: i as u32 + 1,
                state: state.clone(),
                signal: format!("signal_{i}"),
                action: "Left".to_string(),
                is_correct: i == 0,
            })
            .collect();

        let first = serde_json::to_string(&analyze(&history, &states, &actions)).unwrap();
        for _ in 0..20 {
            let again = serde_json::to_string(&analyze(&history, &states, &actions)).unwrap();
            assert_eq!(again, first);
        }
        assert!(first.contains(
            r#""signal_consistency":{"Blue Square":true,"Green Triangle":true,"Red Circle":true,"Yellow Star":true}"#
        ));
    }

    #[test]
    fn test_accuracy_curve_is_cumulative() {
        let history: History<_, _> = vec![
            record(1, "Red", "signal_0", false),
            record(2, "Red", "signal_0", true),
            record(3, "Blue", "signal_1", true),
            record(4, "Blue", "signal_1", true),
        ]
        .into_iter()
        .collect();

        let curve = accuracy_curve(&history);
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0].correct_so_far, 0);
        assert_eq!(curve[0].accuracy, 0.0);
        assert!((curve[1].accuracy - 0.5).abs() < 1e-9);
        assert_eq!(curve[3].round, 4);
        assert_eq!(curve[3].correct_so_far, 3);
        assert!((curve[3].accuracy - 0.75).abs() < 1e-9);
    }
}
