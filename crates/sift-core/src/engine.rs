use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

use crate::analysis::{analyze, Analysis};
use crate::config::SimulationConfig;
use crate::history::{History, RoundRecord};
use crate::mapping::GroundTruth;
use crate::memory::ListenerMemory;
use crate::rng::{stream_rng, STATE_STREAM};
use crate::space::{ActionSpace, StateSpace};
use crate::strategy::{Agents, Listener, Speaker, StrategyError};

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Speaker '{strategy}' failed in round {round}: {source}")]
    Speaker {
        strategy: String,
        round: u32,
        #[source]
        source: StrategyError,
    },

    #[error("Listener '{strategy}' failed in round {round}: {source}")]
    Listener {
        strategy: String,
        round: u32,
        #[source]
        source: StrategyError,
    },
}

/// Run `num_rounds` rounds of the signaling game.
///
/// Each round samples a state from `rng`, asks the speaker for a signal,
/// asks the listener for an action given its memory so far, scores the
/// action against the positional ground truth, then records the action in
/// the listener's memory. Any strategy error aborts the whole run.
pub fn simulate<S, A, R>(
    num_rounds: u32,
    state_space: &StateSpace<S>,
    action_space: &ActionSpace<A>,
    speaker: &mut dyn Speaker<S>,
    listener: &mut dyn Listener<A>,
    rng: &mut R,
) -> Result<History<S, A>, SimulationError>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + PartialEq + Debug,
    R: Rng + ?Sized,
{
    let truth = GroundTruth::build(state_space, action_space);
    let mut memory = ListenerMemory::new();
    let mut history = History::default();

    tracing::info!(
        num_rounds,
        states = state_space.len(),
        actions = action_space.len(),
        speaker = speaker.name(),
        listener = listener.name(),
        "starting simulation"
    );

    for round in 1..=num_rounds {
        let state = state_space.sample(rng).clone();

        let signal = speaker
            .speak(&state, round)
            .map_err(|source| SimulationError::Speaker {
                strategy: speaker.name().to_string(),
                round,
                source,
            })?;

        let action = listener
            .listen(&signal, &memory, round)
            .map_err(|source| SimulationError::Listener {
                strategy: listener.name().to_string(),
                round,
                source,
            })?;

        // Signals outside the canonical vocabulary (or past the end of a
        // short action space) have no correct action and always score false.
        let is_correct = truth.correct_action(&signal) == Some(&action);

        memory.record(signal.clone(), action.clone());

        tracing::debug!(round, ?state, %signal, ?action, is_correct, "round complete");

        history.push(RoundRecord {
            round,
            state,
            signal,
            action,
            is_correct,
        });
    }

    Ok(history)
}

/// Seed a state sampler from `config`, run the simulation with `agents`,
/// then analyze the history.
pub fn run_and_analyze<S, A>(
    config: &SimulationConfig,
    state_space: &StateSpace<S>,
    action_space: &ActionSpace<A>,
    agents: &mut Agents<'_, S, A>,
) -> Result<(History<S, A>, Analysis<S>), SimulationError>
where
    S: Clone + Eq + Hash + Ord + Debug,
    A: Clone + PartialEq + Debug,
{
    let mut rng = stream_rng(config.seed, STATE_STREAM);
    let history = simulate(
        config.num_rounds,
        state_space,
        action_space,
        agents.speaker.as_mut(),
        agents.listener.as_mut(),
        &mut rng,
    )?;
    let analysis = analyze(&history, state_space, action_space);

    tracing::info!(
        seed = config.seed,
        num_rounds = analysis.num_rounds,
        correct = analysis.correct_count,
        accuracy = analysis.accuracy,
        "simulation analyzed"
    );

    Ok((history, analysis))
}
