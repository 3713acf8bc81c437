//! Speaker and listener behavior slots.
//!
//! The engine only sees these two traits. Shipped implementations:
//! - [`DefaultSpeaker`]: canonical ground-truth signal for each state.
//! - [`DefaultListener`]: repeat remembered action, else explore uniformly.
//! - [`TableSpeaker`] / [`TableListener`]: fixed lookup tables.
//! - [`ClampedListener`]: keeps any listener's output inside the action space.
//!
//! Closures with the matching signature are strategies too.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use rand_chacha::ChaCha8Rng;

use crate::mapping::GroundTruth;
use crate::memory::ListenerMemory;
use crate::rng::{stream_rng, CLAMP_STREAM, LISTENER_STREAM};
use crate::space::{ActionSpace, StateSpace};

/// Error raised by a strategy. Propagated untouched and ends the run.
pub type StrategyError = Box<dyn std::error::Error + Send + Sync>;

/// Signal emitted by [`TableSpeaker`] for states missing from its table.
pub const UNKNOWN_SIGNAL: &str = "unknown";

/// Observes the hidden state and emits a signal.
pub trait Speaker<S> {
    fn speak(&mut self, state: &S, round: u32) -> Result<String, StrategyError>;

    /// Name of this strategy (for tracing).
    fn name(&self) -> &str {
        "custom"
    }
}

/// Receives only the signal and chooses an action.
pub trait Listener<A> {
    fn listen(
        &mut self,
        signal: &str,
        memory: &ListenerMemory<A>,
        round: u32,
    ) -> Result<A, StrategyError>;

    /// Name of this strategy (for tracing).
    fn name(&self) -> &str {
        "custom"
    }
}

impl<S, F> Speaker<S> for F
where
    F: FnMut(&S, u32) -> Result<String, StrategyError>,
{
    fn speak(&mut self, state: &S, round: u32) -> Result<String, StrategyError> {
        self(state, round)
    }
}

impl<A, F> Listener<A> for F
where
    F: FnMut(&str, &ListenerMemory<A>, u32) -> Result<A, StrategyError>,
{
    fn listen(
        &mut self,
        signal: &str,
        memory: &ListenerMemory<A>,
        round: u32,
    ) -> Result<A, StrategyError> {
        self(signal, memory, round)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("state {state} is not in the state space")]
pub struct UnknownState {
    pub state: String,
}

/// Always emits the canonical signal of the observed state.
#[derive(Debug, Clone)]
pub struct DefaultSpeaker<S> {
    state_to_signal: HashMap<S, String>,
}

impl<S> DefaultSpeaker<S>
where
    S: Clone + Eq + Hash,
{
    pub fn new<A: Clone>(truth: &GroundTruth<S, A>) -> Self {
        Self {
            state_to_signal: truth.state_to_signal().clone(),
        }
    }
}

impl<S> Speaker<S> for DefaultSpeaker<S>
where
    S: Eq + Hash + Debug,
{
    fn speak(&mut self, state: &S, _round: u32) -> Result<String, StrategyError> {
        self.state_to_signal.get(state).cloned().ok_or_else(|| {
            UnknownState {
                state: format!("{state:?}"),
            }
            .into()
        })
    }

    fn name(&self) -> &str {
        "default_speaker"
    }
}

/// Repeats the remembered action for a known signal; explores uniformly
/// over the action space for a new one. Never sees the state.
#[derive(Debug, Clone)]
pub struct DefaultListener<A> {
    actions: ActionSpace<A>,
    rng: ChaCha8Rng,
}

impl<A: Clone> DefaultListener<A> {
    pub fn new(actions: &ActionSpace<A>, rng: ChaCha8Rng) -> Self {
        Self {
            actions: actions.clone(),
            rng,
        }
    }

    pub fn seeded(actions: &ActionSpace<A>, seed: u64) -> Self {
        Self::new(actions, stream_rng(seed, LISTENER_STREAM))
    }
}

impl<A: Clone + Debug> Listener<A> for DefaultListener<A> {
    fn listen(
        &mut self,
        signal: &str,
        memory: &ListenerMemory<A>,
        round: u32,
    ) -> Result<A, StrategyError> {
        if let Some(action) = memory.get(signal) {
            tracing::trace!(round, signal, ?action, "memory hit");
            return Ok(action.clone());
        }
        let action = self.actions.sample(&mut self.rng).clone();
        tracing::trace!(round, signal, ?action, "exploring");
        Ok(action)
    }

    fn name(&self) -> &str {
        "default_listener"
    }
}

/// Speaker backed by a fixed state -> signal table.
#[derive(Debug, Clone)]
pub struct TableSpeaker<S> {
    table: HashMap<S, String>,
}

impl<S: Eq + Hash> TableSpeaker<S> {
    pub fn new(table: HashMap<S, String>) -> Self {
        Self { table }
    }
}

impl<S: Eq + Hash> FromIterator<(S, String)> for TableSpeaker<S> {
    fn from_iter<I: IntoIterator<Item = (S, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<S: Eq + Hash> Speaker<S> for TableSpeaker<S> {
    fn speak(&mut self, state: &S, _round: u32) -> Result<String, StrategyError> {
        Ok(self
            .table
            .get(state)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SIGNAL.to_string()))
    }

    fn name(&self) -> &str {
        "table_speaker"
    }
}

/// Listener backed by a fixed signal -> action table, with a uniform random
/// action for signals it does not know. Ignores memory.
#[derive(Debug, Clone)]
pub struct TableListener<A> {
    table: HashMap<String, A>,
    actions: ActionSpace<A>,
    rng: ChaCha8Rng,
}

impl<A: Clone> TableListener<A> {
    pub fn new(table: HashMap<String, A>, actions: &ActionSpace<A>, rng: ChaCha8Rng) -> Self {
        Self {
            table,
            actions: actions.clone(),
            rng,
        }
    }
}

impl<A: Clone> Listener<A> for TableListener<A> {
    fn listen(
        &mut self,
        signal: &str,
        _memory: &ListenerMemory<A>,
        _round: u32,
    ) -> Result<A, StrategyError> {
        match self.table.get(signal) {
            Some(action) => Ok(action.clone()),
            None => Ok(self.actions.sample(&mut self.rng).clone()),
        }
    }

    fn name(&self) -> &str {
        "table_listener"
    }
}

/// Wraps a listener and replaces any action outside the action space with a
/// uniform random member of it.
///
/// The engine records out-of-space actions as ordinary incorrect rounds;
/// wrap listeners that produce free-form output (remote models, user input)
/// in this to keep them inside the game.
pub struct ClampedListener<L, A> {
    inner: L,
    actions: ActionSpace<A>,
    rng: ChaCha8Rng,
}

impl<L, A: Clone> ClampedListener<L, A> {
    pub fn new(inner: L, actions: &ActionSpace<A>, rng: ChaCha8Rng) -> Self {
        Self {
            inner,
            actions: actions.clone(),
            rng,
        }
    }

    pub fn seeded(inner: L, actions: &ActionSpace<A>, seed: u64) -> Self {
        Self::new(inner, actions, stream_rng(seed, CLAMP_STREAM))
    }
}

impl<L, A> Listener<A> for ClampedListener<L, A>
where
    L: Listener<A>,
    A: Clone + PartialEq + Debug,
{
    fn listen(
        &mut self,
        signal: &str,
        memory: &ListenerMemory<A>,
        round: u32,
    ) -> Result<A, StrategyError> {
        let action = self.inner.listen(signal, memory, round)?;
        if self.actions.contains(&action) {
            return Ok(action);
        }
        let replacement = self.actions.sample(&mut self.rng).clone();
        tracing::warn!(
            round,
            signal,
            rejected = ?action,
            ?replacement,
            "listener returned action outside the action space"
        );
        Ok(replacement)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// The two behavior slots of a run. Either slot accepts any strategy,
/// shipped or caller-provided.
pub struct Agents<'a, S, A> {
    pub speaker: Box<dyn Speaker<S> + 'a>,
    pub listener: Box<dyn Listener<A> + 'a>,
}

impl<'a, S, A> Agents<'a, S, A> {
    pub fn new(
        speaker: impl Speaker<S> + 'a,
        listener: impl Listener<A> + 'a,
    ) -> Self {
        Self {
            speaker: Box::new(speaker),
            listener: Box::new(listener),
        }
    }
}

impl<'a, S, A> Agents<'a, S, A>
where
    S: Clone + Eq + Hash + Debug + 'a,
    A: Clone + Debug + 'a,
{
    /// Default speaker and listener, with the listener's exploration seeded
    /// from `seed`.
    pub fn defaults(state_space: &StateSpace<S>, action_space: &ActionSpace<A>, seed: u64) -> Self {
        let truth = GroundTruth::build(state_space, action_space);
        Self::new(
            DefaultSpeaker::new(&truth),
            DefaultListener::seeded(action_space, seed),
        )
    }
}
