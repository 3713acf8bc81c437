pub mod analysis;
pub mod config;
pub mod engine;
pub mod history;
pub mod mapping;
pub mod memory;
pub mod rng;
pub mod space;
pub mod strategy;

pub use analysis::{accuracy_curve, analyze, AccuracyPoint, Analysis};
pub use config::{ConfigError, RunConfig, SimulationConfig};
pub use engine::{run_and_analyze, simulate, SimulationError};
pub use history::{History, RoundRecord};
pub use mapping::GroundTruth;
pub use memory::ListenerMemory;
pub use space::{ActionSpace, Space, SpaceError, SpaceKind, StateSpace};
pub use strategy::{Agents, Listener, Speaker, StrategyError};
