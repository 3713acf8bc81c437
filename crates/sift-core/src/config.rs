//! Run configuration: round count, seed, and the game's spaces.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::space::{ActionSpace, Space, SpaceError, StateSpace};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid space: {0}")]
    Space(#[from] SpaceError),
}

/// Engine parameters for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of rounds to play.
    pub num_rounds: u32,
    /// Seed for every random stream in the run.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_rounds: 10,
            seed: 42,
        }
    }
}

/// A complete, file-loadable game description with string-valued spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub simulation: SimulationConfig,
    pub state_space: Vec<String>,
    pub action_space: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            state_space: ["Red Circle", "Blue Square", "Green Triangle", "Yellow Star"]
                .map(String::from)
                .to_vec(),
            action_space: [
                "Pick Top-Left",
                "Pick Top-Right",
                "Pick Bottom-Left",
                "Pick Bottom-Right",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validate both spaces and return them ready for the engine.
    pub fn spaces(&self) -> Result<(StateSpace<String>, ActionSpace<String>), ConfigError> {
        let states = Space::states(self.state_space.clone())?;
        let actions = Space::actions(self.action_space.clone())?;
        Ok((states, actions))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spaces().map(|_| ())
    }
}
