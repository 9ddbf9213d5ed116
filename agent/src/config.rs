//! Agent configuration

use anyhow::{Context, Result};
use pokeact_battle::Mode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FORMAT: &str = "gen9randombattle";

/// Settings for an [`Agent`](crate::Agent)
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// `strict` surfaces illegal policy actions, `relaxed` replaces them
    pub mode: Mode,

    /// Battle format the agent plays
    pub battle_format: String,

    /// Seed for the random baseline (entropy when unset)
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Relaxed,
            battle_format: DEFAULT_FORMAT.to_string(),
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid agent configuration")
    }

    /// Whether a battle room (`battle-<format>-<id>`) belongs to the
    /// configured format
    pub fn plays_room(&self, room_id: &str) -> bool {
        room_id
            .strip_prefix("battle-")
            .and_then(|rest| rest.strip_prefix(self.battle_format.as_str()))
            .is_some_and(|rest| rest.starts_with('-'))
    }
}
