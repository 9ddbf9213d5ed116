//! Caller side of the action-space engine: policies, decision counters and
//! the per-turn loop that turns a Showdown request into a `/choose` message.

mod agent;
pub mod config;
pub mod policy;
pub mod stats;

pub use agent::{Agent, Decision};
pub use config::AgentConfig;
pub use policy::{Policy, RandomPolicy, ScoredPolicy, rank_actions};
pub use stats::{DecisionStats, StatsSnapshot};

pub use pokeact_battle::{ActionCode, BattleFacts, IllegalActionError, Mode, ResolvedCommand};
pub use pokeact_protocol::{ClientMessage, ServerMessage, parse_server_frame};
