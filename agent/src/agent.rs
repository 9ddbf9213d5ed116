//! Per-turn decision loop

use std::sync::Arc;

use anyhow::{Result, anyhow};
use pokeact_battle::{
    ActionCode, BattleFacts, IllegalActionError, Mode, ResolvedCommand, decode, encode, evaluate,
    fallback, serialize, to_client_command,
};
use pokeact_protocol::{BattleRequest, ClientMessage};
use serde_json::Value;

use crate::config::AgentConfig;
use crate::policy::{Policy, RandomPolicy};
use crate::stats::DecisionStats;

/// Outcome of one decision
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Action code that produces `command` under the decision's facts
    pub action: ActionCode,

    /// Command that will be sent
    pub command: ResolvedCommand,

    /// Protocol text for `command`
    pub choice: String,

    /// Whether the command replaced the policy's own choice
    pub fallback: bool,
}

impl Decision {
    /// Room-addressed message for the transport
    pub fn to_message(&self, room_id: &str, rqid: Option<u64>) -> ClientMessage {
        ClientMessage {
            room_id: Some(room_id.to_string()),
            command: to_client_command(&self.command, rqid),
        }
    }
}

/// Drives a [`Policy`] through the action-space engine
pub struct Agent<P> {
    policy: P,
    config: AgentConfig,
    stats: Arc<DecisionStats>,
}

impl<P: Policy> Agent<P> {
    /// Agent with its own counters
    pub fn new(policy: P, config: AgentConfig) -> Self {
        Self::with_stats(policy, config, Arc::new(DecisionStats::new()))
    }

    /// Agent that reports into shared counters
    pub fn with_stats(policy: P, config: AgentConfig, stats: Arc<DecisionStats>) -> Self {
        Self {
            policy,
            config,
            stats,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn stats(&self) -> &Arc<DecisionStats> {
        &self.stats
    }

    /// Choose a command for the given facts
    ///
    /// In strict mode an illegal policy action is counted and returned as an
    /// error so the training loop can penalize it. In relaxed mode it is
    /// counted as a fallback and replaced.
    pub fn decide(&mut self, facts: &BattleFacts) -> Result<Decision, IllegalActionError> {
        self.stats.record_decision();

        // Snapshot not ready yet (battle start) or nothing to choose from
        if !facts.has_active || !facts.has_options() {
            return Ok(self.fall_back(facts));
        }

        let mask = evaluate(facts);
        let Some(action) = self.policy.select(facts, &mask) else {
            return Ok(self.fall_back(facts));
        };

        match decode(action, facts, Mode::Strict) {
            Ok(command) => Ok(Decision {
                action,
                choice: serialize(&command),
                command,
                fallback: false,
            }),
            Err(err) => {
                self.stats.record_illegal();
                tracing::warn!(
                    policy = self.policy.name(),
                    action = action.0,
                    mask = %mask,
                    error = %err,
                    "Policy chose an illegal action"
                );
                match self.config.mode {
                    Mode::Strict => Err(err),
                    Mode::Relaxed => Ok(self.fall_back(facts)),
                }
            }
        }
    }

    fn fall_back(&self, facts: &BattleFacts) -> Decision {
        self.stats.record_fallback();
        let command = fallback(facts);
        let action = encode(&command, facts, Mode::Relaxed).unwrap_or(ActionCode::DEFAULT);
        tracing::debug!(policy = self.policy.name(), command = %command, "Using fallback command");
        Decision {
            action,
            choice: serialize(&command),
            command,
            fallback: true,
        }
    }

    /// Handle a `|request|` payload for a battle room
    ///
    /// Returns `None` when the request needs no decision (waiting, team
    /// preview, or the empty request that clears the previous one) or the
    /// room is not a battle of the configured format.
    pub fn on_request(&mut self, room_id: &str, request: &Value) -> Result<Option<ClientMessage>> {
        if !self.config.plays_room(room_id) {
            tracing::debug!(room = room_id, format = %self.config.battle_format, "Ignoring request from another format");
            return Ok(None);
        }
        if request.is_null() {
            return Ok(None);
        }

        let request = BattleRequest::parse(request)
            .ok_or_else(|| anyhow!("Malformed request in {}", room_id))?;
        if !request.needs_decision() {
            return Ok(None);
        }

        let facts = BattleFacts::from_request(&request)?;
        let decision = self.decide(&facts)?;
        tracing::debug!(
            room = room_id,
            action = decision.action.0,
            choice = %decision.choice,
            fallback = decision.fallback,
            "Decision made"
        );

        Ok(Some(decision.to_message(room_id, request.rqid)))
    }
}

impl Agent<RandomPolicy> {
    /// Random baseline seeded from `config.seed`
    pub fn random(config: AgentConfig) -> Self {
        Self::new(RandomPolicy::new(config.seed), config)
    }
}
