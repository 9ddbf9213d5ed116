//! Resolved commands

use super::facts::{MoveSlot, PartySlot};

/// The concrete order chosen for a decision
///
/// Format modifiers (mega, z-move, dynamax, terastallize) are never part of
/// a command; the action space only covers plain moves and switches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvedCommand {
    /// Use a move of the active pokemon
    Move(MoveSlot),
    /// Switch to a party member
    Switch(PartySlot),
    /// Let the server pick (`/choose default`)
    Default,
    /// Forfeit the battle
    Forfeit,
}

impl ResolvedCommand {
    pub fn is_default(&self) -> bool {
        matches!(self, ResolvedCommand::Default)
    }

    /// Short human-readable description for logs
    pub fn describe(&self) -> String {
        match self {
            ResolvedCommand::Move(m) => format!("move {}", m.id),
            ResolvedCommand::Switch(p) => format!("switch {}", p.species),
            ResolvedCommand::Default => "default".to_string(),
            ResolvedCommand::Forfeit => "forfeit".to_string(),
        }
    }
}

impl std::fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
