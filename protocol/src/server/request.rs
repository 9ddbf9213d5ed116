//! Battle request types
//!
//! These types represent the JSON structure of |request| messages.

use serde::{Deserialize, Deserializer};

/// A battle request asking the player to make a decision
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    /// Request ID for synchronization
    pub rqid: Option<u64>,

    /// Active pokemon and their available moves
    #[serde(default)]
    pub active: Option<Vec<ActivePokemon>>,

    /// Information about the player's side/team
    pub side: Option<SideInfo>,

    /// Which slots need to switch
    #[serde(default)]
    pub force_switch: Option<Vec<bool>>,

    /// Whether this is team preview
    #[serde(default)]
    pub team_preview: bool,

    /// Whether we're waiting for opponent
    #[serde(default)]
    pub wait: bool,
}

impl BattleRequest {
    /// Parse a request from JSON
    pub fn parse(json: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(json.clone()).ok()
    }

    /// Check if this request requires a move or switch decision
    pub fn needs_decision(&self) -> bool {
        !self.wait && !self.team_preview && (self.is_force_switch() || self.active.is_some())
    }

    /// Check if this is a force switch request
    pub fn is_force_switch(&self) -> bool {
        self.force_switch
            .as_ref()
            .map(|fs| fs.iter().any(|&b| b))
            .unwrap_or(false)
    }

    /// The active pokemon in the first (singles) slot
    pub fn active_pokemon(&self) -> Option<&ActivePokemon> {
        self.active.as_ref().and_then(|a| a.first())
    }

    /// Get available pokemon to switch to
    pub fn available_switches(&self) -> Vec<&SidePokemon> {
        self.side
            .as_ref()
            .map(|s| {
                s.pokemon
                    .iter()
                    .filter(|p| !p.active && !p.is_fainted())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Information about an active pokemon in battle
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePokemon {
    /// Move listing, including disabled and out-of-pp entries
    #[serde(default)]
    pub moves: Vec<MoveSlot>,

    /// Whether the pokemon is trapped
    #[serde(default)]
    pub trapped: bool,

    /// Whether the pokemon might be trapped
    #[serde(default)]
    pub maybe_trapped: bool,
}

impl ActivePokemon {
    /// Get available (non-disabled, with PP) moves
    pub fn available_moves(&self) -> Vec<(usize, &MoveSlot)> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.disabled && m.pp.is_none_or(|pp| pp > 0))
            .collect()
    }

    /// Check if the pokemon can switch out
    pub fn can_switch(&self) -> bool {
        !self.trapped && !self.maybe_trapped
    }
}

/// A move slot on an active pokemon
///
/// Locked-in entries (`recharge`, `struggle`, or a move such as Outrage the
/// pokemon is committed to) are sent without `pp`/`maxpp`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlot {
    /// Display name of the move
    #[serde(rename = "move")]
    pub name: String,

    /// Move ID (lowercase, no spaces)
    pub id: String,

    /// Current PP, absent on locked-in entries
    #[serde(default)]
    pub pp: Option<u32>,

    /// Maximum PP
    #[serde(default, rename = "maxpp")]
    pub max_pp: u32,

    /// Target type (normal, self, allySide, etc.)
    #[serde(default)]
    pub target: String,

    /// Whether the move is disabled
    #[serde(default, deserialize_with = "bool_or_source")]
    pub disabled: bool,
}

impl MoveSlot {
    /// Whether the server listed this move without pp, i.e. the pokemon is
    /// locked into it
    pub fn is_locked(&self) -> bool {
        self.pp.is_none()
    }
}

/// Showdown reports `disabled` either as a bool or as the name of the
/// effect that disabled the move.
fn bool_or_source<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Source(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Source(source) => !source.is_empty(),
    })
}

/// Information about the player's side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideInfo {
    /// Player's display name
    pub name: String,

    /// Player ID (p1, p2, etc.)
    pub id: String,

    /// Pokemon on this side, in team order
    #[serde(default)]
    pub pokemon: Vec<SidePokemon>,
}

/// A pokemon on the player's side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePokemon {
    /// Pokemon identifier (e.g., "p1: Pikachu")
    pub ident: String,

    /// Details string (species, level, gender, shiny)
    pub details: String,

    /// Current condition (HP/MaxHP status)
    pub condition: String,

    /// Whether this pokemon is currently active
    #[serde(default)]
    pub active: bool,

    /// Whether this pokemon is being revived (Revival Blessing)
    #[serde(default)]
    pub reviving: bool,
}

impl SidePokemon {
    /// Check if the pokemon is fainted
    pub fn is_fainted(&self) -> bool {
        self.condition == "0 fnt" || self.condition.ends_with(" fnt")
    }

    /// Get the species name from details
    pub fn species(&self) -> &str {
        self.details.split(',').next().unwrap_or(&self.details)
    }
}
