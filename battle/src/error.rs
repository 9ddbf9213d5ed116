//! Illegal action errors

use thiserror::Error;

use crate::resolve::LegalityMask;
use crate::types::ActionCode;

/// Why a switch target was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchRejection {
    /// No party member at that slot
    EmptySlot,
    Fainted,
    AlreadyActive,
    Trapped,
    /// Target is not a member of the current team
    NotInTeam,
    /// Revival needs a fainted party member
    NotFainted,
    /// The active pokemon is locked into a move
    LockedIn,
}

impl SwitchRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchRejection::EmptySlot => "no party member in that slot",
            SwitchRejection::Fainted => "target has fainted",
            SwitchRejection::AlreadyActive => "target is already active",
            SwitchRejection::Trapped => "active pokemon is trapped",
            SwitchRejection::NotInTeam => "target is not on the team",
            SwitchRejection::NotFainted => "revival needs a fainted target",
            SwitchRejection::LockedIn => "active pokemon is locked into a move",
        }
    }
}

impl std::fmt::Display for SwitchRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// No move in that slot of the listing
    EmptySlot,
    NoPp,
    Disabled,
    ForcedSwitch,
    /// Move is not in the active pokemon's listing
    NotInListing,
    /// No active pokemon to use the move
    NoActivePokemon,
    /// A fainted party member must be chosen for revival
    RevivalInProgress,
    /// The active pokemon is locked into a different move
    LockedIn,
}

impl MoveRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveRejection::EmptySlot => "no move in that slot",
            MoveRejection::NoPp => "move has no PP left",
            MoveRejection::Disabled => "move is disabled",
            MoveRejection::ForcedSwitch => "a switch is required",
            MoveRejection::NotInListing => "move is not in the listing",
            MoveRejection::NoActivePokemon => "no active pokemon",
            MoveRejection::RevivalInProgress => "revival in progress",
            MoveRejection::LockedIn => "active pokemon is locked into another move",
        }
    }
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A requested action (or command) that cannot be carried out
///
/// Raised only in strict mode; relaxed mode replaces it with a fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalActionError {
    #[error("action {action} is outside the action space [-2, 9]")]
    OutOfRangeAction { action: ActionCode },

    #[error("cannot switch to {target}: {reason} (mask {mask})")]
    IllegalSwitch {
        /// Requested action, when the target maps to one
        action: Option<ActionCode>,
        target: String,
        reason: SwitchRejection,
        mask: LegalityMask,
    },

    #[error("cannot use {target}: {reason} (mask {mask})")]
    IllegalMove {
        /// Requested action, when the target maps to one
        action: Option<ActionCode>,
        target: String,
        reason: MoveRejection,
        mask: LegalityMask,
    },

    #[error("action {action}: no active pokemon yet")]
    NoActiveCombatant { action: ActionCode },

    #[error("action {action}: no legal action available (mask {mask})")]
    NoLegalActionAvailable {
        action: ActionCode,
        mask: LegalityMask,
    },
}

impl IllegalActionError {
    /// The offending action code, if known
    pub fn action(&self) -> Option<ActionCode> {
        match self {
            IllegalActionError::OutOfRangeAction { action }
            | IllegalActionError::NoActiveCombatant { action }
            | IllegalActionError::NoLegalActionAvailable { action, .. } => Some(*action),
            IllegalActionError::IllegalSwitch { action, .. }
            | IllegalActionError::IllegalMove { action, .. } => *action,
        }
    }

    /// The mask in force when the request was rejected, if one was computed
    pub fn mask(&self) -> Option<&LegalityMask> {
        match self {
            IllegalActionError::IllegalSwitch { mask, .. }
            | IllegalActionError::IllegalMove { mask, .. }
            | IllegalActionError::NoLegalActionAvailable { mask, .. } => Some(mask),
            IllegalActionError::OutOfRangeAction { .. }
            | IllegalActionError::NoActiveCombatant { .. } => None,
        }
    }
}
