//! Command -> action code

use crate::error::{IllegalActionError, MoveRejection, SwitchRejection};
use crate::forme;
use crate::types::{
    ActionCode, BattleFacts, MOVE_SLOTS, MoveSlot, PartySlot, ResolvedCommand, SWITCH_SLOTS,
};

use super::Mode;
use super::legality::{LegalityMask, evaluate};

/// Recover the action code that produces `command` under `facts`
///
/// Switches encode to the target's slot in team order and moves to `6 +`
/// their slot in the move listing. The command is validated against the
/// current facts first; in [`Mode::Relaxed`] a command that fails
/// validation encodes to [`ActionCode::DEFAULT`].
pub fn encode(
    command: &ResolvedCommand,
    facts: &BattleFacts,
    mode: Mode,
) -> Result<ActionCode, IllegalActionError> {
    let encoded = match command {
        ResolvedCommand::Default => Ok(ActionCode::DEFAULT),
        ResolvedCommand::Forfeit => Ok(ActionCode::FORFEIT),
        ResolvedCommand::Switch(target) => encode_switch(target, facts),
        ResolvedCommand::Move(target) => encode_move(target, facts),
    };

    match encoded {
        Err(err) if mode.is_relaxed() => {
            tracing::debug!(command = %command, error = %err, "command encoded as default");
            Ok(ActionCode::DEFAULT)
        }
        other => other,
    }
}

/// Slot of the target in team order; forme aliases match their base species
fn team_slot(target: &PartySlot, facts: &BattleFacts) -> Option<usize> {
    facts
        .team
        .iter()
        .position(|p| p.species == target.species)
        .or_else(|| {
            facts
                .team
                .iter()
                .position(|p| forme::same_species(&p.species, &target.species))
        })
        .filter(|&slot| slot < SWITCH_SLOTS)
}

fn encode_switch(target: &PartySlot, facts: &BattleFacts) -> Result<ActionCode, IllegalActionError> {
    let mask = evaluate(facts);
    let reject = |action: Option<ActionCode>, reason: SwitchRejection| {
        IllegalActionError::IllegalSwitch {
            action,
            target: target.species.clone(),
            reason,
            mask,
        }
    };

    let slot = team_slot(target, facts).ok_or_else(|| reject(None, SwitchRejection::NotInTeam))?;
    let action = ActionCode::switch(slot);
    let member = &facts.team[slot];

    if facts.revival_target().is_some() {
        return if member.fainted {
            Ok(action)
        } else {
            Err(reject(Some(action), SwitchRejection::NotFainted))
        };
    }

    if mask.is_legal(action) {
        return Ok(action);
    }

    let reason = if facts.must_recharge || facts.forced_move().is_some() {
        SwitchRejection::LockedIn
    } else if facts.trapped {
        SwitchRejection::Trapped
    } else if member.fainted {
        SwitchRejection::Fainted
    } else {
        SwitchRejection::AlreadyActive
    };
    Err(reject(Some(action), reason))
}

fn encode_move(target: &MoveSlot, facts: &BattleFacts) -> Result<ActionCode, IllegalActionError> {
    let mask: LegalityMask = evaluate(facts);
    let reject = |action: Option<ActionCode>, reason: MoveRejection| IllegalActionError::IllegalMove {
        action,
        target: target.id.clone(),
        reason,
        mask,
    };

    if facts.revival_target().is_some() {
        return Err(reject(None, MoveRejection::RevivalInProgress));
    }

    if let Some((slot, forced)) = facts.forced_move() {
        return if forced.id == target.id && slot < MOVE_SLOTS {
            Ok(ActionCode::move_slot(slot))
        } else {
            Err(reject(None, MoveRejection::LockedIn))
        };
    }

    let slot = facts
        .moves
        .iter()
        .take(MOVE_SLOTS)
        .position(|m| m.id == target.id)
        .ok_or_else(|| reject(None, MoveRejection::NotInListing))?;
    let action = ActionCode::move_slot(slot);

    if mask.is_legal(action) {
        return Ok(action);
    }

    let listed = &facts.moves[slot];
    let reason = if !facts.has_active {
        MoveRejection::NoActivePokemon
    } else if facts.force_switch {
        MoveRejection::ForcedSwitch
    } else if listed.disabled {
        MoveRejection::Disabled
    } else {
        MoveRejection::NoPp
    };
    Err(reject(Some(action), reason))
}
