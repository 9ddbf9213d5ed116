//! Action code -> command

use crate::error::{IllegalActionError, MoveRejection, SwitchRejection};
use crate::forme;
use crate::types::{ActionCode, ActionKind, BattleFacts, PartySlot, ResolvedCommand};

use super::Mode;
use super::legality::{LegalityMask, evaluate};

/// Resolve an action code against the current facts
///
/// Sentinel codes (`-2`, `-1`) always resolve to `Default`/`Forfeit`. A
/// pending revival or a locked-in move (recharge, struggle) overrides the
/// requested code. Anything else must be marked legal by the mask; in
/// [`Mode::Relaxed`] an illegal code is replaced by the first legal move,
/// then the first legal switch, then `Default`, so this never returns `Err`.
pub fn decode(
    action: ActionCode,
    facts: &BattleFacts,
    mode: Mode,
) -> Result<ResolvedCommand, IllegalActionError> {
    match resolve(action, facts) {
        Ok(command) => Ok(command),
        Err(err) if mode.is_relaxed() => {
            let command = fallback(facts);
            tracing::debug!(
                action = action.0,
                error = %err,
                fallback = %command,
                "illegal action replaced by fallback"
            );
            Ok(command)
        }
        Err(err) => Err(err),
    }
}

/// Relaxed-mode replacement for an illegal action
pub fn fallback(facts: &BattleFacts) -> ResolvedCommand {
    if let Some(command) = forced_command(facts) {
        return command;
    }

    let mask = evaluate(facts);
    mask.first_legal_move()
        .or_else(|| mask.first_legal_switch())
        .and_then(|action| resolve_legal(action, facts, &mask).ok())
        .unwrap_or(ResolvedCommand::Default)
}

fn resolve(action: ActionCode, facts: &BattleFacts) -> Result<ResolvedCommand, IllegalActionError> {
    if action == ActionCode::DEFAULT {
        return Ok(ResolvedCommand::Default);
    }
    if action == ActionCode::FORFEIT {
        return Ok(ResolvedCommand::Forfeit);
    }

    if let Some(command) = forced_command(facts) {
        return Ok(command);
    }

    let kind = action
        .kind()
        .ok_or(IllegalActionError::OutOfRangeAction { action })?;

    // Switching in does not need a combatant on the field; moving does
    if matches!(kind, ActionKind::Move(_)) && !facts.has_active {
        return Err(IllegalActionError::NoActiveCombatant { action });
    }

    let mask = evaluate(facts);
    if mask.is_legal(action) {
        return resolve_legal(action, facts, &mask);
    }
    if !mask.any() {
        return Err(IllegalActionError::NoLegalActionAvailable { action, mask });
    }
    Err(explain(action, kind, facts, mask))
}

/// Commands the battle imposes regardless of the requested action
fn forced_command(facts: &BattleFacts) -> Option<ResolvedCommand> {
    if let Some((_, target)) = facts.revival_target() {
        return Some(ResolvedCommand::Switch(target.clone()));
    }
    facts
        .forced_move()
        .map(|(_, forced)| ResolvedCommand::Move(forced.clone()))
}

/// Build the command for an action the mask marks legal
fn resolve_legal(
    action: ActionCode,
    facts: &BattleFacts,
    mask: &LegalityMask,
) -> Result<ResolvedCommand, IllegalActionError> {
    match action.kind() {
        Some(ActionKind::Switch(slot)) => {
            let target = facts
                .team
                .get(slot)
                .ok_or_else(|| IllegalActionError::IllegalSwitch {
                    action: Some(action),
                    target: format!("slot {}", slot),
                    reason: SwitchRejection::EmptySlot,
                    mask: *mask,
                })?;

            // The mask was built from the same snapshot, but the target is
            // checked again before it goes on the wire
            let rejection = if target.fainted {
                Some(SwitchRejection::Fainted)
            } else if target.active {
                Some(SwitchRejection::AlreadyActive)
            } else {
                None
            };
            if let Some(reason) = rejection {
                return Err(IllegalActionError::IllegalSwitch {
                    action: Some(action),
                    target: target.species.clone(),
                    reason,
                    mask: *mask,
                });
            }

            Ok(ResolvedCommand::Switch(disambiguate(target, facts).clone()))
        }
        Some(ActionKind::Move(slot)) => facts
            .moves
            .get(slot)
            .map(|m| ResolvedCommand::Move(m.clone()))
            .ok_or_else(|| IllegalActionError::IllegalMove {
                action: Some(action),
                target: format!("move slot {}", slot),
                reason: MoveRejection::EmptySlot,
                mask: *mask,
            }),
        Some(ActionKind::Default) => Ok(ResolvedCommand::Default),
        Some(ActionKind::Forfeit) => Ok(ResolvedCommand::Forfeit),
        None => Err(IllegalActionError::OutOfRangeAction { action }),
    }
}

/// Swap a forme alias for the matching entry of the server's switch list
fn disambiguate<'a>(target: &'a PartySlot, facts: &'a BattleFacts) -> &'a PartySlot {
    if !forme::is_alias(&target.species) {
        return target;
    }
    facts
        .available_switches
        .iter()
        .find(|p| forme::same_species(&p.species, &target.species))
        .unwrap_or(target)
}

/// Work out why the mask rejected an in-range action
fn explain(
    action: ActionCode,
    kind: ActionKind,
    facts: &BattleFacts,
    mask: LegalityMask,
) -> IllegalActionError {
    match kind {
        ActionKind::Switch(slot) => {
            let member = facts.team.get(slot);
            let reason = match member {
                _ if facts.trapped => SwitchRejection::Trapped,
                None => SwitchRejection::EmptySlot,
                Some(p) if p.fainted => SwitchRejection::Fainted,
                Some(_) => SwitchRejection::AlreadyActive,
            };
            IllegalActionError::IllegalSwitch {
                action: Some(action),
                target: member
                    .map(|p| p.species.clone())
                    .unwrap_or_else(|| format!("slot {}", slot)),
                reason,
                mask,
            }
        }
        ActionKind::Move(slot) => {
            let known = facts.moves.get(slot);
            let reason = match known {
                _ if facts.force_switch => MoveRejection::ForcedSwitch,
                None => MoveRejection::EmptySlot,
                Some(m) if m.disabled => MoveRejection::Disabled,
                Some(_) => MoveRejection::NoPp,
            };
            IllegalActionError::IllegalMove {
                action: Some(action),
                target: known
                    .map(|m| m.id.clone())
                    .unwrap_or_else(|| format!("move slot {}", slot)),
                reason,
                mask,
            }
        }
        ActionKind::Default | ActionKind::Forfeit => {
            IllegalActionError::NoLegalActionAvailable { action, mask }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MoveSlot, RECHARGE, STRUGGLE};

    fn team_of_six() -> Vec<PartySlot> {
        let mut team: Vec<PartySlot> = ["Pikachu", "Charizard", "Blastoise", "Venusaur", "Snorlax", "Lapras"]
            .into_iter()
            .map(PartySlot::new)
            .collect();
        team[0].active = true;
        team
    }

    fn facts() -> BattleFacts {
        let team = team_of_six();
        let available_switches = team.iter().filter(|p| !p.active).cloned().collect();
        BattleFacts {
            team,
            moves: vec![
                MoveSlot::new("thunderbolt", 15),
                MoveSlot::new("quickattack", 30),
                MoveSlot::new("irontail", 15),
                MoveSlot::new("voltswitch", 20),
            ],
            available_switches,
            has_active: true,
            ..Default::default()
        }
    }

    /// Moves from the restricted-moves scenario: tackle (no pp), growl,
    /// ember (disabled)
    fn restricted_facts() -> BattleFacts {
        let mut facts = facts();
        let mut ember = MoveSlot::new("ember", 5);
        ember.disabled = true;
        facts.moves = vec![MoveSlot::new("tackle", 0), MoveSlot::new("growl", 10), ember];
        facts
    }

    fn all_codes() -> impl Iterator<Item = ActionCode> {
        (-2..=9).map(ActionCode)
    }

    #[test]
    fn test_sentinels_on_any_facts() {
        for facts in [facts(), BattleFacts::default()] {
            for mode in [Mode::Strict, Mode::Relaxed] {
                assert_eq!(decode(ActionCode(-1), &facts, mode).unwrap(), ResolvedCommand::Forfeit);
                assert_eq!(decode(ActionCode(-2), &facts, mode).unwrap(), ResolvedCommand::Default);
            }
        }
    }

    #[test]
    fn test_switch_and_move() {
        let facts = facts();

        assert_eq!(
            decode(ActionCode(3), &facts, Mode::Strict).unwrap(),
            ResolvedCommand::Switch(PartySlot::new("Venusaur"))
        );
        assert_eq!(
            decode(ActionCode(8), &facts, Mode::Strict).unwrap(),
            ResolvedCommand::Move(MoveSlot::new("irontail", 15))
        );
    }

    #[test]
    fn test_fainted_switch_strict() {
        let mut facts = facts();
        facts.team[2].fainted = true;

        let err = decode(ActionCode(2), &facts, Mode::Strict).unwrap_err();

        assert!(matches!(
            err,
            IllegalActionError::IllegalSwitch {
                reason: SwitchRejection::Fainted,
                ..
            }
        ));
        assert_eq!(err.action(), Some(ActionCode(2)));
        assert!(err.mask().is_some());
    }

    #[test]
    fn test_fainted_switch_relaxed_falls_back() {
        let mut facts = facts();
        facts.team[2].fainted = true;

        let command = decode(ActionCode(2), &facts, Mode::Relaxed).unwrap();

        assert_eq!(command, ResolvedCommand::Move(MoveSlot::new("thunderbolt", 15)));
    }

    #[test]
    fn test_relaxed_falls_back_to_switch_when_no_moves() {
        let mut facts = facts();
        facts.force_switch = true;

        let command = decode(ActionCode(7), &facts, Mode::Relaxed).unwrap();

        assert_eq!(command, ResolvedCommand::Switch(PartySlot::new("Charizard")));
    }

    #[test]
    fn test_restricted_moves() {
        let facts = restricted_facts();

        assert_eq!(
            decode(ActionCode(7), &facts, Mode::Strict).unwrap(),
            ResolvedCommand::Move(MoveSlot::new("growl", 10))
        );
        assert!(matches!(
            decode(ActionCode(6), &facts, Mode::Strict),
            Err(IllegalActionError::IllegalMove {
                reason: MoveRejection::NoPp,
                ..
            })
        ));
        assert!(matches!(
            decode(ActionCode(8), &facts, Mode::Strict),
            Err(IllegalActionError::IllegalMove {
                reason: MoveRejection::Disabled,
                ..
            })
        ));
        assert!(matches!(
            decode(ActionCode(9), &facts, Mode::Strict),
            Err(IllegalActionError::IllegalMove {
                reason: MoveRejection::EmptySlot,
                ..
            })
        ));
        assert_eq!(
            decode(ActionCode(6), &facts, Mode::Relaxed).unwrap(),
            ResolvedCommand::Move(MoveSlot::new("growl", 10))
        );
    }

    #[test]
    fn test_reasons() {
        let mut trapped = facts();
        trapped.trapped = true;
        assert!(matches!(
            decode(ActionCode(1), &trapped, Mode::Strict),
            Err(IllegalActionError::IllegalSwitch {
                reason: SwitchRejection::Trapped,
                ..
            })
        ));

        let mut forced = facts();
        forced.force_switch = true;
        assert!(matches!(
            decode(ActionCode(6), &forced, Mode::Strict),
            Err(IllegalActionError::IllegalMove {
                reason: MoveRejection::ForcedSwitch,
                ..
            })
        ));

        assert!(matches!(
            decode(ActionCode(0), &facts(), Mode::Strict),
            Err(IllegalActionError::IllegalSwitch {
                reason: SwitchRejection::AlreadyActive,
                ..
            })
        ));

        let mut small = facts();
        small.team.truncate(3);
        assert!(matches!(
            decode(ActionCode(5), &small, Mode::Strict),
            Err(IllegalActionError::IllegalSwitch {
                reason: SwitchRejection::EmptySlot,
                ..
            })
        ));
    }

    #[test]
    fn test_out_of_range() {
        let facts = facts();

        assert_eq!(
            decode(ActionCode(10), &facts, Mode::Strict),
            Err(IllegalActionError::OutOfRangeAction { action: ActionCode(10) })
        );
        assert!(decode(ActionCode(-3), &facts, Mode::Strict).is_err());
        assert_eq!(
            decode(ActionCode(42), &facts, Mode::Relaxed).unwrap(),
            ResolvedCommand::Move(MoveSlot::new("thunderbolt", 15))
        );
    }

    #[test]
    fn test_no_active_combatant() {
        let mut facts = facts();
        facts.has_active = false;
        facts.team[0].active = false;

        assert_eq!(
            decode(ActionCode(6), &facts, Mode::Strict),
            Err(IllegalActionError::NoActiveCombatant { action: ActionCode(6) })
        );
        assert_eq!(
            decode(ActionCode(1), &facts, Mode::Strict),
            Ok(ResolvedCommand::Switch(facts.team[1].clone()))
        );
        assert_eq!(
            decode(ActionCode(7), &facts, Mode::Relaxed),
            Ok(ResolvedCommand::Switch(facts.team[0].clone()))
        );
    }

    #[test]
    fn test_no_legal_action() {
        let mut facts = facts();
        facts.trapped = true;
        for m in &mut facts.moves {
            m.pp = 0;
        }

        let err = decode(ActionCode(6), &facts, Mode::Strict).unwrap_err();
        assert!(matches!(err, IllegalActionError::NoLegalActionAvailable { .. }));
        assert_eq!(decode(ActionCode(6), &facts, Mode::Relaxed).unwrap(), ResolvedCommand::Default);
    }

    #[test]
    fn test_must_recharge_overrides_action() {
        let mut facts = facts();
        facts.must_recharge = true;
        facts.moves = vec![MoveSlot::new(RECHARGE, 0)];

        for action in all_codes().filter(|a| !a.is_sentinel()) {
            for mode in [Mode::Strict, Mode::Relaxed] {
                assert_eq!(
                    decode(action, &facts, mode).unwrap(),
                    ResolvedCommand::Move(MoveSlot::new(RECHARGE, 0))
                );
            }
        }
        assert_eq!(decode(ActionCode(-1), &facts, Mode::Strict).unwrap(), ResolvedCommand::Forfeit);
        assert_eq!(decode(ActionCode(-2), &facts, Mode::Strict).unwrap(), ResolvedCommand::Default);
    }

    #[test]
    fn test_struggle_overrides_action() {
        let mut facts = facts();
        facts.moves = vec![MoveSlot::new(STRUGGLE, 0)];

        assert_eq!(
            decode(ActionCode(2), &facts, Mode::Strict).unwrap(),
            ResolvedCommand::Move(MoveSlot::new(STRUGGLE, 0))
        );
    }

    #[test]
    fn test_reviving_picks_first_fainted() {
        let mut facts = facts();
        facts.reviving = true;
        facts.team[3].fainted = true;
        facts.team[4].fainted = true;

        for action in [ActionCode(1), ActionCode(7), ActionCode(99)] {
            let mut expected = PartySlot::new("Venusaur");
            expected.fainted = true;
            assert_eq!(decode(action, &facts, Mode::Strict).unwrap(), ResolvedCommand::Switch(expected));
        }
    }

    #[test]
    fn test_reviving_without_fainted_members_decodes_normally() {
        let mut facts = facts();
        facts.reviving = true;

        assert_eq!(
            decode(ActionCode(6), &facts, Mode::Strict).unwrap(),
            ResolvedCommand::Move(MoveSlot::new("thunderbolt", 15))
        );
    }

    #[test]
    fn test_forme_alias_uses_reported_switch() {
        let mut facts = facts();
        facts.team[4] = PartySlot::new("Minior-Red");
        facts.available_switches = vec![PartySlot::new("Minior-Meteor")];

        assert_eq!(
            decode(ActionCode(4), &facts, Mode::Strict).unwrap(),
            ResolvedCommand::Switch(PartySlot::new("Minior-Meteor"))
        );
    }

    #[test]
    fn test_stale_active_flag_rejected() {
        // Mask and target disagree only if the facts are inconsistent
        let facts = facts();
        let mask = LegalityMask::from_array([true; 10]);

        assert!(matches!(
            resolve_legal(ActionCode(0), &facts, &mask),
            Err(IllegalActionError::IllegalSwitch {
                reason: SwitchRejection::AlreadyActive,
                ..
            })
        ));
    }

    #[test]
    fn test_relaxed_never_default_with_legal_actions() {
        let mut variants = vec![facts(), restricted_facts()];
        let mut trapped = facts();
        trapped.trapped = true;
        variants.push(trapped);
        let mut forced = facts();
        forced.force_switch = true;
        variants.push(forced);
        let mut no_active = facts();
        no_active.has_active = false;
        variants.push(no_active);

        for facts in &variants {
            assert!(evaluate(facts).any());
            for action in all_codes().filter(|a| !a.is_sentinel()).chain([ActionCode(12), ActionCode(-7)]) {
                let command = decode(action, facts, Mode::Relaxed).unwrap();
                assert!(!command.is_default(), "action {} decoded to default", action);
            }
        }
    }

    #[test]
    fn test_decode_is_deterministic() {
        let facts = restricted_facts();
        for action in all_codes() {
            assert_eq!(
                decode(action, &facts, Mode::Relaxed),
                decode(action, &facts, Mode::Relaxed)
            );
        }
    }
}
