//! Legality mask evaluation

use crate::types::{ACTION_SPACE, ActionCode, BattleFacts, MOVE_SLOTS, SWITCH_SLOTS};

/// One flag per action code in `[0, 9]`: switch slots first, then move slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegalityMask([bool; ACTION_SPACE]);

impl LegalityMask {
    pub fn from_array(flags: [bool; ACTION_SPACE]) -> Self {
        Self(flags)
    }

    pub fn as_array(&self) -> &[bool; ACTION_SPACE] {
        &self.0
    }

    fn set(&mut self, index: usize) {
        self.0[index] = true;
    }

    /// Whether the action code is legal; sentinels and out-of-range codes
    /// are never part of the mask
    pub fn is_legal(&self, action: ActionCode) -> bool {
        action.index().is_some_and(|i| self.0[i])
    }

    /// Switch slot flags (actions 0-5)
    pub fn switches(&self) -> &[bool] {
        &self.0[..SWITCH_SLOTS]
    }

    /// Move slot flags (actions 6-9)
    pub fn moves(&self) -> &[bool] {
        &self.0[SWITCH_SLOTS..]
    }

    /// Whether any action is legal
    pub fn any(&self) -> bool {
        self.0.iter().any(|&legal| legal)
    }

    /// Number of legal actions
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&legal| legal).count()
    }

    /// All legal action codes in ascending order
    pub fn legal_actions(&self) -> impl Iterator<Item = ActionCode> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, legal)| **legal)
            .map(|(i, _)| ActionCode::from_index(i))
    }

    pub fn first_legal_move(&self) -> Option<ActionCode> {
        self.moves()
            .iter()
            .position(|&legal| legal)
            .map(ActionCode::move_slot)
    }

    pub fn first_legal_switch(&self) -> Option<ActionCode> {
        self.switches()
            .iter()
            .position(|&legal| legal)
            .map(ActionCode::switch)
    }
}

impl std::fmt::Display for LegalityMask {
    /// Renders as `switches|moves`, e.g. `110000|0100`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &legal in self.switches() {
            write!(f, "{}", legal as u8)?;
        }
        write!(f, "|")?;
        for &legal in self.moves() {
            write!(f, "{}", legal as u8)?;
        }
        Ok(())
    }
}

/// Compute which action codes are legal for the given facts
///
/// Never fails; an all-false mask is a valid answer the caller must handle.
pub fn evaluate(facts: &BattleFacts) -> LegalityMask {
    let mut mask = LegalityMask::default();

    // Recharge, struggle and lock-in leave exactly one move, whatever its pp says
    if let Some((slot, _)) = facts.forced_move() {
        if slot < MOVE_SLOTS {
            mask.set(SWITCH_SLOTS + slot);
        }
        return mask;
    }
    if facts.must_recharge {
        return mask;
    }

    if !facts.trapped {
        for (i, member) in facts.team.iter().take(SWITCH_SLOTS).enumerate() {
            if !member.fainted && !member.active {
                mask.set(i);
            }
        }
    }

    if !facts.force_switch && facts.has_active {
        for (i, slot) in facts.moves.iter().take(MOVE_SLOTS).enumerate() {
            if slot.is_usable() {
                mask.set(SWITCH_SLOTS + i);
            }
        }
    }

    mask
}
