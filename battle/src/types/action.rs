//! Action codes emitted by the agent

/// Number of switch slots (party size)
pub const SWITCH_SLOTS: usize = 6;

/// Number of move slots on the active pokemon
pub const MOVE_SLOTS: usize = 4;

/// Width of the action space (switch slots followed by move slots)
pub const ACTION_SPACE: usize = SWITCH_SLOTS + MOVE_SLOTS;

/// A discrete action index in `{-2, -1} ∪ [0, 9]`
///
/// `-2` is the default order, `-1` forfeits, `0..=5` switch to a party slot
/// and `6..=9` use a move slot of the active pokemon. Values outside that
/// domain are representable so that malformed agent output can be rejected
/// instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionCode(pub i32);

/// What an in-range action code asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Default,
    Forfeit,
    /// Party slot (0-5) in team order
    Switch(usize),
    /// Move slot (0-3) in the active pokemon's move listing
    Move(usize),
}

impl ActionCode {
    pub const DEFAULT: ActionCode = ActionCode(-2);
    pub const FORFEIT: ActionCode = ActionCode(-1);

    /// Action code for switching to a party slot
    pub fn switch(slot: usize) -> Self {
        ActionCode(slot as i32)
    }

    /// Action code for using a move slot
    pub fn move_slot(slot: usize) -> Self {
        ActionCode((SWITCH_SLOTS + slot) as i32)
    }

    /// Build an action code from a mask index (0-9)
    pub fn from_index(index: usize) -> Self {
        ActionCode(index as i32)
    }

    /// Index into a [`LegalityMask`](crate::LegalityMask), if the code is a
    /// switch or move
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|&i| i < ACTION_SPACE)
    }

    /// Classify the code, or `None` when it is outside the action space
    pub fn kind(self) -> Option<ActionKind> {
        match self.0 {
            -2 => Some(ActionKind::Default),
            -1 => Some(ActionKind::Forfeit),
            _ => self.index().map(|i| {
                if i < SWITCH_SLOTS {
                    ActionKind::Switch(i)
                } else {
                    ActionKind::Move(i - SWITCH_SLOTS)
                }
            }),
        }
    }

    /// Whether this is one of the two sentinel codes (default/forfeit)
    pub fn is_sentinel(self) -> bool {
        self == Self::DEFAULT || self == Self::FORFEIT
    }
}

impl From<i32> for ActionCode {
    fn from(value: i32) -> Self {
        ActionCode(value)
    }
}

impl std::fmt::Display for ActionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
