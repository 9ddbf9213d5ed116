//! Domain types for action resolution

mod action;
mod command;
mod facts;

pub use action::{ACTION_SPACE, ActionCode, ActionKind, MOVE_SLOTS, SWITCH_SLOTS};
pub use command::ResolvedCommand;
pub use facts::{BattleFacts, MoveSlot, PartySlot, RECHARGE, STRUGGLE};
