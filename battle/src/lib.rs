//! Action-space translation for Pokemon Showdown singles.
//!
//! A learning agent emits one of a fixed set of action codes every turn,
//! while the server only accepts whatever moves and switches are legal at
//! that moment. This crate maps between the two.
//!
//! # Overview
//!
//! ```text
//! pokeact-protocol (wire format)
//!        │
//!        ▼
//! pokeact-battle (facts, legality, decode/encode) ← THIS CRATE
//!        │
//!        └─> pokeact-agent (policies, counters, decision loop)
//! ```
//!
//! # Action space
//!
//! | code    | meaning                                 |
//! |---------|-----------------------------------------|
//! | `-2`    | default order (`/choose default`)       |
//! | `-1`    | forfeit (`/forfeit`)                    |
//! | `0..=5` | switch to party slot, team order        |
//! | `6..=9` | use move slot `code - 6`                |
//!
//! # Main Types
//!
//! - [`BattleFacts`] - snapshot of our side for one decision
//! - [`LegalityMask`] - which action codes are currently legal
//! - [`ResolvedCommand`] - move, switch, default or forfeit
//! - [`IllegalActionError`] - why an action was rejected (strict mode)
//!
//! # Example Usage
//!
//! ```ignore
//! use pokeact_battle::{ActionCode, BattleFacts, Mode, decode, serialize};
//!
//! let facts = BattleFacts::from_request(&request)?;
//! let command = decode(ActionCode(7), &facts, Mode::Relaxed)?;
//! transport.send(serialize(&command));
//! ```

pub mod error;
pub mod forme;
pub mod resolve;
pub mod serialize;
pub mod types;

pub use error::{IllegalActionError, MoveRejection, SwitchRejection};
pub use resolve::{LegalityMask, Mode, decode, encode, evaluate, fallback};
pub use serialize::{serialize, to_client_command};
pub use types::{
    ACTION_SPACE, ActionCode, ActionKind, BattleFacts, MOVE_SLOTS, MoveSlot, PartySlot,
    RECHARGE, ResolvedCommand, STRUGGLE, SWITCH_SLOTS,
};
