//! Translation between action codes and commands
//!
//! [`evaluate`] computes the legality mask, [`decode`] maps an action code
//! to a [`ResolvedCommand`](crate::ResolvedCommand) and [`encode`] recovers
//! the action code for a command. All three are pure functions of the
//! battle facts they are given.

mod decode;
mod encode;
mod legality;

pub use decode::{decode, fallback};
pub use encode::encode;
pub use legality::{LegalityMask, evaluate};

/// How illegal requests are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Return an [`IllegalActionError`](crate::IllegalActionError)
    Strict,
    /// Substitute a legal fallback
    #[default]
    Relaxed,
}

impl Mode {
    pub fn is_relaxed(self) -> bool {
        self == Mode::Relaxed
    }
}
