//! Command -> protocol text

use pokeact_protocol::ClientCommand;

use crate::forme;
use crate::types::ResolvedCommand;

/// The `/choose` argument for a command, or `None` for a forfeit
fn choice(command: &ResolvedCommand) -> Option<String> {
    match command {
        // The server only accepts the recharge turn as the first move slot
        ResolvedCommand::Move(m) if m.is_recharge() => Some("move 1".to_string()),
        ResolvedCommand::Move(m) => Some(format!("move {}", m.id)),
        ResolvedCommand::Switch(p) => Some(format!("switch {}", forme::normalize(&p.species))),
        ResolvedCommand::Default => Some("default".to_string()),
        ResolvedCommand::Forfeit => None,
    }
}

/// Client command for a resolved command, tagged with the request id
pub fn to_client_command(command: &ResolvedCommand, rqid: Option<u64>) -> ClientCommand {
    match choice(command) {
        Some(choice) => ClientCommand::Choose { choice, rqid },
        None => ClientCommand::Forfeit,
    }
}

/// Render a command as the literal text sent to the server
///
/// ```
/// use pokeact_battle::{MoveSlot, ResolvedCommand, serialize};
///
/// let command = ResolvedCommand::Move(MoveSlot::new("thunderbolt", 15));
/// assert_eq!(serialize(&command), "/choose move thunderbolt");
/// ```
pub fn serialize(command: &ResolvedCommand) -> String {
    to_client_command(command, None).to_protocol_string()
}
