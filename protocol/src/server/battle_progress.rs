//! Battle progress message parsers
//!
//! These messages drive the decision loop of a battle.

use super::ServerMessage;
use crate::ParseError;
use anyhow::Result;
use serde_json::Value;

/// Parse |request|REQUEST (JSON)
pub fn parse_request(parts: &[&str]) -> Result<ServerMessage> {
    // The JSON payload may itself contain '|' characters
    let json_str = parts[2..].join("|");
    if json_str.is_empty() {
        // Showdown sends an empty |request| to clear the previous one
        return Ok(ServerMessage::Request(Value::Null));
    }
    let request: Value = serde_json::from_str(&json_str)?;
    Ok(ServerMessage::Request(request))
}

/// Parse |turn|NUMBER
pub fn parse_turn(parts: &[&str]) -> Result<ServerMessage> {
    let turn = parts
        .get(2)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing turn number"))?;

    Ok(ServerMessage::Turn(turn))
}

/// Parse |win|USER
pub fn parse_win(parts: &[&str]) -> Result<ServerMessage> {
    let user = parts.get(2).unwrap_or(&"").to_string();
    Ok(ServerMessage::Win(user))
}

/// Parse |tie
pub fn parse_tie(_parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Tie)
}

/// Parse |error|MESSAGE
pub fn parse_error(parts: &[&str]) -> Result<ServerMessage> {
    if parts.len() < 3 {
        return Err(ParseError::MissingField("error message".to_string()).into());
    }
    Ok(ServerMessage::Error(parts[2..].join("|")))
}
