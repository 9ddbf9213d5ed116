mod battle_progress;
mod request;

use anyhow::Result;
use serde_json::Value;

pub use request::{ActivePokemon, BattleRequest, MoveSlot, SideInfo, SidePokemon};

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// |request|REQUEST (raw JSON, see [`BattleRequest::parse`])
    Request(Value),
    /// |turn|NUMBER
    Turn(u32),
    /// |win|USER
    Win(String),
    /// |tie
    Tie,
    /// |error|MESSAGE (e.g. "[Invalid choice] Can't switch: ...")
    Error(String),
    Raw(String),
}

impl ServerMessage {
    /// Whether this is an error caused by a rejected /choose
    pub fn is_invalid_choice(&self) -> bool {
        matches!(self, ServerMessage::Error(message) if message.starts_with("[Invalid choice]"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerFrame {
    pub room_id: Option<String>,
    pub messages: Vec<ServerMessage>,
}

/// Parse a complete WebSocket frame into structured messages
pub fn parse_server_frame(frame: &str) -> Result<ServerFrame> {
    let mut lines = frame.lines();
    let mut room_id = None;

    // Check if first line is >ROOMID
    if let Some(first_line) = lines.clone().next() {
        if let Some(room) = first_line.strip_prefix('>') {
            room_id = Some(room.to_string());
            lines.next();
        }
    }

    let messages: Vec<ServerMessage> = lines
        .filter(|line| !line.trim().is_empty())
        .map(parse_server_message)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ServerFrame { room_id, messages })
}

/// Parse a single line from the server into a ServerMessage
pub fn parse_server_message(line: &str) -> Result<ServerMessage> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(ServerMessage::Raw(String::new()));
    }

    if !line.starts_with('|') {
        return Ok(ServerMessage::Raw(line.to_string()));
    }

    let parts: Vec<&str> = line.split('|').collect();

    if parts.len() < 2 {
        return Ok(ServerMessage::Raw(line.to_string()));
    }

    match parts[1] {
        "request" => battle_progress::parse_request(&parts),
        "turn" => battle_progress::parse_turn(&parts),
        "win" => battle_progress::parse_win(&parts),
        "tie" => battle_progress::parse_tie(&parts),
        "error" => battle_progress::parse_error(&parts),
        _ => Ok(ServerMessage::Raw(line.to_string())),
    }
}
