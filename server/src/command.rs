use common::gomoku::{MoveRequest, Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Play { x: Option<String>, y: Option<String> },
    Chat(String),
    Undo,
    Reset,
}

impl SessionCommand {
    pub fn move_request(&self, side: &str) -> Option<MoveRequest> {
        match self {
            SessionCommand::Play { x, y } => Some(MoveRequest {
                x: x.clone(),
                y: y.clone(),
                side: Some(side.to_string()),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Session { side: String, command: SessionCommand },
    Board,
    History,
    Chats,
    State,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <side> play <x> <y>   place a mark (side: 1, 2, PLAYER1, PLAYER2)
  <side> chat <text>    send a chat message
  <side> undo           ask to take back the last move
  <side> reset          ask to clear the board
  board | history | chats | state | help | quit";

/// Accepts `1`, `p1`, `player1` in any case; anything else is passed through
/// so the engine reports it.
pub fn normalize_side(token: &str) -> String {
    match token.to_ascii_lowercase().as_str() {
        "1" | "p1" | "player1" => Side::Player1.to_string(),
        "2" | "p2" | "player2" => Side::Player2.to_string(),
        _ => token.to_string(),
    }
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let mut parts = line.splitn(3, char::is_whitespace);
    let Some(first) = parts.next().filter(|p| !p.is_empty()) else {
        return Err("Empty command".to_string());
    };

    match first.to_ascii_lowercase().as_str() {
        "board" => return Ok(ConsoleCommand::Board),
        "history" => return Ok(ConsoleCommand::History),
        "chats" => return Ok(ConsoleCommand::Chats),
        "state" => return Ok(ConsoleCommand::State),
        "help" | "?" => return Ok(ConsoleCommand::Help),
        "quit" | "exit" => return Ok(ConsoleCommand::Quit),
        _ => {}
    }

    let side = normalize_side(first);
    let verb = parts
        .next()
        .ok_or_else(|| format!("Missing action for {}", side))?;
    let rest = parts.next().unwrap_or("").trim();

    let command = match verb.to_ascii_lowercase().as_str() {
        "play" => {
            let mut coords = rest.split_whitespace().map(str::to_string);
            SessionCommand::Play {
                x: coords.next(),
                y: coords.next(),
            }
        }
        "chat" | "say" => SessionCommand::Chat(rest.to_string()),
        "undo" => SessionCommand::Undo,
        "reset" => SessionCommand::Reset,
        other => return Err(format!("Unknown action: {}", other)),
    };

    Ok(ConsoleCommand::Session { side, command })
}
