use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "PLAYER1")]
    Player1,
    #[serde(rename = "PLAYER2")]
    Player2,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Player1, Side::Player2];

    pub fn opponent(&self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player1 => "PLAYER1",
            Side::Player2 => "PLAYER2",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Side::Player1 => 'X',
            Side::Player2 => 'O',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLAYER1" => Ok(Side::Player1),
            "PLAYER2" => Ok(Side::Player2),
            other => Err(format!("Unknown side: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub x: usize,
    pub y: usize,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub side: Side,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    pub side: Side,
    pub start: Position,
    pub end: Position,
}

impl WinningLine {
    pub fn new(side: Side, start: Position, end: Position) -> Self {
        Self { side, start, end }
    }
}

/// Delivered to the registered win callback when a move completes a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinEvent {
    pub session_id: SessionId,
    pub side: Side,
    pub line: WinningLine,
}
