use std::fmt;

use super::confirmation::ConfirmedAction;
use super::types::Position;

pub const BAD_REQUEST: u16 = 400;
pub const FORBIDDEN: u16 = 403;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidArgument(String),
    NotYourTurn,
    OutOfBounds { size: usize, x: i64, y: i64 },
    CellOccupied(Position),
    GameOver,
    NothingToUndo,
    /// Half of a two-phase action; the other side still has to agree.
    PendingConfirmation(ConfirmedAction),
}

impl GameError {
    pub fn code(&self) -> u16 {
        match self {
            GameError::PendingConfirmation(_) => FORBIDDEN,
            _ => BAD_REQUEST,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, GameError::PendingConfirmation(_))
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidArgument(message) => f.write_str(message),
            GameError::NotYourTurn => f.write_str("Not your turn!"),
            GameError::OutOfBounds { size, x, y } => write!(
                f,
                "The size of this board is {}, requested {}, {}",
                size, x, y
            ),
            GameError::CellOccupied(position) => {
                write!(f, "There is already a piece at {}", position)
            }
            GameError::GameOver => f.write_str("Game has already ended!"),
            GameError::NothingToUndo => f.write_str("There are no moves to undo!"),
            GameError::PendingConfirmation(action) => {
                write!(f, "Ask the other player to confirm the {}!", action)
            }
        }
    }
}

impl std::error::Error for GameError {}
