mod board;
mod confirmation;
mod error;
mod request;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use confirmation::{ConfirmOutcome, Confirmation, ConfirmedAction, Confirmations};
pub use error::{BAD_REQUEST, FORBIDDEN, GameError};
pub use request::{MoveRequest, parse_coordinate, parse_side};
pub use session::{GomokuSession, SessionSnapshot, WinCallback};
pub use settings::{DEFAULT_SIZE, DEFAULT_WIN_LENGTH, GomokuSettings, MAX_SIZE};
pub use types::{ChatMessage, Move, Position, Side, WinEvent, WinningLine};
pub use win_detector::{check_win, find_winning_line};
