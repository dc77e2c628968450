use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{SessionId, log, log_debug};
use super::board::Board;
use super::confirmation::{ConfirmOutcome, ConfirmedAction, Confirmations};
use super::error::GameError;
use super::request::{
    MISSING_CHAT_FIELDS, MISSING_MOVE_FIELDS, MoveRequest, parse_coordinate, parse_side, present,
};
use super::settings::GomokuSettings;
use super::types::{ChatMessage, Move, Position, Side, WinEvent};
use super::win_detector::find_winning_line;

pub type WinCallback = Box<dyn Fn(&WinEvent) + Send + Sync>;

/// One match: board, turn order, move history, chat and the pending
/// undo/reset agreements. All mutation goes through the methods below.
pub struct GomokuSession {
    id: SessionId,
    settings: GomokuSettings,
    board: Board,
    to_play: Side,
    winning_side: Option<Side>,
    history: Vec<Move>,
    round_start: usize,
    chats: Vec<ChatMessage>,
    confirmations: Confirmations,
    win_callback: Option<WinCallback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub size: usize,
    pub win_length: usize,
    pub to_play: Side,
    pub winning_side: Option<Side>,
    pub board: Board,
    pub history: Vec<Move>,
    pub round_start: usize,
    pub chats: Vec<ChatMessage>,
    pub pending_undo: Option<Side>,
    pub pending_reset: Option<Side>,
}

impl fmt::Debug for GomokuSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GomokuSession")
            .field("id", &self.id)
            .field("settings", &self.settings)
            .field("to_play", &self.to_play)
            .field("winning_side", &self.winning_side)
            .field("history", &self.history.len())
            .field("round_start", &self.round_start)
            .field("chats", &self.chats.len())
            .field("confirmations", &self.confirmations)
            .field("win_callback", &self.win_callback.is_some())
            .finish()
    }
}

impl Default for GomokuSession {
    fn default() -> Self {
        Self::new(GomokuSettings::default())
    }
}

impl GomokuSession {
    pub fn new(settings: GomokuSettings) -> Self {
        Self::with_id(SessionId::generate(), settings)
    }

    pub fn with_id(id: SessionId, settings: GomokuSettings) -> Self {
        let settings = GomokuSettings::new(settings.size, settings.win_length);
        log!(
            "[session:{}] Created, size = {}, win length = {}",
            id, settings.size, settings.win_length
        );
        Self {
            id,
            board: Board::new(settings.size),
            settings,
            to_play: Side::Player1,
            winning_side: None,
            history: Vec::new(),
            round_start: 0,
            chats: Vec::new(),
            confirmations: Confirmations::default(),
            win_callback: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn size(&self) -> usize {
        self.settings.size
    }

    pub fn win_length(&self) -> usize {
        self.settings.win_length
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<Option<Side>, GameError> {
        self.board.get(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    pub fn to_play(&self) -> Side {
        self.to_play
    }

    pub fn winning_side(&self) -> Option<Side> {
        self.winning_side
    }

    pub fn is_over(&self) -> bool {
        self.winning_side.is_some()
    }

    /// Every accepted move since creation, across resets.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Moves played since creation or the last reset.
    pub fn current_round(&self) -> &[Move] {
        &self.history[self.round_start..]
    }

    pub fn chats(&self) -> &[ChatMessage] {
        &self.chats
    }

    pub fn pending_undo(&self) -> Option<Side> {
        self.confirmations.get(ConfirmedAction::Undo).requested_by()
    }

    pub fn pending_reset(&self) -> Option<Side> {
        self.confirmations.get(ConfirmedAction::Reset).requested_by()
    }

    pub fn check_win(&self, side: Side) -> bool {
        find_winning_line(&self.board, side, self.settings.win_length).is_some()
    }

    /// Replaces any previously registered callback.
    pub fn register_win_callback<F>(&mut self, callback: F)
    where
        F: Fn(&WinEvent) + Send + Sync + 'static,
    {
        self.win_callback = Some(Box::new(callback));
    }

    pub fn play(&mut self, x: usize, y: usize, side: Side) -> Result<(), GameError> {
        if self.winning_side.is_some() {
            return Err(GameError::GameOver);
        }
        if side != self.to_play {
            return Err(GameError::NotYourTurn);
        }
        self.place(x, y, side)
    }

    /// Validates raw input in order: game over, missing fields, non-integer
    /// coordinates, turn, bounds, occupancy.
    pub fn play_request(&mut self, request: &MoveRequest) -> Result<(), GameError> {
        if self.winning_side.is_some() {
            return Err(GameError::GameOver);
        }
        let (x, y, side) = request
            .fields()
            .ok_or_else(|| GameError::InvalidArgument(MISSING_MOVE_FIELDS.to_string()))?;
        let x = parse_coordinate(x)?;
        let y = parse_coordinate(y)?;

        let side = match side.parse::<Side>() {
            Ok(side) if side == self.to_play => side,
            _ => return Err(GameError::NotYourTurn),
        };

        let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) else {
            return Err(GameError::OutOfBounds {
                size: self.size(),
                x,
                y,
            });
        };
        self.place(ux, uy, side)
    }

    fn place(&mut self, x: usize, y: usize, side: Side) -> Result<(), GameError> {
        if !self.board.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        if !self.board.is_empty_at(x, y) {
            return Err(GameError::CellOccupied(Position::new(x, y)));
        }

        self.board.set(x, y, side);
        self.to_play = side.opponent();
        self.history.push(Move { x, y, side });
        self.confirmations.clear();
        log_debug!("[session:{}] {} played {}, {}", self.id, side, x, y);

        self.check_win_status();
        Ok(())
    }

    fn check_win_status(&mut self) {
        for side in Side::ALL {
            let Some(line) = find_winning_line(&self.board, side, self.settings.win_length) else {
                continue;
            };
            self.winning_side = Some(side);
            log!(
                "[session:{}] {} wins with a line from ({}) to ({})",
                self.id, side, line.start, line.end
            );
            if let Some(callback) = &self.win_callback {
                callback(&WinEvent {
                    session_id: self.id.clone(),
                    side,
                    line,
                });
            }
        }
    }

    pub fn chat(&mut self, side: Side, text: &str) -> Result<&mut Self, GameError> {
        if text.is_empty() {
            return Err(GameError::InvalidArgument(MISSING_CHAT_FIELDS.to_string()));
        }
        self.chats.push(ChatMessage {
            side,
            text: text.to_string(),
            sent_at: Utc::now(),
        });
        Ok(self)
    }

    pub fn chat_request(
        &mut self,
        side: Option<&str>,
        text: Option<&str>,
    ) -> Result<&mut Self, GameError> {
        let missing = || GameError::InvalidArgument(MISSING_CHAT_FIELDS.to_string());
        let side = present(side).ok_or_else(missing)?;
        let text = text.filter(|t| !t.is_empty()).ok_or_else(missing)?;
        let side = side.parse::<Side>().map_err(|_| missing())?;
        self.chat(side, text)
    }

    /// Takes back the last move of the current round once both sides ask.
    pub fn undo(&mut self, side: Side) -> Result<&mut Self, GameError> {
        if self.current_round().is_empty() {
            return Err(GameError::NothingToUndo);
        }
        if self.confirmations.confirm(ConfirmedAction::Undo, side) == ConfirmOutcome::Pending {
            return Err(GameError::PendingConfirmation(ConfirmedAction::Undo));
        }

        let Some(last) = self.history.pop() else {
            return Err(GameError::NothingToUndo);
        };
        self.winning_side = None;
        self.to_play = last.side;
        self.board.clear_cell(last.x, last.y);
        log!(
            "[session:{}] Undid {} at {}, {}",
            self.id, last.side, last.x, last.y
        );
        Ok(self)
    }

    pub fn undo_request(&mut self, side: Option<&str>) -> Result<&mut Self, GameError> {
        let side = parse_side(side)?;
        self.undo(side)
    }

    /// Clears board, turn and winner once both sides ask. History and chat
    /// are kept; the next round starts at the current end of history.
    pub fn reset(&mut self, side: Side) -> Result<&mut Self, GameError> {
        if self.confirmations.confirm(ConfirmedAction::Reset, side) == ConfirmOutcome::Pending {
            return Err(GameError::PendingConfirmation(ConfirmedAction::Reset));
        }

        self.confirmations.clear();
        self.winning_side = None;
        self.board = Board::new(self.settings.size);
        self.to_play = Side::Player1;
        self.round_start = self.history.len();
        log!(
            "[session:{}] Reset, size = {}",
            self.id, self.settings.size
        );
        Ok(self)
    }

    pub fn reset_request(&mut self, side: Option<&str>) -> Result<&mut Self, GameError> {
        let side = parse_side(side)?;
        self.reset(side)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            size: self.settings.size,
            win_length: self.settings.win_length,
            to_play: self.to_play,
            winning_side: self.winning_side,
            board: self.board.clone(),
            history: self.history.clone(),
            round_start: self.round_start,
            chats: self.chats.clone(),
            pending_undo: self.pending_undo(),
            pending_reset: self.pending_reset(),
        }
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> GameError {
        GameError::OutOfBounds {
            size: self.settings.size,
            x: i64::try_from(x).unwrap_or(i64::MAX),
            y: i64::try_from(y).unwrap_or(i64::MAX),
        }
    }
}
