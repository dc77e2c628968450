use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use common::gomoku::{GameError, GomokuSession, GomokuSettings, SessionSnapshot, Side};
use common::{SessionId, log};

use crate::command::SessionCommand;
use crate::win_broadcaster::WinBroadcaster;

pub type SharedSession = Arc<Mutex<GomokuSession>>;

pub const NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    RoomNotFound(SessionId),
    Game(GameError),
}

impl RoomError {
    pub fn code(&self) -> u16 {
        match self {
            RoomError::RoomNotFound(_) => NOT_FOUND,
            RoomError::Game(e) => e.code(),
        }
    }
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomError::RoomNotFound(id) => write!(f, "Room {} not found", id),
            RoomError::Game(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RoomError {}

impl From<GameError> for RoomError {
    fn from(e: GameError) -> Self {
        RoomError::Game(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Played { next: Side, winner: Option<Side> },
    Chatted,
    Undone { next: Side },
    Reset,
}

struct Room {
    session: SharedSession,
    last_activity: Instant,
}

/// Owns every live session. The map lock is held only long enough to find
/// a room; each command then runs under that room's own session lock.
#[derive(Debug, Clone)]
pub struct RoomManager {
    rooms: Arc<Mutex<HashMap<SessionId, Room>>>,
    broadcaster: WinBroadcaster,
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Room")
            .field("last_activity", &self.last_activity)
            .finish()
    }
}

impl RoomManager {
    pub fn new(broadcaster: WinBroadcaster) -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
            broadcaster,
        }
    }

    pub fn broadcaster(&self) -> &WinBroadcaster {
        &self.broadcaster
    }

    pub async fn create_room(&self, settings: GomokuSettings) -> SessionId {
        let mut session = GomokuSession::new(settings);
        let broadcaster = self.broadcaster.clone();
        session.register_win_callback(move |event| broadcaster.publish(event.clone()));

        let session_id = session.id().clone();
        let room = Room {
            session: Arc::new(Mutex::new(session)),
            last_activity: Instant::now(),
        };

        self.rooms.lock().await.insert(session_id.clone(), room);
        log!("Room created: {}", session_id);
        session_id
    }

    pub async fn room(&self, session_id: &SessionId) -> Option<SharedSession> {
        let rooms = self.rooms.lock().await;
        rooms.get(session_id).map(|room| room.session.clone())
    }

    pub async fn remove_room(&self, session_id: &SessionId) -> bool {
        let removed = self.rooms.lock().await.remove(session_id).is_some();
        if removed {
            log!("Room removed: {}", session_id);
        }
        removed
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }

    pub async fn inactive_rooms(&self, timeout: Duration) -> Vec<SessionId> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .filter(|(_, room)| room.last_activity.elapsed() >= timeout)
            .map(|(id, _)| id.clone())
            .collect()
    }

    async fn touch(&self, session_id: &SessionId) -> Result<SharedSession, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(session_id)
            .ok_or_else(|| RoomError::RoomNotFound(session_id.clone()))?;
        room.last_activity = Instant::now();
        Ok(room.session.clone())
    }

    /// Applies one player command atomically with respect to the session.
    pub async fn dispatch(
        &self,
        session_id: &SessionId,
        side: &str,
        command: &SessionCommand,
    ) -> Result<CommandOutcome, RoomError> {
        let session = self.touch(session_id).await?;
        let mut session = session.lock().await;

        let outcome = match command {
            SessionCommand::Play { .. } => {
                let request = command.move_request(side).unwrap_or_default();
                session.play_request(&request)?;
                CommandOutcome::Played {
                    next: session.to_play(),
                    winner: session.winning_side(),
                }
            }
            SessionCommand::Chat(text) => {
                session.chat_request(Some(side), Some(text))?;
                CommandOutcome::Chatted
            }
            SessionCommand::Undo => {
                let next = session.undo_request(Some(side))?.to_play();
                CommandOutcome::Undone { next }
            }
            SessionCommand::Reset => {
                session.reset_request(Some(side))?;
                CommandOutcome::Reset
            }
        };
        Ok(outcome)
    }

    pub async fn snapshot(&self, session_id: &SessionId) -> Result<SessionSnapshot, RoomError> {
        let session = self
            .room(session_id)
            .await
            .ok_or_else(|| RoomError::RoomNotFound(session_id.clone()))?;
        let session = session.lock().await;
        Ok(session.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::gomoku::ConfirmedAction;

    fn play(x: usize, y: usize) -> SessionCommand {
        SessionCommand::Play {
            x: Some(x.to_string()),
            y: Some(y.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_remove_room() {
        let manager = RoomManager::new(WinBroadcaster::new());
        let id = manager.create_room(GomokuSettings::default()).await;
        assert_eq!(manager.room_count().await, 1);
        assert!(manager.room(&id).await.is_some());
        assert!(manager.remove_room(&id).await);
        assert!(!manager.remove_room(&id).await);
        assert_eq!(manager.room_count().await, 0);
    }

    #[tokio::test]
    async fn test_dispatch_to_unknown_room() {
        let manager = RoomManager::new(WinBroadcaster::new());
        let missing = SessionId::from("missing");
        let err = manager.dispatch(&missing, "PLAYER1", &SessionCommand::Undo).await.unwrap_err();
        assert_eq!(err, RoomError::RoomNotFound(missing));
        assert_eq!(err.code(), 404);
    }

    #[tokio::test]
    async fn test_dispatch_play_and_errors() {
        let manager = RoomManager::new(WinBroadcaster::new());
        let id = manager.create_room(GomokuSettings::default()).await;

        let outcome = manager.dispatch(&id, "PLAYER1", &play(0, 0)).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Played { next: Side::Player2, winner: None });

        let err = manager.dispatch(&id, "PLAYER1", &play(1, 1)).await.unwrap_err();
        assert_eq!(err, RoomError::Game(GameError::NotYourTurn));
        assert_eq!(err.code(), 400);

        let snapshot = manager.snapshot(&id).await.unwrap();
        assert_eq!(snapshot.history.len(), 1);
    }

    #[tokio::test]
    async fn test_win_is_broadcast_to_subscribers() {
        let manager = RoomManager::new(WinBroadcaster::new());
        let mut wins = manager.broadcaster().subscribe();
        let id = manager.create_room(GomokuSettings::new(5, 3)).await;

        let opening = [
            ("PLAYER1", 0, 0),
            ("PLAYER2", 0, 4),
            ("PLAYER1", 1, 0),
            ("PLAYER2", 1, 4),
        ];
        for (side, x, y) in opening {
            manager.dispatch(&id, side, &play(x, y)).await.unwrap();
        }
        let outcome = manager.dispatch(&id, "PLAYER1", &play(2, 0)).await.unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Played { next: Side::Player2, winner: Some(Side::Player1) }
        );

        let event = wins.recv().await.unwrap();
        assert_eq!(event.session_id, id);
        assert_eq!(event.side, Side::Player1);
    }

    #[tokio::test]
    async fn test_concurrent_undo_requests_apply_once() {
        let manager = RoomManager::new(WinBroadcaster::new());
        let id = manager.create_room(GomokuSettings::default()).await;
        manager.dispatch(&id, "PLAYER1", &play(3, 3)).await.unwrap();
        manager.dispatch(&id, "PLAYER2", &play(4, 4)).await.unwrap();

        let (a, b) = tokio::join!(
            manager.dispatch(&id, "PLAYER1", &SessionCommand::Undo),
            manager.dispatch(&id, "PLAYER2", &SessionCommand::Undo),
        );
        let results = [a, b];
        let applied = results.iter().filter(|r| r.is_ok()).count();
        let pending = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(RoomError::Game(GameError::PendingConfirmation(
                        ConfirmedAction::Undo
                    )))
                )
            })
            .count();
        assert_eq!((applied, pending), (1, 1));

        let snapshot = manager.snapshot(&id).await.unwrap();
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.to_play, Side::Player2);
    }

    #[tokio::test]
    async fn test_inactive_rooms() {
        let manager = RoomManager::new(WinBroadcaster::new());
        let id = manager.create_room(GomokuSettings::default()).await;
        assert_eq!(manager.inactive_rooms(Duration::ZERO).await, vec![id]);
        assert!(manager.inactive_rooms(Duration::from_secs(3600)).await.is_empty());
    }
}
