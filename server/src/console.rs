use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use common::SessionId;
use common::gomoku::Side;

use crate::command::{ConsoleCommand, HELP, parse_command};
use crate::room_manager::{CommandOutcome, RoomError, RoomManager};

/// Hot-seat front end: both players type into the same stream, one
/// command per line.
pub struct Console<'a> {
    room_manager: &'a RoomManager,
    session_id: SessionId,
}

impl<'a> Console<'a> {
    pub fn new(room_manager: &'a RoomManager, session_id: SessionId) -> Self {
        Self {
            room_manager,
            session_id,
        }
    }

    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let reply = match parse_command(&line) {
                Ok(ConsoleCommand::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(e) => format!("error: {}", e),
            };
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok(())
    }

    pub async fn execute(&self, command: ConsoleCommand) -> String {
        match command {
            ConsoleCommand::Session { side, command } => {
                match self.room_manager.dispatch(&self.session_id, &side, &command).await {
                    Ok(outcome) => describe_outcome(outcome),
                    Err(e) => describe_error(&e),
                }
            }
            ConsoleCommand::Board => self.with_snapshot(|s| s.board.render()).await,
            ConsoleCommand::History => {
                self.with_snapshot(|s| {
                    s.history
                        .iter()
                        .enumerate()
                        .map(|(i, m)| {
                            let marker = if i > 0 && i == s.round_start {
                                " (round start)"
                            } else {
                                ""
                            };
                            format!("{}. {} {}, {}{}", i + 1, m.side, m.x, m.y, marker)
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .await
            }
            ConsoleCommand::Chats => {
                self.with_snapshot(|s| {
                    s.chats
                        .iter()
                        .map(|c| {
                            let sent_at = c.sent_at.format("%H:%M:%S");
                            format!("[{}] {}: {}", sent_at, c.side, c.text)
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .await
            }
            ConsoleCommand::State => match self.room_manager.snapshot(&self.session_id).await {
                Ok(snapshot) => serde_yaml_ng::to_string(&snapshot)
                    .unwrap_or_else(|e| format!("error: failed to serialize state: {}", e)),
                Err(e) => describe_error(&e),
            },
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Quit => String::new(),
        }
    }

    async fn with_snapshot<F>(&self, render: F) -> String
    where
        F: FnOnce(&common::gomoku::SessionSnapshot) -> String,
    {
        match self.room_manager.snapshot(&self.session_id).await {
            Ok(snapshot) => render(&snapshot),
            Err(e) => describe_error(&e),
        }
    }
}

fn describe_outcome(outcome: CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Played { winner: Some(side), .. } => format!("{} wins!", side),
        CommandOutcome::Played { next, winner: None } => format!("ok, {} to play", next),
        CommandOutcome::Chatted => "ok".to_string(),
        CommandOutcome::Undone { next } => format!("move undone, {} to play", next),
        CommandOutcome::Reset => format!("board reset, {} to play", Side::Player1),
    }
}

fn describe_error(e: &RoomError) -> String {
    match e {
        RoomError::Game(game) if game.is_pending() => format!("waiting: {}", game),
        _ => format!("error {}: {}", e.code(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::gomoku::GomokuSettings;
    use crate::win_broadcaster::WinBroadcaster;

    async fn run_script(script: &str) -> (String, RoomManager, SessionId) {
        let manager = RoomManager::new(WinBroadcaster::new());
        let id = manager.create_room(GomokuSettings::new(5, 3)).await;
        let mut output = Vec::new();
        Console::new(&manager, id.clone())
            .run(script.as_bytes(), &mut output)
            .await
            .unwrap();
        (String::from_utf8(output).unwrap(), manager, id)
    }

    #[tokio::test]
    async fn test_script_plays_until_win() {
        let script = "1 play 0 0\n2 play 0 4\n1 play 1 0\n2 play 1 4\n1 play 2 0\n2 play 3 3\n";
        let (output, _, _) = run_script(script).await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "ok, PLAYER2 to play");
        assert_eq!(lines[4], "PLAYER1 wins!");
        assert_eq!(lines[5], "error 400: Game has already ended!");
    }

    #[tokio::test]
    async fn test_script_undo_needs_both_players() {
        let script = "1 play 2 2\n1 undo\n1 undo\n2 undo\nboard\n";
        let (output, manager, id) = run_script(script).await;
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("waiting:"));
        assert!(lines[2].starts_with("waiting:"));
        assert_eq!(lines[3], "move undone, PLAYER1 to play");
        assert_eq!(&lines[4..9], [".....", ".....", ".....", ".....", "....."]);
        assert!(manager.snapshot(&id).await.unwrap().history.is_empty());
    }

    #[tokio::test]
    async fn test_quit_stops_processing() {
        let (output, manager, id) = run_script("quit\n1 play 0 0\n").await;
        assert!(output.is_empty());
        assert!(manager.snapshot(&id).await.unwrap().history.is_empty());
    }

    #[tokio::test]
    async fn test_bad_input_is_reported() {
        let (output, _, _) = run_script("1 play x 0\n1 dance\nnobody reset\n").await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "error 400: X or Y are not integers!");
        assert_eq!(lines[1], "error: Unknown action: dance");
        assert_eq!(lines[2], "error 400: Playing as who?");
    }

    #[tokio::test]
    async fn test_chat_and_state() {
        let (output, _, _) = run_script("2 chat hello there\nchats\nstate\n").await;
        assert!(output.contains("PLAYER2: hello there"));
        assert!(output.contains("win_length: 3"));
    }
}
