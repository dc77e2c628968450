use std::path::PathBuf;

use clap::Parser;
use tokio::io::BufReader;

use common::config::Validate;
use common::gomoku::GomokuSettings;
use common::logger::{self, LogLevel};
use common::{log, log_warn};
use gomoku_server::cleanup_task::CleanupTask;
use gomoku_server::command::HELP;
use gomoku_server::config::{CONFIG_FILE, get_config_manager};
use gomoku_server::console::Console;
use gomoku_server::room_manager::RoomManager;
use gomoku_server::win_broadcaster::WinBroadcaster;

#[derive(Parser)]
#[command(name = "gomoku_server", about = "Two-player Gomoku on one terminal")]
struct Args {
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[arg(long)]
    size: Option<usize>,

    #[arg(long)]
    win_length: Option<usize>,

    #[arg(long)]
    log_level: Option<LogLevel>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = get_config_manager(args.config.clone()).get_config()?;
    if args.size.is_some() || args.win_length.is_some() {
        config.game = GomokuSettings::new(
            args.size.unwrap_or(config.game.size),
            args.win_length.unwrap_or(config.game.win_length),
        );
    }
    config.validate()?;

    let prefix = if args.use_log_prefix || config.log.use_prefix {
        Some("Gomoku".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.log_level.unwrap_or(config.log.level));

    let broadcaster = WinBroadcaster::new();
    let room_manager = RoomManager::new(broadcaster.clone());

    let cleanup = CleanupTask::new(
        room_manager.clone(),
        config.rooms.cleanup_interval(),
        config.rooms.inactivity_timeout(),
    );
    tokio::spawn(async move { cleanup.run().await });

    let mut wins = broadcaster.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = wins.recv().await {
            log!(
                "[session:{}] {} won with a line from ({}) to ({})",
                event.session_id, event.side, event.line.start, event.line.end
            );
        }
    });

    let session_id = room_manager.create_room(config.game).await;
    println!(
        "Gomoku {}x{}, {} in a row wins. PLAYER1 moves first.\n{}",
        config.game.size, config.game.win_length, config.game.win_length, HELP
    );

    let console = Console::new(&room_manager, session_id.clone());
    if let Err(e) = console
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
    {
        log_warn!("Console stopped: {}", e);
    }

    room_manager.remove_room(&session_id).await;
    log!("Bye");
    Ok(())
}
