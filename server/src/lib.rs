pub mod cleanup_task;
pub mod command;
pub mod config;
pub mod console;
pub mod room_manager;
pub mod win_broadcaster;
