pub mod config;
pub mod gomoku;
pub mod identifiers;
pub mod logger;

pub use identifiers::*;
