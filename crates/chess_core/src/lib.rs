//! Rules engine for standard chess.
//!
//! Pieces live in a flat [`Registry`] addressed by [`PieceId`]; the [`Board`]
//! holds ids. [`GameState`] bundles both with the move history and the side
//! to move, and [`Game`] drives turns on top of it.

pub mod attacks;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod perft;
pub mod types;

pub use attacks::*;
pub use board::*;
pub use config::GameConfig;
pub use error::*;
pub use game::*;
pub use legal::*;
pub use movegen::*;
pub use perft::perft;
pub use types::*;
