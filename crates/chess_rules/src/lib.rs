//! Chess rules engine: board state, legal move generation, move application,
//! game-end detection and standard algebraic notation.
//!
//! Everything below [`Game`] is a pure function of a [`Position`]. A `Game`
//! owns one session: the current position, an append-only history used for
//! undo, and the repetition counts behind the threefold rule.

pub mod apply;
pub mod attacks;
pub mod board;
pub mod config;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod outcome;
pub mod perft;
pub mod request;
pub mod snapshot;
pub mod types;

pub use apply::apply_move;
pub use attacks::*;
pub use board::*;
pub use config::GameConfig;
pub use error::*;
pub use fen::STARTPOS_FEN;
pub use game::*;
pub use movegen::*;
pub use notation::*;
pub use outcome::*;
pub use perft::{divide, perft};
pub use request::*;
pub use snapshot::*;
pub use types::*;
