//! Error types for the rules engine.
//!
//! Every error here is recoverable by the caller: an illegal request is
//! re-prompted, a bad snapshot is replaced with a fresh game.

use thiserror::Error;

use crate::outcome::GameOutcome;
use crate::request::MoveRequest;

/// Problems parsing a FEN string or one of its fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 space-separated fields, found {0}")]
    MissingFields(usize),

    #[error("board must have 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character {0:?}")]
    BadPiece(char),

    #[error("invalid side to move {0:?}")]
    BadSideToMove(String),

    #[error("invalid castling field {0:?}")]
    BadCastling(String),

    #[error("invalid square {0:?}")]
    BadSquare(String),

    #[error("en-passant target {0} is not on the rank behind a double-stepped pawn")]
    BadEnPassant(String),

    #[error("invalid move counter {0:?}")]
    BadCounter(String),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: crate::Color, count: usize },

    #[error("{color} {side:?} castling right without king and rook on their home squares")]
    CastlingRight {
        color: crate::Color,
        side: crate::CastleSide,
    },

    #[error("pawn on back rank square {0}")]
    PawnOnBackRank(String),

    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Rejections from a game session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move {request}")]
    IllegalMove { request: MoveRequest },

    #[error("game is already over: {0:?}")]
    GameOver(GameOutcome),

    #[error("unparseable move request {0:?}")]
    BadRequest(String),
}

/// Draw thresholds that would end every game on the spot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("{field} must be positive")]
    ZeroThreshold { field: &'static str },
}

/// A persisted snapshot failed structural validation.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board must have 8 rows, found {0}")]
    RowCount(usize),

    #[error("board row {row} must have 8 cells, found {len}")]
    RowWidth { row: usize, len: usize },

    #[error("invalid piece encoding {cell:?} at row {row}")]
    BadCell { row: usize, cell: char },

    #[error("invalid position: {0}")]
    Position(#[from] FenError),

    #[error("history entry {index} does not replay: {reason}")]
    History { index: usize, reason: String },

    #[error("repetition count for {key:?} must be positive")]
    ZeroRepetition { key: String },

    #[error("current position is missing from the repetition table")]
    MissingCurrentKey,

    #[error("invalid draw rules: {0}")]
    Rules(#[from] RulesError),
}

/// Problems loading a [`GameConfig`](crate::GameConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid start position: {0}")]
    StartPosition(#[from] FenError),

    #[error("invalid draw rules: {0}")]
    Rules(#[from] RulesError),
}
