//! Persisted game state.
//!
//! A snapshot carries the full position, the move history, the repetition
//! counts and the last outcome, so a stored game resumes without replaying
//! from the initial position. Restoring validates everything and refuses
//! anything that does not describe a reachable game.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{Board, CastlingRights, Position};
use crate::error::{FenError, SnapshotError};
use crate::game::{Game, HistoryEntry};
use crate::movegen::legal_moves;
use crate::notation::position_key;
use crate::outcome::{DrawRules, GameOutcome, RepetitionTable, classify};
use crate::types::*;

const EMPTY_CELL: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Eight rows from rank 8 down to rank 1, eight cells each: `.` for an
    /// empty square, a FEN letter otherwise.
    pub board: Vec<String>,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<String>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// FEN of the position the move was played from.
    pub before: String,
    #[serde(rename = "move")]
    pub mv: Move,
    pub san: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub position: PositionSnapshot,
    pub history: Vec<HistorySnapshot>,
    pub repetitions: RepetitionTable,
    pub outcome: GameOutcome,
    #[serde(default)]
    pub rules: DrawRules,
}

impl From<&Position> for PositionSnapshot {
    fn from(pos: &Position) -> Self {
        let board = (0..8)
            .map(|row| {
                (0..8)
                    .map(|col| {
                        Square::from_row_col(row, col)
                            .and_then(|sq| pos.piece_at(sq))
                            .map_or(EMPTY_CELL, Piece::to_char)
                    })
                    .collect()
            })
            .collect();
        PositionSnapshot {
            board,
            side_to_move: pos.side_to_move,
            castling: pos.castling,
            en_passant: pos.en_passant.map(|sq| sq.to_string()),
            halfmove_clock: pos.halfmove_clock,
            fullmove_number: pos.fullmove_number,
        }
    }
}

impl TryFrom<&PositionSnapshot> for Position {
    type Error = SnapshotError;

    fn try_from(snap: &PositionSnapshot) -> Result<Self, Self::Error> {
        if snap.board.len() != 8 {
            return Err(SnapshotError::RowCount(snap.board.len()));
        }
        let mut board = Board::empty();
        for (row, cells) in snap.board.iter().enumerate() {
            let len = cells.chars().count();
            if len != 8 {
                return Err(SnapshotError::RowWidth { row, len });
            }
            for (col, cell) in cells.chars().enumerate() {
                if cell == EMPTY_CELL {
                    continue;
                }
                let pc = Piece::from_char(cell).ok_or(SnapshotError::BadCell { row, cell })?;
                if let Some(sq) = Square::from_row_col(row as i8, col as i8) {
                    board.set(sq, Some(pc));
                }
            }
        }

        let en_passant = snap
            .en_passant
            .as_deref()
            .map(str::parse::<Square>)
            .transpose()?;
        if snap.fullmove_number == 0 {
            return Err(FenError::BadCounter("0".to_string()).into());
        }

        let pos = Position {
            board,
            side_to_move: snap.side_to_move,
            castling: snap.castling,
            en_passant,
            halfmove_clock: snap.halfmove_clock,
            fullmove_number: snap.fullmove_number,
        };
        pos.validate()?;
        Ok(pos)
    }
}

impl Game {
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            position: PositionSnapshot::from(&self.position),
            history: self
                .history
                .iter()
                .map(|e| HistorySnapshot {
                    before: e.before.to_fen(),
                    mv: e.mv,
                    san: e.san.clone(),
                })
                .collect(),
            repetitions: self.repetitions.clone(),
            outcome: self.outcome,
            rules: self.rules,
        }
    }

    /// Rebuild a session from a snapshot, validating every part of it.
    pub fn restore(snap: &GameSnapshot) -> Result<Game, SnapshotError> {
        let position = Position::try_from(&snap.position)?;
        let rules = snap.rules;
        rules.validate()?;

        // Walk the history forwards: every move must be legal where it was
        // played and lead exactly to the next recorded position.
        let mut history = Vec::with_capacity(snap.history.len());
        let mut seen = RepetitionTable::new();
        for (index, h) in snap.history.iter().enumerate() {
            let fail = |reason: String| SnapshotError::History { index, reason };

            let before = Position::from_fen(&h.before).map_err(|e| fail(e.to_string()))?;
            let legal = legal_moves(&before);
            if !legal.contains(&h.mv) {
                return Err(fail(format!("move {}{} is not legal", h.mv.from, h.mv.to)));
            }
            if index == 0 {
                seen.record(position_key(&before));
            }

            let after = before.apply(&h.mv);
            let expected = match snap.history.get(index + 1) {
                Some(next) => Position::from_fen(&next.before).map_err(|e| fail(e.to_string()))?,
                None => position.clone(),
            };
            if after != expected {
                return Err(fail("move does not lead to the next position".to_string()));
            }

            let outcome_before = classify(&before, &legal, &seen, &rules);
            let key_after = position_key(&after);
            seen.record(key_after.clone());
            history.push(HistoryEntry {
                before,
                mv: h.mv,
                san: h.san.clone(),
                key_after,
                outcome_before,
            });
        }

        if let Some((key, _)) = snap.repetitions.iter().find(|(_, n)| *n == 0) {
            return Err(SnapshotError::ZeroRepetition {
                key: key.to_string(),
            });
        }
        if snap.repetitions.count(&position_key(&position)) == 0 {
            return Err(SnapshotError::MissingCurrentKey);
        }

        let outcome = classify(&position, &legal_moves(&position), &snap.repetitions, &rules);
        if outcome != snap.outcome {
            warn!(
                stored = ?snap.outcome,
                computed = ?outcome,
                "snapshot outcome disagrees with position, using computed outcome"
            );
        }

        Ok(Game {
            position,
            history,
            repetitions: snap.repetitions.clone(),
            outcome,
            rules,
        })
    }

    /// Like [`Game::restore`], falling back to a fresh game on any error.
    pub fn restore_or_new(snap: &GameSnapshot) -> Game {
        Self::restore(snap).unwrap_or_else(|err| {
            warn!(%err, "discarding malformed snapshot, starting a new game");
            Game::new()
        })
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Game, SnapshotError> {
        let snap: GameSnapshot = serde_json::from_str(json)?;
        Self::restore(&snap)
    }

    /// Like [`Game::from_json`], falling back to a fresh game on any error.
    pub fn from_json_or_new(json: &str) -> Game {
        Self::from_json(json).unwrap_or_else(|err| {
            warn!(%err, "discarding malformed snapshot, starting a new game");
            Game::new()
        })
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
