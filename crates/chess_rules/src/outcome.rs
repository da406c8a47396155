//! Game-end classification: checkmate, stalemate and the three draw rules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::RulesError;
use crate::notation::{PositionKey, position_key};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawReason {
    FiftyMove,
    Repetition,
    InsufficientMaterial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    Ongoing,
    Checkmate {
        winner: Color,
    },
    Stalemate,
    Draw(DrawReason),
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }
}

/// Thresholds for the automatic draw rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    /// Halfmoves without a capture or pawn move before the game is drawn.
    pub fifty_move_halfmoves: u32,
    /// Occurrences of one position before the game is drawn.
    pub repetition_limit: u32,
}

impl DrawRules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.fifty_move_halfmoves == 0 {
            return Err(RulesError::ZeroThreshold {
                field: "draw.fifty_move_halfmoves",
            });
        }
        if self.repetition_limit == 0 {
            return Err(RulesError::ZeroThreshold {
                field: "draw.repetition_limit",
            });
        }
        Ok(())
    }
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            fifty_move_halfmoves: 100,
            repetition_limit: 3,
        }
    }
}

/// How many times each position has occurred in a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepetitionTable {
    counts: HashMap<PositionKey, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more occurrence of `key`, returning the new count.
    pub fn record(&mut self, key: PositionKey) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Take back one occurrence of `key`.
    pub fn forget(&mut self, key: &PositionKey) {
        if let Some(count) = self.counts.get_mut(key) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(key);
            }
        }
    }

    pub fn count(&self, key: &PositionKey) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PositionKey, u32)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Classify `pos` given its legal moves and the game's repetition table.
///
/// Checkmate and stalemate take priority; the draw rules are then tested in
/// the order fifty-move, repetition, insufficient material.
pub fn classify(
    pos: &Position,
    legal_moves: &[Move],
    repetitions: &RepetitionTable,
    rules: &DrawRules,
) -> GameOutcome {
    if legal_moves.is_empty() {
        return if pos.in_check(pos.side_to_move) {
            GameOutcome::Checkmate {
                winner: pos.side_to_move.other(),
            }
        } else {
            GameOutcome::Stalemate
        };
    }
    if pos.halfmove_clock >= rules.fifty_move_halfmoves {
        return GameOutcome::Draw(DrawReason::FiftyMove);
    }
    if repetitions.count(&position_key(pos)) >= rules.repetition_limit {
        return GameOutcome::Draw(DrawReason::Repetition);
    }
    if pos.is_insufficient_material() {
        return GameOutcome::Draw(DrawReason::InsufficientMaterial);
    }
    GameOutcome::Ongoing
}

impl Position {
    /// Neither side can possibly mate.
    ///
    /// Draws are: bare kings, a single minor piece on the board, or one bishop
    /// each on same-colored squares. Two knights still count as mating
    /// material.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: Vec<(Square, Piece)> = Vec::with_capacity(2);
        for (sq, pc) in self.board.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight | PieceKind::Bishop => {
                    if minors.len() == 2 {
                        return false;
                    }
                    minors.push((sq, pc));
                }
            }
        }

        match minors.as_slice() {
            [] | [_] => true,
            [(sq1, p1), (sq2, p2)] => {
                p1.kind == PieceKind::Bishop
                    && p2.kind == PieceKind::Bishop
                    && p1.color != p2.color
                    && sq1.is_light() == sq2.is_light()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
