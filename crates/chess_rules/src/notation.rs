//! Standard algebraic notation and repetition keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::*;

/// Canonical identity of a position for repetition counting.
///
/// Built from placement, side to move, castling rights and en-passant target.
/// The move counters are left out, so positions that differ only in their
/// clocks share a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey(String);

impl PositionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn position_key(pos: &Position) -> PositionKey {
    PositionKey(pos.key_fields())
}

/// Render `mv` (legal in `pos`) as SAN. `after` is `pos` with `mv` applied.
pub fn to_san(pos: &Position, mv: &Move, after: &Position) -> String {
    let mut san = String::new();

    match mv.castle {
        Some(CastleSide::Kingside) => san.push_str("O-O"),
        Some(CastleSide::Queenside) => san.push_str("O-O-O"),
        None => {
            let kind = mv.piece.kind;
            if kind == PieceKind::Pawn {
                if mv.is_capture {
                    san.push(mv.from.file_char());
                }
            } else {
                san.push(kind.letter());
                san.push_str(&disambiguation(pos, mv));
            }

            if mv.is_capture {
                san.push('x');
            }
            san.push_str(&mv.to.to_string());

            if let Some(promo) = mv.promo {
                san.push('=');
                san.push(promo.letter());
            }
        }
    }

    if after.in_check(after.side_to_move) {
        if legal_moves(after).is_empty() {
            san.push('#');
        } else {
            san.push('+');
        }
    }
    san
}

/// Origin file, rank, or both, whichever first separates `mv` from other
/// pieces of the same kind that can also reach its destination.
fn disambiguation(pos: &Position, mv: &Move) -> String {
    let rivals: Vec<Square> = legal_moves(pos)
        .into_iter()
        .filter(|other| {
            other.to == mv.to && other.from != mv.from && other.piece.kind == mv.piece.kind
        })
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|r| r.file() != mv.from.file()) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|r| r.rank() != mv.from.rank()) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

/// Long algebraic form, e.g. `e2e4` or `e7e8q`.
pub fn to_uci(mv: &Move) -> String {
    let mut s = format!("{}{}", mv.from, mv.to);
    if let Some(p) = mv.promo {
        s.push(p.letter().to_ascii_lowercase());
    }
    s
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
