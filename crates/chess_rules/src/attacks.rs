//! Attack detection by walking offsets and rays out from the target square.
//!
//! Nothing here allocates; these run once per candidate move during the
//! legality filter.

use crate::board::{Board, Position};
use crate::types::*;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Whether any piece of color `by` attacks `target`.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    let holds = |df: i8, dr: i8, kind: PieceKind| {
        board.piece_at_coords(target.file() + df, target.rank() + dr) == Some(Piece::new(by, kind))
    };

    // A pawn attacks diagonally forward, so look one rank backwards from the target.
    let back = -by.forward();
    if holds(-1, back, PieceKind::Pawn) || holds(1, back, PieceKind::Pawn) {
        return true;
    }

    if KNIGHT_DELTAS
        .iter()
        .any(|&(df, dr)| holds(df, dr, PieceKind::Knight))
    {
        return true;
    }

    if KING_DELTAS
        .iter()
        .any(|&(df, dr)| holds(df, dr, PieceKind::King))
    {
        return true;
    }

    let slider_hit = |dirs: &[(i8, i8)], kind: PieceKind| {
        dirs.iter().any(|&(df, dr)| {
            let mut cur = target.offset(df, dr);
            while let Some(s) = cur {
                if let Some(pc) = board.piece_at(s) {
                    return pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen);
                }
                cur = s.offset(df, dr);
            }
            false
        })
    };

    slider_hit(&DIAGONALS, PieceKind::Bishop) || slider_hit(&ORTHOGONALS, PieceKind::Rook)
}

/// Whether `c`'s king is attacked by the other side. False if `c` has no king.
pub fn is_king_in_check(pos: &Position, c: Color) -> bool {
    match pos.king_sq(c) {
        Some(ksq) => is_square_attacked(&pos.board, ksq, c.other()),
        None => false,
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
