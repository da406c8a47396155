use std::collections::BTreeMap;

use crate::attacks::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::board::{Position, king_home, rook_home};
use crate::types::*;

/// Generate all legal moves for the side to move.
///
/// Every pseudo-legal move is applied to a copy of the position and dropped if
/// it leaves the mover's king attacked. Pins, en-passant discoveries and king
/// walks into check all fall out of that one test.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    for (sq, pc) in pos.board.pieces() {
        if pc.color == pos.side_to_move {
            pseudo_moves_into(pos, sq, out);
        }
    }

    let mover = pos.side_to_move;
    out.retain(|mv| !pos.apply(mv).in_check(mover));
}

/// Legal moves of the piece standing on `from` (empty for an enemy or empty square).
pub fn legal_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    let mover = pos.side_to_move;
    pseudo_moves_from(pos, from)
        .into_iter()
        .filter(|mv| mv.piece.color == mover && !pos.apply(mv).in_check(mover))
        .collect()
}

/// Legal moves grouped by origin square, for move highlighting.
pub fn legal_moves_by_origin(pos: &Position) -> BTreeMap<Square, Vec<Move>> {
    let mut map: BTreeMap<Square, Vec<Move>> = BTreeMap::new();
    for mv in legal_moves(pos) {
        map.entry(mv.from).or_default().push(mv);
    }
    map
}

/// Pseudo-legal moves of whatever piece stands on `from`.
pub fn pseudo_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    pseudo_moves_into(pos, from, &mut out);
    out
}

fn pseudo_moves_into(pos: &Position, from: Square, out: &mut Vec<Move>) {
    let pc = match pos.piece_at(from) {
        Some(p) => p,
        None => return,
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc, out),
        PieceKind::Knight => gen_steps(pos, from, pc, &KNIGHT_DELTAS, out),
        PieceKind::Bishop => gen_slider(pos, from, pc, &DIAGONALS, out),
        PieceKind::Rook => gen_slider(pos, from, pc, &ORTHOGONALS, out),
        PieceKind::Queen => {
            gen_slider(pos, from, pc, &DIAGONALS, out);
            gen_slider(pos, from, pc, &ORTHOGONALS, out);
        }
        PieceKind::King => {
            gen_steps(pos, from, pc, &KING_DELTAS, out);
            gen_castle(pos, from, pc, out);
        }
    }
}

/// Push `mv`, expanding it into one move per promotion kind when it lands on
/// the last rank.
fn push_pawn_move(mv: Move, out: &mut Vec<Move>) {
    let promo_rank = mv.piece.color.other().back_rank();
    if mv.to.rank() == promo_rank {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move {
                promo: Some(pk),
                ..mv
            });
        }
    } else {
        out.push(mv);
    }
}

fn gen_pawn(pos: &Position, from: Square, pc: Piece, out: &mut Vec<Move>) {
    let dir = pc.color.forward();
    let start_rank = pc.color.back_rank() + dir;

    // forward 1
    if let Some(to) = from.offset(0, dir)
        && pos.is_empty(to)
    {
        push_pawn_move(Move::new(from, to, pc), out);

        // forward 2 from start
        if from.rank() == start_rank
            && let Some(to2) = from.offset(0, 2 * dir)
            && pos.is_empty(to2)
        {
            out.push(Move {
                is_double_push: true,
                ..Move::new(from, to2, pc)
            });
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != pc.color => {
                push_pawn_move(Move::capture(from, to, pc), out);
            }
            None if pos.en_passant == Some(to) => {
                out.push(Move {
                    is_en_passant: true,
                    ..Move::capture(from, to, pc)
                });
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, pc: Piece, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc)),
                Some(target) if target.color != pc.color => out.push(Move::capture(from, to, pc)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, pc: Piece, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc)),
                Some(target) if target.color != pc.color => {
                    out.push(Move::capture(from, to, pc));
                    break;
                }
                _ => break,
            }
            cur = to.offset(df, dr);
        }
    }
}

fn gen_castle(pos: &Position, from: Square, pc: Piece, out: &mut Vec<Move>) {
    let c = pc.color;
    if from != king_home(c) {
        return;
    }
    let enemy = c.other();
    let rank = c.back_rank();

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !pos.castling.has(c, side) {
            continue;
        }
        let rook_sq = rook_home(c, side);
        if pos.piece_at(rook_sq) != Some(Piece::new(c, PieceKind::Rook)) {
            continue;
        }

        // Every square strictly between king and rook must be empty.
        let (lo, hi) = if rook_sq.file() > from.file() {
            (from.file() + 1, rook_sq.file())
        } else {
            (rook_sq.file() + 1, from.file())
        };
        if (lo..hi).any(|f| pos.board.piece_at_coords(f, rank).is_some()) {
            continue;
        }

        // The king may not start in, pass through, or land on an attacked square.
        let step = if side == CastleSide::Kingside { 1 } else { -1 };
        let Some(king_to) = Square::new(side.king_to_file(), rank) else {
            continue;
        };
        let path = [Some(from), from.offset(step, 0), Some(king_to)];
        if path
            .iter()
            .flatten()
            .any(|&sq| pos.is_square_attacked(sq, enemy))
        {
            continue;
        }

        out.push(Move {
            castle: Some(side),
            ..Move::new(from, king_to, pc)
        });
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
