use crate::board::{Position, rook_home};
use crate::types::*;

/// Produce the position after `mv`. The input is left untouched.
pub fn apply_move(pos: &Position, mv: &Move) -> Position {
    pos.apply(mv)
}

impl Position {
    /// Play `mv`, returning the resulting position.
    ///
    /// `mv` is expected to come from the move generator for this position;
    /// the flags on it (castle side, en passant, double push) drive the
    /// update instead of being re-derived from the board.
    pub fn apply(&self, mv: &Move) -> Position {
        let mut next = self.clone();
        let moved = mv.piece;
        let board = &mut next.board;

        board.set(mv.from, None);

        // The pawn taken en passant sits beside the origin, behind the destination.
        let captured = if mv.is_en_passant {
            mv.to
                .offset(0, -moved.color.forward())
                .and_then(|cs| board.take(cs))
        } else {
            board.piece_at(mv.to)
        };

        let placed = match mv.promo {
            Some(kind) => Piece::new(moved.color, kind),
            None => moved,
        };
        board.set(mv.to, Some(placed));

        if let Some(side) = mv.castle {
            let rook_from = rook_home(moved.color, side);
            let (_, rook_file) = side.rook_files();
            if let Some(rook_to) = Square::new(rook_file, moved.color.back_rank()) {
                let rook = board.take(rook_from);
                board.set(rook_to, rook);
            }
        }

        if moved.kind == PieceKind::King {
            next.castling.revoke_all(moved.color);
        }
        // Leaving or landing on a rook home square kills that right either way.
        next.castling.revoke_rook_square(mv.from);
        next.castling.revoke_rook_square(mv.to);

        next.en_passant = if mv.is_double_push {
            mv.from.offset(0, moved.color.forward())
        } else {
            None
        };

        next.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            next.fullmove_number += 1;
        }
        next.side_to_move = self.side_to_move.other();
        next
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;
