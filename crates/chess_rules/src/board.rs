use serde::{Deserialize, Serialize};

use crate::types::*;

/// Piece placement only. Probes outside the 8x8 grid read as empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    pub fn is_on_board(file: i8, rank: i8) -> bool {
        Square::new(file, rank).is_some()
    }

    /// Like [`Board::piece_at`] but takes raw coordinates; off-board is `None`.
    pub fn piece_at_coords(&self, file: i8, rank: i8) -> Option<Piece> {
        Square::new(file, rank).and_then(|sq| self.piece_at(sq))
    }

    pub fn set(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.index()] = pc;
    }

    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn has(&self, c: Color, side: CastleSide) -> bool {
        match (c, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    pub fn revoke(&mut self, c: Color, side: CastleSide) {
        match (c, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside = false,
            (Color::White, CastleSide::Queenside) => self.white_queenside = false,
            (Color::Black, CastleSide::Kingside) => self.black_kingside = false,
            (Color::Black, CastleSide::Queenside) => self.black_queenside = false,
        }
    }

    pub fn revoke_all(&mut self, c: Color) {
        self.revoke(c, CastleSide::Kingside);
        self.revoke(c, CastleSide::Queenside);
    }

    /// Revoke whichever right belongs to a rook home square.
    pub fn revoke_rook_square(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.white_queenside = false,
            Square::H1 => self.white_kingside = false,
            Square::A8 => self.black_queenside = false,
            Square::H8 => self.black_kingside = false,
            _ => {}
        }
    }
}

/// Home square of the rook backing a castling right.
pub fn rook_home(c: Color, side: CastleSide) -> Square {
    match (c, side) {
        (Color::White, CastleSide::Kingside) => Square::H1,
        (Color::White, CastleSide::Queenside) => Square::A1,
        (Color::Black, CastleSide::Kingside) => Square::H8,
        (Color::Black, CastleSide::Queenside) => Square::A8,
    }
}

pub fn king_home(c: Color) -> Square {
    match c {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Board::empty();
        for sq in Square::all() {
            let kind = match sq.rank() {
                0 | 7 => Some(back[sq.file() as usize]),
                1 | 6 => Some(PieceKind::Pawn),
                _ => None,
            };
            let color = if sq.rank() < 4 {
                Color::White
            } else {
                Color::Black
            };
            board.set(sq, kind.map(|kind| Piece::new(color, kind)));
        }

        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.board.is_empty(sq)
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.board.king_sq(c)
    }

    /// Whether `c` is in check. A missing king never counts as in check.
    pub fn in_check(&self, c: Color) -> bool {
        crate::attacks::is_king_in_check(self, c)
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        crate::attacks::is_square_attacked(&self.board, target, by)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
