//! Forsyth-Edwards Notation parsing and printing.
//!
//! Parsing is strict: anything that would break the engine's invariants
//! (missing kings, pawns on a back rank, a capturable king) is rejected.

use crate::board::{Board, CastlingRights, Position, king_home, rook_home};
use crate::error::FenError;
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let castling = parse_castling(parts[2])?;

        let en_passant = if parts[3] == "-" {
            None
        } else {
            Some(parts[3].parse::<Square>()?)
        };

        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");
        let halfmove_clock: u32 = halfmove_part
            .parse()
            .map_err(|_| FenError::BadCounter(halfmove_part.to_string()))?;
        let fullmove_number: u32 = fullmove_part
            .parse()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| FenError::BadCounter(fullmove_part.to_string()))?;

        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };
        pos.validate()?;
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {}",
            self.key_fields(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// The first four FEN fields: placement, side, castling, en passant.
    pub(crate) fn key_fields(&self) -> String {
        let stm = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self
            .en_passant
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {}",
            placement(&self.board),
            stm,
            castling_field(&self.castling),
            ep
        )
    }

    /// Check the structural invariants every reachable position satisfies.
    pub fn validate(&self) -> Result<(), FenError> {
        for color in [Color::White, Color::Black] {
            let count = self
                .board
                .pieces()
                .filter(|(_, pc)| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        if let Some((sq, _)) = self
            .board
            .pieces()
            .find(|(sq, pc)| pc.kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7))
        {
            return Err(FenError::PawnOnBackRank(sq.to_string()));
        }

        for color in [Color::White, Color::Black] {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if self.castling.has(color, side)
                    && (self.piece_at(king_home(color)) != Some(Piece::new(color, PieceKind::King))
                        || self.piece_at(rook_home(color, side))
                            != Some(Piece::new(color, PieceKind::Rook)))
                {
                    return Err(FenError::CastlingRight { color, side });
                }
            }
        }

        if let Some(ep) = self.en_passant {
            // White to move means Black just double-stepped through rank 6.
            let expected_rank = match self.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            let pawn_sq = ep.offset(0, -self.side_to_move.forward());
            let pawn_ok = pawn_sq.and_then(|s| self.piece_at(s))
                == Some(Piece::new(self.side_to_move.other(), PieceKind::Pawn));
            if ep.rank() != expected_rank || !self.is_empty(ep) || !pawn_ok {
                return Err(FenError::BadEnPassant(ep.to_string()));
            }
        }

        if self.in_check(self.side_to_move.other()) {
            return Err(FenError::OpponentInCheck);
        }
        Ok(())
    }
}

fn parse_placement(field: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                if !(1..=8).contains(&d) {
                    return Err(FenError::RankWidth { rank: 8 - rank_idx });
                }
                file += d as i8;
            } else {
                let pc = Piece::from_char(ch).ok_or(FenError::BadPiece(ch))?;
                let sq = Square::new(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                board.set(sq, Some(pc));
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth { rank: 8 - rank_idx });
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut castling = CastlingRights::NONE;
    if field == "-" {
        return Ok(castling);
    }
    for c in field.chars() {
        let slot = match c {
            'K' => &mut castling.white_kingside,
            'Q' => &mut castling.white_queenside,
            'k' => &mut castling.black_kingside,
            'q' => &mut castling.black_queenside,
            _ => return Err(FenError::BadCastling(field.to_string())),
        };
        if *slot {
            return Err(FenError::BadCastling(field.to_string()));
        }
        *slot = true;
    }
    Ok(castling)
}

fn placement(board: &Board) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match board.piece_at_coords(file, rank) {
                Some(pc) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(pc.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

fn castling_field(c: &CastlingRights) -> String {
    let mut s = String::new();
    if c.white_kingside {
        s.push('K');
    }
    if c.white_queenside {
        s.push('Q');
    }
    if c.black_kingside {
        s.push('k');
    }
    if c.black_queenside {
        s.push('q');
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
