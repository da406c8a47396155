use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::GameError;
use crate::movegen::legal_moves;
use crate::types::*;

/// A move as a user interface asks for it: two squares and, for pawns
/// reaching the last rank, the piece to promote to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for MoveRequest {
    type Err = GameError;

    /// Parse `e2e4` / `e7e8q` style text.
    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        let bad = || GameError::BadRequest(txt.to_string());
        if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
            return Err(bad());
        }
        let from: Square = txt[0..2].parse().map_err(|_| bad())?;
        let to: Square = txt[2..4].parse().map_err(|_| bad())?;
        let promotion = match txt[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some(k) if PieceKind::PROMOTIONS.contains(&k) => Some(k),
                _ => return Err(bad()),
            },
        };
        Ok(MoveRequest {
            from,
            to,
            promotion,
        })
    }
}

/// What a request means in a given position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Move(Move),
    /// The squares name a promotion but no piece was chosen.
    PromotionRequired,
}

/// Match `req` against the legal moves of `pos`.
///
/// Matching against generated moves means castling, en-passant and capture
/// flags come from the generator rather than from the request.
pub fn resolve(pos: &Position, req: &MoveRequest) -> Result<Resolution, GameError> {
    let candidates: Vec<Move> = legal_moves(pos)
        .into_iter()
        .filter(|m| m.from == req.from && m.to == req.to)
        .collect();

    if candidates.is_empty() {
        return Err(GameError::IllegalMove { request: *req });
    }

    let is_promotion = candidates.iter().any(|m| m.promo.is_some());
    match (is_promotion, req.promotion) {
        (true, None) => Ok(Resolution::PromotionRequired),
        (false, Some(_)) => Err(GameError::IllegalMove { request: *req }),
        (_, promo) => candidates
            .into_iter()
            .find(|m| m.promo == promo)
            .map(Resolution::Move)
            .ok_or(GameError::IllegalMove { request: *req }),
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod request_tests;
