//! Game session: current position, move history and draw bookkeeping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::board::Position;
use crate::config::GameConfig;
use crate::error::{ConfigError, GameError};
use crate::movegen;
use crate::notation::{PositionKey, position_key, to_san, to_uci};
use crate::outcome::{DrawRules, GameOutcome, RepetitionTable, classify};
use crate::request::{MoveRequest, Resolution, resolve};
use crate::types::*;

/// One played move together with everything needed to take it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Position the move was played from.
    pub before: Position,
    pub mv: Move,
    pub san: String,
    /// Key of the position the move produced.
    pub key_after: PositionKey,
    pub outcome_before: GameOutcome,
}

/// A line of the move list as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotationEntry {
    pub move_number: u32,
    pub color: Color,
    pub san: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayResult {
    Played(NotationEntry),
    /// The request reaches the last rank with a pawn; ask the user for a piece.
    PromotionRequired { from: Square, to: Square },
}

#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) position: Position,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) repetitions: RepetitionTable,
    pub(crate) outcome: GameOutcome,
    pub(crate) rules: DrawRules,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos(), DrawRules::default())
    }

    pub fn with_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_position(config.start_position()?, config.draw))
    }

    /// Start a game from an arbitrary (already validated) position.
    pub fn from_position(position: Position, rules: DrawRules) -> Self {
        let mut repetitions = RepetitionTable::new();
        repetitions.record(position_key(&position));
        let outcome = classify(
            &position,
            &movegen::legal_moves(&position),
            &repetitions,
            &rules,
        );
        Game {
            position,
            history: Vec::new(),
            repetitions,
            outcome,
            rules,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn rules(&self) -> &DrawRules {
        &self.rules
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn repetitions(&self) -> &RepetitionTable {
        &self.repetitions
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(&self.position)
    }

    pub fn legal_moves_by_origin(&self) -> BTreeMap<Square, Vec<Move>> {
        movegen::legal_moves_by_origin(&self.position)
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        movegen::legal_moves_from(&self.position, from)
    }

    /// The running move list.
    pub fn move_list(&self) -> Vec<NotationEntry> {
        self.history
            .iter()
            .map(|e| NotationEntry {
                move_number: e.before.fullmove_number,
                color: e.before.side_to_move,
                san: e.san.clone(),
            })
            .collect()
    }

    /// Try to play a user request.
    ///
    /// Illegal requests and requests after the game has ended are rejected
    /// without touching the session.
    pub fn play(&mut self, req: MoveRequest) -> Result<PlayResult, GameError> {
        if self.outcome.is_over() {
            trace!(%req, outcome = ?self.outcome, "request after game end");
            return Err(GameError::GameOver(self.outcome));
        }
        match resolve(&self.position, &req) {
            Ok(Resolution::Move(mv)) => Ok(PlayResult::Played(self.commit(mv))),
            Ok(Resolution::PromotionRequired) => Ok(PlayResult::PromotionRequired {
                from: req.from,
                to: req.to,
            }),
            Err(err) => {
                trace!(%req, "rejected request");
                Err(err)
            }
        }
    }

    /// Parse `e2e4` style text and play it.
    pub fn play_uci(&mut self, txt: &str) -> Result<PlayResult, GameError> {
        self.play(txt.parse()?)
    }

    /// Play a move taken from [`Game::legal_moves`].
    pub fn play_move(&mut self, mv: Move) -> Result<NotationEntry, GameError> {
        if self.outcome.is_over() {
            return Err(GameError::GameOver(self.outcome));
        }
        if !self.legal_moves().contains(&mv) {
            let request = MoveRequest {
                from: mv.from,
                to: mv.to,
                promotion: mv.promo,
            };
            return Err(GameError::IllegalMove { request });
        }
        Ok(self.commit(mv))
    }

    fn commit(&mut self, mv: Move) -> NotationEntry {
        let after = self.position.apply(&mv);
        let san = to_san(&self.position, &mv, &after);
        let key_after = position_key(&after);
        let seen = self.repetitions.record(key_after.clone());
        let outcome = classify(
            &after,
            &movegen::legal_moves(&after),
            &self.repetitions,
            &self.rules,
        );

        let entry = NotationEntry {
            move_number: self.position.fullmove_number,
            color: self.position.side_to_move,
            san: san.clone(),
        };
        debug!(
            uci = %to_uci(&mv),
            san = %san,
            seen,
            halfmove_clock = after.halfmove_clock,
            "move applied"
        );

        let before = std::mem::replace(&mut self.position, after);
        self.history.push(HistoryEntry {
            before,
            mv,
            san,
            key_after,
            outcome_before: self.outcome,
        });
        self.outcome = outcome;
        if outcome.is_over() {
            info!(?outcome, plies = self.history.len(), "game over");
        }
        entry
    }

    /// Take back the last move. Returns it, or `None` at the start of the game.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.repetitions.forget(&entry.key_after);
        self.position = entry.before;
        self.outcome = entry.outcome_before;
        debug!(uci = %to_uci(&entry.mv), "move taken back");
        Some(entry.mv)
    }

    /// Throw the game away and start over from the standard position.
    pub fn reset(&mut self) {
        *self = Self::from_position(Position::startpos(), self.rules);
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
