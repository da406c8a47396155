use super::*;
use crate::error::RulesError;
use crate::game::PlayResult;

fn played(moves: &[&str]) -> Game {
    let mut game = Game::new();
    for uci in moves {
        assert!(matches!(game.play_uci(uci), Ok(PlayResult::Played(_))), "{uci}");
    }
    game
}

#[test]
fn test_position_snapshot_layout() {
    let snap = PositionSnapshot::from(&Position::startpos());
    assert_eq!(snap.board.len(), 8);
    assert_eq!(snap.board[0], "rnbqkbnr");
    assert_eq!(snap.board[1], "pppppppp");
    assert_eq!(snap.board[4], "........");
    assert_eq!(snap.board[7], "RNBQKBNR");
    assert_eq!(Position::try_from(&snap).unwrap(), Position::startpos());
}

#[test]
fn test_restore_round_trip() {
    let game = played(&["e2e4", "c7c5", "g1f3", "d7d6", "d2d4"]);
    let restored = Game::restore(&game.to_snapshot()).unwrap();
    assert_eq!(restored.position(), game.position());
    assert_eq!(restored.move_list(), game.move_list());
    assert_eq!(restored.repetitions(), game.repetitions());
    assert_eq!(restored.outcome(), game.outcome());
    assert_eq!(restored.history(), game.history());
}

#[test]
fn test_json_round_trip_and_resume() {
    let game = played(&["e2e4", "e7e5", "g1f3", "b8c6"]);
    let json = game.to_json().unwrap();
    let mut restored = Game::from_json(&json).unwrap();
    assert_eq!(restored.position(), game.position());

    // Play continues and undo reaches back past the restore point.
    assert!(restored.play_uci("f1b5").is_ok());
    assert_eq!(restored.move_list().last().unwrap().san, "Bb5");
    for _ in 0..5 {
        assert!(restored.undo().is_some());
    }
    assert_eq!(restored.position(), &Position::startpos());
}

#[test]
fn test_restore_keeps_repetition_counts() {
    let game = played(&["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"]);
    let mut restored = Game::from_json(&game.to_json().unwrap()).unwrap();
    assert!(restored.play_uci("f6g8").is_ok());
    assert_eq!(
        restored.outcome(),
        GameOutcome::Draw(crate::outcome::DrawReason::Repetition)
    );
}

#[test]
fn test_rejects_bad_dimensions() {
    let mut snap = Game::new().to_snapshot();
    snap.position.board.pop();
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::RowCount(7))
    ));

    let mut snap = Game::new().to_snapshot();
    snap.position.board[3] = ".......".to_string();
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::RowWidth { row: 3, len: 7 })
    ));
}

#[test]
fn test_rejects_bad_piece_encoding() {
    let mut snap = Game::new().to_snapshot();
    snap.position.board[4] = "...x....".to_string();
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::BadCell { row: 4, cell: 'x' })
    ));
}

#[test]
fn test_rejects_bad_en_passant() {
    let mut snap = Game::new().to_snapshot();
    snap.position.en_passant = Some("e9".to_string());
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::Position(FenError::BadSquare(_)))
    ));

    let mut snap = Game::new().to_snapshot();
    snap.position.en_passant = Some("e3".to_string());
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::Position(FenError::BadEnPassant(_)))
    ));
}

#[test]
fn test_rejects_castling_rights_without_rook() {
    let mut snap = Game::new().to_snapshot();
    snap.position.board[7] = "RNBQKBN.".to_string();
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::Position(FenError::CastlingRight {
            color: Color::White,
            side: CastleSide::Kingside
        }))
    ));

    snap.position.castling.white_kingside = false;
    let pos = Position::try_from(&snap.position).unwrap();
    assert!(!pos.castling.has(Color::White, CastleSide::Kingside));
}

#[test]
fn test_rejects_zero_draw_rules() {
    let mut snap = played(&["e2e4"]).to_snapshot();
    snap.rules.fifty_move_halfmoves = 0;
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::Rules(RulesError::ZeroThreshold {
            field: "draw.fifty_move_halfmoves"
        }))
    ));

    // A zero repetition limit would resume as an instant draw; start over instead.
    let mut snap = played(&["e2e4"]).to_snapshot();
    snap.rules.repetition_limit = 0;
    let json = serde_json::to_string(&snap).unwrap();
    let game = Game::from_json_or_new(&json);
    assert_eq!(game.outcome(), GameOutcome::Ongoing);
    assert!(game.history().is_empty());
    assert_eq!(game.rules(), &DrawRules::default());
}

#[test]
fn test_rejects_tampered_history() {
    let game = played(&["e2e4", "e7e5"]);
    let mut snap = game.to_snapshot();
    snap.history[0].mv.to = "e5".parse().unwrap();
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::History { index: 0, .. })
    ));

    // Dropping the last entry leaves e4 leading nowhere near the stored position.
    let mut snap = game.to_snapshot();
    snap.history.pop();
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::History { index: 0, .. })
    ));
}

#[test]
fn test_rejects_missing_repetition_entry() {
    let mut snap = played(&["e2e4"]).to_snapshot();
    snap.repetitions = RepetitionTable::new();
    assert!(matches!(
        Game::restore(&snap),
        Err(SnapshotError::MissingCurrentKey)
    ));
}

#[test]
fn test_malformed_json_falls_back_to_new_game() {
    let game = Game::from_json_or_new("{ not json");
    assert_eq!(game.position(), &Position::startpos());
    assert!(game.history().is_empty());

    assert!(matches!(
        Game::from_json("{}"),
        Err(SnapshotError::Json(_))
    ));

    let mut snap = played(&["d2d4"]).to_snapshot();
    snap.position.board.clear();
    let game = Game::restore_or_new(&snap);
    assert_eq!(game.position(), &Position::startpos());
}
