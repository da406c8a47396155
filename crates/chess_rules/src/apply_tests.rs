use super::*;
use crate::movegen::legal_moves;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// Find the legal move `from -> to` (first promotion choice if several).
fn find(pos: &Position, from: &str, to: &str) -> Move {
    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == sq(from) && m.to == sq(to))
        .unwrap_or_else(|| panic!("{from}{to} not legal"))
}

#[test]
fn test_double_push_sets_en_passant() {
    let pos = Position::startpos();
    let next = apply_move(&pos, &find(&pos, "e2", "e4"));
    assert_eq!(next.en_passant, Some(sq("e3")));
    assert_eq!(next.side_to_move, Color::Black);
    assert_eq!(next.halfmove_clock, 0);
    assert_eq!(next.fullmove_number, 1);
    assert!(next.is_empty(sq("e2")));

    let next = next.apply(&find(&next, "g8", "f6"));
    assert_eq!(next.en_passant, None);
    assert_eq!(next.fullmove_number, 2);
    assert_eq!(next.halfmove_clock, 1);
}

#[test]
fn test_input_position_is_untouched() {
    let pos = Position::startpos();
    let copy = pos.clone();
    let _ = pos.apply(&find(&pos, "g1", "f3"));
    assert_eq!(pos, copy);
}

#[test]
fn test_kingside_castle_moves_rook() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 5 10").unwrap();
    let next = pos.apply(&find(&pos, "e1", "g1"));
    assert_eq!(
        next.piece_at(Square::G1),
        Some(Piece::new(Color::White, PieceKind::King))
    );
    assert_eq!(
        next.piece_at(Square::F1),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert!(next.is_empty(Square::H1));
    assert!(next.is_empty(Square::E1));
    assert!(!next.castling.white_kingside && !next.castling.white_queenside);
    assert!(next.castling.black_kingside && next.castling.black_queenside);
    assert_eq!(next.halfmove_clock, 6);
}

#[test]
fn test_queenside_castle_moves_rook_for_black() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 10").unwrap();
    let next = pos.apply(&find(&pos, "e8", "c8"));
    assert_eq!(
        next.piece_at(Square::C8),
        Some(Piece::new(Color::Black, PieceKind::King))
    );
    assert_eq!(
        next.piece_at(Square::D8),
        Some(Piece::new(Color::Black, PieceKind::Rook))
    );
    assert!(next.is_empty(Square::A8));
    assert_eq!(next.fullmove_number, 11);
    assert!(next.castling.white_kingside && next.castling.white_queenside);
    assert!(!next.castling.black_kingside && !next.castling.black_queenside);
}

#[test]
fn test_en_passant_removes_passed_pawn() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 7 30").unwrap();
    let mv = find(&pos, "e5", "d6");
    assert!(mv.is_en_passant);
    let next = pos.apply(&mv);
    assert!(next.is_empty(sq("d5")));
    assert!(next.is_empty(sq("e5")));
    assert_eq!(
        next.piece_at(sq("d6")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(next.halfmove_clock, 0);
    assert_eq!(next.board.pieces().count(), 3);
}

#[test]
fn test_promotion_places_chosen_piece() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 3 40").unwrap();
    let mv = legal_moves(&pos)
        .into_iter()
        .find(|m| m.promo == Some(PieceKind::Knight))
        .unwrap();
    let next = pos.apply(&mv);
    assert_eq!(
        next.piece_at(Square::A8),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
    assert!(next.is_empty(sq("a7")));
    assert_eq!(next.halfmove_clock, 0);
}

#[test]
fn test_capture_on_rook_home_revokes_right() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").unwrap();
    let next = pos.apply(&find(&pos, "g2", "a8"));
    assert!(!next.castling.black_queenside);
    assert!(next.castling.black_kingside);
    assert!(next.castling.white_kingside && next.castling.white_queenside);
    assert_eq!(next.halfmove_clock, 0);
}

#[test]
fn test_rook_move_revokes_its_side_only() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let next = pos.apply(&find(&pos, "h1", "h5"));
    assert!(!next.castling.white_kingside);
    assert!(next.castling.white_queenside);

    // Moving back home does not restore the right.
    let next = next.apply(&find(&next, "a8", "b8"));
    let next = next.apply(&find(&next, "h5", "h1"));
    assert!(!next.castling.white_kingside);
    assert!(!next.castling.black_queenside);
}

#[test]
fn test_quiet_moves_increment_halfmove_clock() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K1N1 w - - 41 50").unwrap();
    let next = pos.apply(&find(&pos, "g1", "f3"));
    assert_eq!(next.halfmove_clock, 42);
    assert_eq!(next.fullmove_number, 50);
}
