use super::*;

#[test]
fn test_startpos_layout() {
    let pos = Position::startpos();
    assert_eq!(
        pos.piece_at(Square::E1),
        Some(Piece::new(Color::White, PieceKind::King))
    );
    assert_eq!(
        pos.piece_at(Square::D8),
        Some(Piece::new(Color::Black, PieceKind::Queen))
    );
    assert_eq!(pos.board.pieces().count(), 32);
    assert_eq!(pos.side_to_move, Color::White);
    assert_eq!(pos.castling, CastlingRights::ALL);
    assert_eq!(pos.en_passant, None);
    assert_eq!(pos.fullmove_number, 1);
}

#[test]
fn test_off_board_probes_read_empty() {
    let pos = Position::startpos();
    assert_eq!(pos.board.piece_at_coords(-1, 0), None);
    assert_eq!(pos.board.piece_at_coords(8, 7), None);
    assert_eq!(
        pos.board.piece_at_coords(0, 0),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert!(Board::is_on_board(7, 7));
    assert!(!Board::is_on_board(7, 8));
}

#[test]
fn test_is_empty() {
    let pos = Position::startpos();
    assert!(pos.is_empty("e4".parse().unwrap()));
    assert!(!pos.is_empty("e2".parse().unwrap()));
}

#[test]
fn test_king_squares() {
    let pos = Position::startpos();
    assert_eq!(pos.king_sq(Color::White), Some(Square::E1));
    assert_eq!(pos.king_sq(Color::Black), Some(Square::E8));
    assert_eq!(Board::empty().king_sq(Color::White), None);
}

#[test]
fn test_revoke_rook_square() {
    let mut rights = CastlingRights::ALL;
    rights.revoke_rook_square(Square::H8);
    assert!(!rights.black_kingside);
    assert!(rights.black_queenside);
    rights.revoke_rook_square("e4".parse().unwrap());
    assert!(rights.white_kingside && rights.white_queenside);
    rights.revoke_all(Color::White);
    assert!(!rights.has(Color::White, CastleSide::Kingside));
    assert!(!rights.has(Color::White, CastleSide::Queenside));
    assert!(rights.has(Color::Black, CastleSide::Queenside));
}
