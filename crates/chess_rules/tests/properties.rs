//! Seeded random playouts checking invariants that must hold in every
//! reachable position.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use chess_rules::{Game, Position, to_san};

const GAMES: u64 = 24;
const MAX_PLIES: usize = 160;

fn check_position(pos: &Position) {
    pos.validate()
        .unwrap_or_else(|e| panic!("unreachable position {}: {e}", pos.to_fen()));

    let reparsed = Position::from_fen(&pos.to_fen()).unwrap();
    assert_eq!(&reparsed, pos, "FEN round trip changed {}", pos.to_fen());

    let moves = chess_rules::legal_moves(pos);
    let mover = pos.side_to_move;
    let mut sans = HashSet::new();
    for mv in &moves {
        let after = pos.apply(mv);
        assert!(
            !after.in_check(mover),
            "{}{} leaves the king attacked in {}",
            mv.from,
            mv.to,
            pos.to_fen()
        );
        assert!(
            sans.insert(to_san(pos, mv, &after)),
            "duplicate SAN for {}{} in {}",
            mv.from,
            mv.to,
            pos.to_fen()
        );
    }
}

#[test]
fn test_random_playouts_keep_positions_consistent() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();

        for _ in 0..MAX_PLIES {
            if game.is_over() {
                break;
            }
            check_position(game.position());

            let moves = game.legal_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                panic!("ongoing game without legal moves: {}", game.position().to_fen());
            };
            let before = game.position().clone();
            let outcome_before = game.outcome();

            let entry = game.play_move(mv).unwrap();
            assert_eq!(entry.color, before.side_to_move);

            // Every move can be taken back exactly.
            assert_eq!(game.undo(), Some(mv));
            assert_eq!(game.position(), &before, "seed {seed}");
            assert_eq!(game.outcome(), outcome_before);
            game.play_move(mv).unwrap();
        }
    }
}

#[test]
fn test_random_playouts_survive_snapshot_round_trip() {
    for seed in 100..100 + GAMES / 2 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();

        for _ in 0..MAX_PLIES {
            let moves = game.legal_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            if game.play_move(mv).is_err() {
                break;
            }
        }

        let json = game.to_json().unwrap();
        let restored = Game::from_json(&json).unwrap();
        assert_eq!(restored.position(), game.position(), "seed {seed}");
        assert_eq!(restored.outcome(), game.outcome());
        assert_eq!(restored.move_list(), game.move_list());
        assert_eq!(restored.repetitions(), game.repetitions());
    }
}

#[test]
fn test_undo_all_the_way_back_restores_start() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = Game::new();
    let mut played = 0;
    while played < 40 && !game.is_over() {
        let moves = game.legal_moves();
        let mv = *moves.choose(&mut rng).unwrap();
        game.play_move(mv).unwrap();
        played += 1;
    }

    while game.undo().is_some() {}
    assert_eq!(game.position(), &Position::startpos());
    assert!(game.history().is_empty());
    assert_eq!(game.repetitions().len(), 1);
}
