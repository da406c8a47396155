use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };
        legal_moves_into(pos, buf);

        if depth == 1 {
            return buf.len() as u64;
        }
        let mut nodes = 0u64;
        for mv in buf.iter() {
            nodes += inner(&pos.apply(mv), depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Node counts below each root move, keyed by long algebraic notation.
pub fn divide(pos: &Position, depth: u8) -> Vec<(String, u64)> {
    let mut root = Vec::new();
    legal_moves_into(pos, &mut root);
    root.iter()
        .map(|mv| {
            let nodes = perft(&pos.apply(mv), depth.saturating_sub(1));
            (crate::notation::to_uci(mv), nodes)
        })
        .collect()
}
