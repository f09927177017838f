use crate::{board::GameState, error::StateError, legal::legal_moves_in_place};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(state: &mut GameState, depth: u8) -> Result<u64, StateError> {
    if depth == 0 {
        return Ok(1);
    }

    let side = state.side_to_move();
    let legal = legal_moves_in_place(side, state)?;
    if depth == 1 {
        return Ok(legal.len() as u64);
    }

    let mut nodes = 0u64;
    for (id, to) in legal.moves() {
        state.apply(id, to)?;
        nodes += perft(state, depth - 1)?;
        state.undo()?;
    }
    Ok(nodes)
}
