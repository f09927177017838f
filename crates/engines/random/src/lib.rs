//! Random Move Player
//!
//! A move source that selects moves uniformly at random from the legal
//! moves it is offered. Useful for:
//! - Driving the game controller without a human at the keyboard
//! - Self-play stress testing of the rules engine
//! - Reproducible games via a fixed seed

use chess_core::{GameState, LegalMoves, MoveError, MoveRequest, MoveSource};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::trace;


/// A player that picks a random legal move every turn.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
    picks: u64,
}

impl RandomPlayer {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            picks: 0,
        }
    }

    /// Same seed, same game.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            picks: 0,
        }
    }

    /// Number of moves chosen so far.
    pub fn picks(&self) -> u64 {
        self.picks
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for RandomPlayer {
    fn select(&mut self, state: &GameState, legal: &LegalMoves) -> Result<MoveRequest, MoveError> {
        let moves: Vec<_> = legal.moves().collect();
        let &(id, to) = moves
            .choose(&mut self.rng)
            .ok_or(MoveError::SourceExhausted)?;

        self.picks += 1;
        let label = state.registry().label(id);
        trace!(piece = %label, %to, options = moves.len(), "random pick");
        Ok(MoveRequest::new(label, to))
    }
}
