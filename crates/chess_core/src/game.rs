//! Turn state machine.
//!
//! Each turn starts by computing the side to move's legal moves and whether
//! it is in check, which is all that is needed to tell checkmate from
//! stalemate. Moves come from a [`MoveSource`] and are only applied if they
//! appear in that turn's legal move set.

use tracing::{debug, info, warn};

use crate::board::GameState;
use crate::config::GameConfig;
use crate::error::{GameError, MoveError, StateError};
use crate::legal::{LegalMoves, legal_moves_in_place};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingMove(Color),
    InCheck(Color),
    /// Carries the winning side.
    Checkmate(Color),
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }

    pub fn outcome(self) -> Outcome {
        match self {
            GameStatus::AwaitingMove(_) => Outcome::Continue,
            GameStatus::InCheck(side) => Outcome::InCheck(side),
            GameStatus::Checkmate(winner) => Outcome::Checkmate(winner),
            GameStatus::Stalemate => Outcome::Stalemate,
        }
    }
}

/// What gets reported after each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The side now to move is in check.
    InCheck(Color),
    /// Carries the winning side.
    Checkmate(Color),
    Stalemate,
}

/// Supplies moves for one side, e.g. a console prompt or a bot.
pub trait MoveSource {
    /// Pick one move out of `legal`. Returning an error makes the controller
    /// ask again, except for [`MoveError::SourceExhausted`] which ends play.
    fn select(&mut self, state: &GameState, legal: &LegalMoves) -> Result<MoveRequest, MoveError>;

    /// Called when a selection was refused.
    fn rejected(&mut self, _error: &MoveError) {}
}

pub trait OutcomeReporter {
    fn report(&mut self, state: &GameState, outcome: Outcome);
}

impl<F: FnMut(&GameState, Outcome)> OutcomeReporter for F {
    fn report(&mut self, state: &GameState, outcome: Outcome) {
        self(state, outcome)
    }
}

pub struct Game {
    state: GameState,
    config: GameConfig,
    status: GameStatus,
    legal: LegalMoves,
}

impl Game {
    pub fn new(state: GameState) -> Result<Self, StateError> {
        Self::with_config(state, GameConfig::default())
    }

    pub fn with_config(state: GameState, config: GameConfig) -> Result<Self, StateError> {
        if config.verify_consistency {
            state.check_consistency()?;
        }
        let side = state.side_to_move();
        let mut game = Game {
            state,
            config,
            status: GameStatus::AwaitingMove(side),
            legal: LegalMoves::default(),
        };
        game.begin_turn()?;
        Ok(game)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    /// Legal moves for the side to move. Empty once the game is over.
    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal
    }
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn begin_turn(&mut self) -> Result<(), StateError> {
        let (status, legal) = assess(&mut self.state)?;
        self.status = status;
        self.legal = legal;

        match self.status {
            GameStatus::Checkmate(winner) => info!(%winner, "checkmate"),
            GameStatus::Stalemate => info!("stalemate"),
            GameStatus::InCheck(side) => debug!(%side, "in check"),
            GameStatus::AwaitingMove(_) => {}
        }
        Ok(())
    }

    /// Turn a request into a move from this turn's legal set.
    pub fn resolve(&self, req: &MoveRequest) -> Result<(PieceId, Square), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let side = self.state.side_to_move();
        let registry = self.state.registry();
        let id = registry
            .find(&req.piece)
            .filter(|&id| registry[id].alive && registry[id].color == side)
            .ok_or_else(|| MoveError::UnknownPieceIdentifier(req.piece.clone()))?;

        if !self.legal.contains(id, req.to) {
            return Err(MoveError::IllegalDestination {
                piece: registry[id].label(),
                to: req.to,
            });
        }
        Ok((id, req.to))
    }

    /// Validate and play one move. Rejections leave the game untouched.
    pub fn submit(&mut self, req: &MoveRequest) -> Result<Outcome, GameError> {
        let (id, to) = self.resolve(req)?;
        let mv = self.state.apply(id, to)?;
        debug!(
            piece = %self.state.registry().label(mv.piece),
            from = %mv.from,
            to = %mv.to,
            capture = mv.captured.map(|c| self.state.registry().label(c.piece)),
            "move applied"
        );
        if self.config.verify_consistency {
            self.state.check_consistency()?;
        }
        self.begin_turn()?;
        Ok(self.status.outcome())
    }

    /// Ask `source` for a move until one is accepted.
    pub fn play_turn(&mut self, source: &mut dyn MoveSource) -> Result<Outcome, GameError> {
        let mut rejections = 0u32;
        loop {
            let err = match source.select(&self.state, &self.legal) {
                Ok(req) => match self.submit(&req) {
                    Ok(outcome) => return Ok(outcome),
                    Err(GameError::Rejected(e)) => e,
                    Err(other) => return Err(other),
                },
                Err(e) => e,
            };
            if matches!(err, MoveError::SourceExhausted | MoveError::GameOver) {
                return Err(err.into());
            }

            warn!(%err, "move rejected");
            source.rejected(&err);
            rejections += 1;
            if let Some(max) = self.config.max_rejections
                && rejections >= max
            {
                return Err(GameError::RejectionLimit(rejections));
            }
        }
    }

    /// Alternate between the two sources until the game ends or `max_plies`
    /// moves have been played. Returns the status play stopped in.
    pub fn play(
        &mut self,
        white: &mut dyn MoveSource,
        black: &mut dyn MoveSource,
        reporter: &mut dyn OutcomeReporter,
        max_plies: Option<u32>,
    ) -> Result<GameStatus, GameError> {
        if self.status.outcome() != Outcome::Continue {
            reporter.report(&self.state, self.status.outcome());
        }

        let mut plies = 0u32;
        while !self.is_over() {
            if max_plies.is_some_and(|m| plies >= m) {
                break;
            }
            let source: &mut dyn MoveSource = match self.state.side_to_move() {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            let outcome = self.play_turn(source)?;
            reporter.report(&self.state, outcome);
            plies += 1;
        }
        Ok(self.status)
    }

    /// Take back the last move and recompute the turn. A finished game
    /// stays finished.
    pub fn undo(&mut self) -> Result<MoveRecord, GameError> {
        if self.is_over() {
            return Err(MoveError::GameOver.into());
        }
        let mut state = self.state.clone();
        let mv = state.undo()?;
        let (status, legal) = assess(&mut state)?;

        self.state = state;
        self.status = status;
        self.legal = legal;
        debug!(piece = %self.state.registry().label(mv.piece), from = %mv.from, "move taken back");
        Ok(mv)
    }
}

/// Status and legal moves for the side to move in `state`.
fn assess(state: &mut GameState) -> Result<(GameStatus, LegalMoves), StateError> {
    let side = state.side_to_move();
    let legal = legal_moves_in_place(side, state)?;
    let status = match (state.in_check(side), legal.is_empty()) {
        (true, true) => GameStatus::Checkmate(side.other()),
        (false, true) => GameStatus::Stalemate,
        (true, false) => GameStatus::InCheck(side),
        (false, false) => GameStatus::AwaitingMove(side),
    };
    Ok((status, legal))
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
