//! Text rendering of the board and of turn outcomes.

use std::io::Write;

use chess_core::{Color, GameState, Outcome, OutcomeReporter, Square};

/// Board from White's side, rank 8 at the top, one label per square.
pub fn render_board(state: &GameState) -> String {
    let mut s = String::new();
    for rank in (0..8u8).rev() {
        s.push_str(&format!("{} ", rank + 1));
        for file in 0..8u8 {
            let cell = Square::new(rank, file)
                .and_then(|sq| state.piece_at(sq))
                .map(|(_, rec)| rec.label())
                .unwrap_or_else(|| ".".to_string());
            s.push_str(&format!(" {cell:<4}"));
        }
        s.push('\n');
    }
    s.push_str("  ");
    for file in 0..8u8 {
        s.push_str(&format!(" {:<4}", (b'a' + file) as char));
    }
    s.push('\n');
    s
}

pub fn describe(outcome: Outcome) -> Option<String> {
    match outcome {
        Outcome::Continue => None,
        Outcome::InCheck(side) => Some(format!("{side} is in check.")),
        Outcome::Checkmate(winner) => Some(format!(
            "Checkmate! {winner} wins ({}).",
            match winner {
                Color::White => "1-0",
                Color::Black => "0-1",
            }
        )),
        Outcome::Stalemate => Some("Stalemate. The game is drawn (1/2-1/2).".to_string()),
    }
}

/// Prints the board and any notable outcome after each turn.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> OutcomeReporter for ConsoleReporter<W> {
    fn report(&mut self, state: &GameState, outcome: Outcome) {
        if let Some(last) = state.history().last() {
            writeln!(
                self.out,
                "\n{} {} -> {}",
                state.registry().label(last.piece),
                last.from,
                last.to
            )
            .ok();
        }
        write!(self.out, "{}", render_board(state)).ok();
        if let Some(msg) = describe(outcome) {
            writeln!(self.out, "{msg}").ok();
        }
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
