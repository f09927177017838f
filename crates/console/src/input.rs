//! Keyboard move source.
//!
//! Accepts `<piece> <square>` such as `WP5 e4`. `moves` lists every legal
//! move, `moves WP5` one piece's moves, `board` reprints the board and
//! `quit` ends the session.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use chess_core::{GameState, LegalMoves, MoveError, MoveRequest, MoveSource, Square};

use crate::render::render_board;

/// Line input shared between two human players at one keyboard.
pub type SharedInput = Rc<RefCell<dyn BufRead>>;

#[derive(Debug, PartialEq)]
pub enum Command {
    Move(MoveRequest),
    List(Option<String>),
    Board,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, MoveError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["quit"] | ["exit"] | ["resign"] => Ok(Command::Quit),
        ["board"] => Ok(Command::Board),
        ["moves"] => Ok(Command::List(None)),
        ["moves", piece] => Ok(Command::List(Some(piece.to_string()))),
        [piece, square] => {
            let to = Square::from_coord(square)
                .ok_or_else(|| MoveError::MalformedInput(format!("not a square: {square}")))?;
            Ok(Command::Move(MoveRequest::new(*piece, to)))
        }
        [] => Err(MoveError::MalformedInput("empty input".to_string())),
        _ => Err(MoveError::MalformedInput(format!(
            "expected '<piece> <square>', got '{}'",
            line.trim()
        ))),
    }
}

pub struct ConsolePlayer<W: Write> {
    input: SharedInput,
    out: W,
}

impl<W: Write> ConsolePlayer<W> {
    pub fn new(input: SharedInput, out: W) -> Self {
        Self { input, out }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn list_moves(&mut self, state: &GameState, legal: &LegalMoves, only: Option<&str>) {
        let registry = state.registry();
        let filter = only.and_then(|label| registry.find(label));
        if only.is_some() && filter.is_none() {
            writeln!(self.out, "No such piece.").ok();
            return;
        }
        for (id, dests) in legal.iter() {
            if filter.is_some_and(|f| f != id) {
                continue;
            }
            let mut list: Vec<String> = dests.iter().map(|s| s.to_string()).collect();
            list.sort();
            writeln!(self.out, "  {:<4} {}", registry.label(id), list.join(" ")).ok();
        }
        if filter.is_some_and(|f| legal.get(f).is_none()) {
            writeln!(self.out, "  (no legal moves)").ok();
        }
    }
}

impl<W: Write> MoveSource for ConsolePlayer<W> {
    fn select(&mut self, state: &GameState, legal: &LegalMoves) -> Result<MoveRequest, MoveError> {
        loop {
            write!(
                self.out,
                "{} to move (e.g. WP5 e4, 'moves', 'quit'): ",
                state.side_to_move()
            )
            .ok();
            self.out.flush().ok();

            let mut line = String::new();
            match self.input.borrow_mut().read_line(&mut line) {
                Ok(0) | Err(_) => return Err(MoveError::SourceExhausted),
                Ok(_) => {}
            }

            match parse_command(&line)? {
                Command::Move(req) => return Ok(req),
                Command::List(piece) => self.list_moves(state, legal, piece.as_deref()),
                Command::Board => {
                    write!(self.out, "{}", render_board(state)).ok();
                }
                Command::Quit => return Err(MoveError::SourceExhausted),
            }
        }
    }

    fn rejected(&mut self, error: &MoveError) {
        writeln!(self.out, "Invalid move: {error}").ok();
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;
