//! Console chess
//!
//! Play the rules engine from a terminal, human or random player on
//! either side.

mod config;
mod input;
mod render;

use std::cell::RefCell;
use std::env;
use std::io::{self, BufReader};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use chess_core::{Game, GameError, GameState, GameStatus, MoveError, MoveSource};
use random_player::RandomPlayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{CliArgs, ConsoleConfig, PlayerKind};
use input::{ConsolePlayer, SharedInput};
use render::{render_board, ConsoleReporter};

fn print_usage() {
    println!("Console chess");
    println!();
    println!("Usage:");
    println!("  chess_console [--white human|random] [--black human|random]");
    println!("                [--seed N] [--max-plies N] [--fen FEN] [--config FILE]");
    println!();
    println!("Moves are entered as '<piece> <square>', e.g. 'WP5 e4' or 'BN2 f6'.");
    println!("Type 'moves' to list legal moves, 'board' to reprint, 'quit' to stop.");
    println!();
    println!("Logging follows RUST_LOG, falling back to log_filter in the config file.");
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .without_time()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn make_player(kind: PlayerKind, seed: Option<u64>, input: &SharedInput) -> Box<dyn MoveSource> {
    match kind {
        PlayerKind::Human => Box::new(ConsolePlayer::new(Rc::clone(input), io::stdout())),
        PlayerKind::Random => match seed {
            Some(seed) => Box::new(RandomPlayer::with_seed(seed)),
            None => Box::new(RandomPlayer::new()),
        },
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = CliArgs::parse(&args)?;
    if cli.help {
        print_usage();
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::default(),
    };
    cli.apply(&mut config);
    init_logging(&config.log_filter);

    let state = match &config.fen {
        Some(fen) => GameState::from_fen(fen).context("bad starting position")?,
        None => GameState::startpos(),
    };
    let mut game = Game::with_config(state, config.game.clone())?;

    let input: SharedInput = Rc::new(RefCell::new(BufReader::new(io::stdin())));
    // Distinct seeds so two random players don't mirror each other.
    let mut white = make_player(config.white, config.seed, &input);
    let mut black = make_player(config.black, config.seed.map(|s| s.wrapping_add(1)), &input);
    let mut reporter = ConsoleReporter::new(io::stdout());

    info!(white = ?config.white, black = ?config.black, seed = ?config.seed, "starting game");
    print!("{}", render_board(game.state()));

    match game.play(&mut *white, &mut *black, &mut reporter, config.max_plies) {
        Ok(GameStatus::Checkmate(_) | GameStatus::Stalemate) => {}
        Ok(_) => println!("Stopped after {} plies without a result.", game.state().history().len()),
        Err(GameError::Rejected(MoveError::SourceExhausted)) => println!("Game abandoned."),
        Err(GameError::RejectionLimit(n)) => bail!("gave up after {n} rejected moves"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
