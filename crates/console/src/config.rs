//! Console settings: a TOML file, then command-line overrides on top.

use anyhow::{bail, Context, Result};
use chess_core::GameConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Who supplies moves for a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Random,
}

impl FromStr for PlayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "human" | "h" => Ok(PlayerKind::Human),
            "random" | "r" | "bot" => Ok(PlayerKind::Random),
            _ => bail!("unknown player kind: {s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub game: GameConfig,
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// Seed for random players (None = entropy)
    pub seed: Option<u64>,
    /// Stop after this many plies without a result
    pub max_plies: Option<u32>,
    /// Starting position (None = standard layout)
    pub fen: Option<String>,
    /// `tracing` filter directive, overridden by RUST_LOG
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            white: PlayerKind::Human,
            black: PlayerKind::Random,
            seed: None,
            max_plies: None,
            fen: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Parsed command line. Every field left `None` keeps the config value.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub help: bool,
    pub config: Option<PathBuf>,
    pub white: Option<PlayerKind>,
    pub black: Option<PlayerKind>,
    pub seed: Option<u64>,
    pub max_plies: Option<u32>,
    pub fen: Option<String>,
}

impl CliArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut cli = CliArgs::default();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            if flag == "--help" || flag == "-h" {
                cli.help = true;
                i += 1;
                continue;
            }
            let value = args
                .get(i + 1)
                .map(String::as_str)
                .with_context(|| format!("{flag} needs a value"))?;
            match flag {
                "--config" | "-c" => cli.config = Some(PathBuf::from(value)),
                "--white" | "-w" => cli.white = Some(value.parse()?),
                "--black" | "-b" => cli.black = Some(value.parse()?),
                "--seed" | "-s" => {
                    cli.seed = Some(value.parse().context("--seed expects a number")?)
                }
                "--max-plies" => {
                    cli.max_plies = Some(value.parse().context("--max-plies expects a number")?)
                }
                "--fen" => cli.fen = Some(value.to_string()),
                other => bail!("unknown argument: {other}"),
            }
            i += 2;
        }
        Ok(cli)
    }

    pub fn apply(&self, config: &mut ConsoleConfig) {
        if let Some(w) = self.white {
            config.white = w;
        }
        if let Some(b) = self.black {
            config.black = b;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.max_plies.is_some() {
            config.max_plies = self.max_plies;
        }
        if self.fen.is_some() {
            config.fen = self.fen.clone();
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
