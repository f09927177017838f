//! Game controller settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Run the full board/registry consistency check after every move.
    pub verify_consistency: bool,
    /// Give up on a turn after this many rejected submissions (None = never).
    pub max_rejections: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            verify_consistency: cfg!(debug_assertions),
            max_rejections: None,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
