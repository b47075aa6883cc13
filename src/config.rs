//! Layered settings: built-in defaults, then an optional TOML file, then
//! `SLIDER_*` environment variables.

use crate::error::PuzzleError;
use crate::goal::GoalStateHolder;
use crate::search::AlgorithmKind;
use crate::session::DEFAULT_HISTORY_LIMIT;
use crate::state::{PuzzleState, MAX_GRID_SIZE};
use clap::ValueEnum;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "SLIDER_";

#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Raw, unvalidated settings as read from the providers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Width and height of the grid.
    pub grid_size: usize,
    /// Undo entries kept by an interactive session.
    pub history_limit: usize,
    /// Row-major start layout; a random solvable one when absent.
    pub start: Option<Vec<u16>>,
    pub even_goal: Option<Vec<u16>>,
    pub odd_goal: Option<Vec<u16>>,
    pub algorithm: AlgorithmKind,
    pub log_level: LogLevel,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            grid_size: 3,
            history_limit: DEFAULT_HISTORY_LIMIT,
            start: None,
            even_goal: None,
            odd_goal: None,
            algorithm: AlgorithmKind::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Validated settings with every layout built.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub grid_size: usize,
    pub history_limit: usize,
    pub start: Option<PuzzleState>,
    pub goals: GoalStateHolder,
    pub algorithm: AlgorithmKind,
    pub log_level: LogLevel,
}

impl PuzzleConfig {
    /// Merges defaults, the TOML file at `path` (if given) and the
    /// environment. A path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, PuzzleError> {
        Self::figment(path)?.extract().map_err(PuzzleError::from)
    }

    fn figment(path: Option<&Path>) -> Result<Figment, PuzzleError> {
        let mut figment = Figment::from(Serialized::defaults(PuzzleConfig::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(PuzzleError::Config(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Builds every configured layout and files the goals by parity. Without
    /// explicit goals the solved layout is used.
    pub fn resolve(&self) -> Result<ResolvedConfig, PuzzleError> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(PuzzleError::Config(format!(
                "grid_size must be within 2..={}, got {}",
                MAX_GRID_SIZE, self.grid_size
            )));
        }
        let build = |values: &Option<Vec<u16>>| {
            values
                .as_deref()
                .map(|values| PuzzleState::create(self.grid_size, values))
                .transpose()
        };

        let start = build(&self.start)?;
        let even_goal = build(&self.even_goal)?;
        let odd_goal = build(&self.odd_goal)?;

        let mut goals = GoalStateHolder::new();
        if even_goal.is_none() && odd_goal.is_none() {
            goals.set_goal(PuzzleState::solved(self.grid_size));
        }
        for goal in [even_goal, odd_goal].into_iter().flatten() {
            goals.set_goal(goal);
        }

        Ok(ResolvedConfig {
            grid_size: self.grid_size,
            history_limit: self.history_limit,
            start,
            goals,
            algorithm: self.algorithm,
            log_level: self.log_level,
        })
    }
}
