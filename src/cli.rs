use clap::{Parser, Subcommand};
use slider_explorer::{AlgorithmKind, LogLevel, PuzzleState};
use std::path::PathBuf;
use std::time::Duration;

/// Explore, solve and play sliding-tile puzzles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Overrides the configured log level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search from the start to its goal and replay the solution.
    Solve {
        /// Row-major start layout, e.g. "1,2,3,4,5,6,7,0,8".
        #[arg(long)]
        start: Option<PuzzleState>,

        /// Goal layout; defaults to the configured goal of the start's parity.
        #[arg(long)]
        goal: Option<PuzzleState>,

        #[arg(short, long)]
        algorithm: Option<AlgorithmKind>,
    },
    /// Enumerate every state reachable from the start.
    Explore {
        #[arg(long)]
        start: Option<PuzzleState>,

        #[arg(short, long)]
        algorithm: Option<AlgorithmKind>,

        /// Cancel the run after this long (e.g. "10s", "2m").
        #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
        time_limit: Option<Duration>,
    },
    /// Expand the search one node at a time and print each step.
    Trace {
        #[arg(long)]
        start: Option<PuzzleState>,

        #[arg(short, long)]
        algorithm: Option<AlgorithmKind>,

        /// Expansions to perform before stopping.
        #[arg(short = 'n', long, default_value_t = 10)]
        steps: usize,

        /// Stop at this layout instead of the configured goal.
        #[arg(long)]
        goal: Option<PuzzleState>,
    },
    /// Move the empty tile with the arrow keys.
    Play {
        #[arg(long)]
        start: Option<PuzzleState>,
    },
}
