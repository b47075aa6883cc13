//! Sliding-tile puzzle state-space explorer.
//!
//! Immutable grid states, a reversible play session, bulk and stepwise
//! graph searches, path reconstruction and playback.

pub mod config;
pub mod direction;
pub mod error;
pub mod goal;
pub mod layout;
pub mod logging;
pub mod notify;
pub mod path;
pub mod player;
pub mod position;
pub mod search;
pub mod session;
pub mod state;
pub mod tile;

pub use config::{LogLevel, PuzzleConfig, ResolvedConfig};
pub use direction::Direction;
pub use error::{LayoutError, PuzzleError};
pub use goal::GoalStateHolder;
pub use path::{reconstruct_path, SolutionPath};
pub use player::{PlaybackDriver, PlaybackState, Player, SearchProcessPlayer, SolutionPlayer};
pub use position::Position;
pub use search::{AlgorithmKind, SearchAlgorithm, SearchOutcome, StepwiseSearchAlgorithm};
pub use session::Puzzle;
pub use state::{reachable_states, Parity, PuzzleState, MAX_GRID_SIZE};
pub use tile::Tile;
