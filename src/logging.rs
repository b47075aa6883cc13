//! Logger setup for the binary.

use crate::config::LogLevel;
use env_logger::{Builder, Env};

/// Installs the global logger.
///
/// `RUST_LOG` is read first (defaulting to `info`); `level` then sets the
/// crate-wide filter. Calling this twice keeps the first logger.
pub fn init_logger(level: LogLevel) {
    let env = Env::default().filter_or("RUST_LOG", "info");
    let mut builder = Builder::from_env(env);
    builder.filter_level(level.to_level_filter());

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at level {:?}", level);
    }
}
