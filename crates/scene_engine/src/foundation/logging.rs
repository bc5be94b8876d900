//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system with the default `info` filter
///
/// `RUST_LOG` still takes precedence when it is set.
pub fn init() -> Result<(), log::SetLoggerError> {
    init_with_level("info")
}

/// Initialize the logging system, falling back to `level` when `RUST_LOG` is unset
pub fn init_with_level(level: &str) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init()
}
