//! Logging utilities
//!
//! This module provides logging setup using the `log` crate with an
//! `env_logger` backend. Library code logs through the `log` macros only;
//! initialization happens once in the binary.
//!
//! # Example
//!
//! ```rust
//! use relopt::utils::Logger;
//!
//! Logger::init();
//! log::info!("optimizer started");
//! ```

use log::LevelFilter;

/// Logging setup
///
/// Thin facade over `env_logger` so the binary has one place to configure
/// output. `RUST_LOG` still overrides the programmatic default.
pub struct Logger;

impl Logger {
    /// Initialize the logger with the default level (`warn`)
    ///
    /// Warnings carry the lenient-parse diagnostics, so they stay visible
    /// unless explicitly silenced.
    pub fn init() {
        Self::init_with_level(LevelFilter::Warn);
    }

    /// Initialize the logger with an explicit level filter
    ///
    /// # Arguments
    /// * `level` - Log level filter
    pub fn init_with_level(level: LevelFilter) {
        env_logger::Builder::from_default_env()
            .filter_level(level)
            .try_init()
            .ok();
    }

    /// Map a `-v` occurrence count to a level filter
    ///
    /// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
    pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(Logger::level_from_verbosity(0), LevelFilter::Warn);
        assert_eq!(Logger::level_from_verbosity(1), LevelFilter::Info);
        assert_eq!(Logger::level_from_verbosity(2), LevelFilter::Debug);
        assert_eq!(Logger::level_from_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn test_init_is_idempotent() {
        Logger::init();
        Logger::init();
    }
}
