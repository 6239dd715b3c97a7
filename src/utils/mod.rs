//! Utilities module
//!
//! Shared text helpers and logging setup used across the crate:
//! - `helpers`: case-insensitive keyword search, depth-aware splitting,
//!   quote and comment stripping
//! - `logger`: `env_logger` initialization

pub mod helpers;
pub mod logger;

pub use helpers::Helpers;
pub use logger::Logger;
