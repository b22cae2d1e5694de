//! Shared utilities for the Incinerator console.

pub mod format;
pub mod logging;
pub mod time;

pub use format::{format_tokens, format_usd};
pub use logging::{init_logging, LogFormat};
pub use time::format_countdown;
