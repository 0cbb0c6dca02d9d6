//! Error types for growbar.
//!
//! The layout core itself never fails: padding, slot and overlay updates
//! always succeed. The only programmer error it reports is selecting an
//! overlay row that is not in the filtered list. Everything else here
//! belongs to the demo application shell.
//!
//! # Error Hierarchy
//!
//! - [`InputBarError`] - misuse of the component API
//! - [`AppError`] - top-level binary error wrapping config, logging and
//!   terminal failures

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Errors reported by the input bar component.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputBarError {
    /// An overlay row index outside the current filtered list.
    ///
    /// This is never clamped: the caller asked for a row that does not
    /// exist, which means its view of the overlay is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbar::model::InputBarError;
    ///
    /// let err = InputBarError::IndexOutOfRange { index: 4, len: 2 };
    /// assert!(err.to_string().contains("index 4"));
    /// ```
    #[error("Overlay row index {index} out of range for {len} filtered rows")]
    IndexOutOfRange {
        /// Requested row.
        index: usize,
        /// Length of the filtered list at the time of the request.
        len: usize,
    },
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
