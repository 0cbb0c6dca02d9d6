//! growbar
//!
//! Auto-resizing chat input bar for ratatui applications: the text area
//! grows with its content up to a bound, then scrolls, and an optional
//! selection overlay opens above it.
//!
//! The pure core lives in [`state`]; [`view`] renders it and hosts the
//! demo event loop.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;
