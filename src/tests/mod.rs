//! Internal test modules - whitebox tests with crate access
//!
//! Tests here exercise several modules together and may reach
//! crate-private items.

mod properties;
