//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (key edges to intents)
//! - Focus/visibility loss

pub mod input;

pub use input::{Direction, InputAdapter, KeyBindings};
