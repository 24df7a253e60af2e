//! Terminal input module.
//!
//! Maps `crossterm` key events to [`KeyAction`]s: abstract round
//! [`types::Command`]s plus the pause and restart controls that the
//! scheduler handles itself. Nothing here touches round state.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit, KeyAction};
