//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every game rule and the round state machine. It has no
//! dependency on terminals, files or clocks: a scheduler calls
//! [`Round::tick`] at a fixed rate and a renderer reads [`RoundSnapshot`]s.
//!
//! - **Deterministic**: the same seed and command sequence give the same round
//! - **Injected configuration**: shapes and [`GameSettings`] are plain values
//!   passed in at construction
//! - **Observable**: state changes are recorded as [`RoundEvent`]s
//!
//! # Module Structure
//!
//! - [`shapes`]: 4x4 masks for every kind and rotation
//! - [`bag`]: 7-bag piece generation with a lookahead queue
//! - [`board`]: the grid, collision queries and row clearing
//! - [`piece`]: the active piece, movement and kick-based rotation
//! - [`scoring`]: line scores, ren chains and T-spin detection
//! - [`round`]: the round controller
//! - [`settings`]: round configuration and its loading
//! - [`events`] and [`snapshot`]: what observers and renderers see
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSettings, Round};
//! use blockfall_core::types::Command;
//!
//! let mut round = Round::new(GameSettings::default(), 12345);
//! round.enqueue_command(Command::MoveRight);
//! round.enqueue_command(Command::HardDrop);
//! round.tick();
//!
//! assert_eq!(round.board().occupied_count(), 4);
//! assert!(!round.is_game_over());
//! ```
//!
//! # Timing
//!
//! Everything is counted in ticks (30 per second by default):
//! - **Gravity**: one row every `drop_interval` ticks (30)
//! - **Lock delay**: a resting piece locks after `lock_delay` ticks (30)
//! - **Messages**: stay up for `message_life` ticks (45)

pub mod bag;
pub mod board;
pub mod events;
pub mod piece;
pub mod round;
pub mod scoring;
pub mod settings;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use bag::PieceBag;
pub use board::{Board, ClearedRows};
pub use events::RoundEvent;
pub use piece::{ActivePiece, KickSet};
pub use round::Round;
pub use scoring::{is_t_spin, score_clear, ClearMessage, ClearScore};
pub use settings::{GameSettings, SettingsError};
pub use shapes::{CatalogError, Shape, ShapeCatalog};
pub use snapshot::{ActiveSnapshot, RoundSnapshot};
