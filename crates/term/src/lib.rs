//! Terminal rendering for rounds.
//!
//! Renders into a plain framebuffer instead of using a widget toolkit, then
//! flushes it through crossterm. Board cells are drawn 2 columns wide by
//! default to keep them roughly square.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: snapshot to framebuffer, no I/O
//! - [`renderer`]: framebuffer to terminal, diffed

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
