//! Settings module - immutable round configuration
//!
//! A [`GameSettings`] value is handed to [`crate::Round::new`] and never
//! changes for the lifetime of the round. It can be built in code, parsed
//! from JSON, or loaded from the file named by `BLOCKFALL_CONFIG`.
//!
//! ```
//! use blockfall_core::GameSettings;
//!
//! let s = GameSettings::from_json_str(r#"{ "lookahead": 5, "kick_set": "compact" }"#).unwrap();
//! assert_eq!(s.lookahead, 5);
//! assert_eq!(s.rows, 20);
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::MAX_DIM;
use crate::piece::KickSet;
use crate::types::{
    DEFAULT_COLS, DEFAULT_DROP_INTERVAL, DEFAULT_LOCK_DELAY, DEFAULT_LOOKAHEAD,
    DEFAULT_MESSAGE_LIFE, DEFAULT_ROWS, DEFAULT_SPAWN, DEFAULT_TICK_RATE,
};

/// Environment variable naming a JSON settings file
pub const CONFIG_ENV: &str = "BLOCKFALL_CONFIG";

/// Deepest preview a round supports
pub const MAX_LOOKAHEAD: usize = 16;

/// Round configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    /// Board height
    pub rows: u8,
    /// Board width
    pub cols: u8,
    /// Logic ticks per second (read by the scheduler, not the core)
    pub tick_rate: u32,
    /// Ticks between gravity steps
    pub drop_interval: u32,
    /// Ticks a resting piece waits before it locks
    pub lock_delay: u32,
    /// Ticks a transient message stays visible
    pub message_life: u32,
    /// Upcoming pieces guaranteed previewable
    pub lookahead: usize,
    /// Spawn anchor row
    pub spawn_x: i8,
    /// Spawn anchor column
    pub spawn_y: i8,
    /// Ordered kick list used by rotation
    pub kick_set: KickSet,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tick_rate: DEFAULT_TICK_RATE,
            drop_interval: DEFAULT_DROP_INTERVAL,
            lock_delay: DEFAULT_LOCK_DELAY,
            message_life: DEFAULT_MESSAGE_LIFE,
            lookahead: DEFAULT_LOOKAHEAD,
            spawn_x: DEFAULT_SPAWN.0,
            spawn_y: DEFAULT_SPAWN.1,
            kick_set: KickSet::default(),
        }
    }
}

impl GameSettings {
    /// Parse and validate JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_json_str(&text)
    }

    /// Load from the file named by `BLOCKFALL_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, SettingsError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn spawn(&self) -> (i8, i8) {
        (self.spawn_x, self.spawn_y)
    }

    /// Check every field is usable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(4..=MAX_DIM).contains(&self.rows) {
            return Err(SettingsError::invalid("rows", format!("must be 4..={MAX_DIM}")));
        }
        if !(4..=MAX_DIM).contains(&self.cols) {
            return Err(SettingsError::invalid("cols", format!("must be 4..={MAX_DIM}")));
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::invalid("tick_rate", "must be at least 1"));
        }
        if self.drop_interval == 0 {
            return Err(SettingsError::invalid("drop_interval", "must be at least 1"));
        }
        if self.lookahead > MAX_LOOKAHEAD {
            return Err(SettingsError::invalid(
                "lookahead",
                format!("must be at most {MAX_LOOKAHEAD}"),
            ));
        }
        // The mask may hang off the board, but some of it must land inside.
        if self.spawn_y < -3 || self.spawn_y >= self.cols as i8 {
            return Err(SettingsError::invalid("spawn_y", "places the mask outside the board"));
        }
        if self.spawn_x < -3 || self.spawn_x >= self.rows as i8 {
            return Err(SettingsError::invalid("spawn_x", "places the mask outside the board"));
        }
        Ok(())
    }
}

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "cannot parse settings: {e}"),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = GameSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!((s.rows, s.cols), (20, 10));
        assert_eq!(s.spawn(), (0, 3));
        assert_eq!(s.kick_set, KickSet::Extended);
    }

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(GameSettings::from_json_str("{}").unwrap(), GameSettings::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let s = GameSettings::from_json_str(r#"{"drop_interval": 10, "kick_set": "compact"}"#)
            .unwrap();
        assert_eq!(s.drop_interval, 10);
        assert_eq!(s.kick_set, KickSet::Compact);
        assert_eq!(s.lock_delay, DEFAULT_LOCK_DELAY);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = GameSettings::from_json_str(r#"{"speed": 3}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = GameSettings::from_json_str(r#"{"rows": 2}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "rows", .. }));

        let err = GameSettings::from_json_str(r#"{"drop_interval": 0}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid setting `drop_interval`: must be at least 1"
        );

        let err = GameSettings::from_json_str(r#"{"cols": 6, "spawn_y": 6}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "spawn_y", .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameSettings::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
