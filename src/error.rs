//! Error types for the rules engine and its settings

use thiserror::Error;

/// Failures raised by the rules engine
///
/// Invalid moves are not errors (they report `false` and roll back), and
/// death is an event, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A board cell outside the 10x20 grid was read or written
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfRange { x: i32, y: i32 },
    /// Hold was requested while holding is disabled for this piece
    #[error("hold is disabled until the current piece locks")]
    HoldDisabled,
    /// A line clear that cannot occur in play
    #[error("no such line clear: {lines} lines (t-spin: {tspin})")]
    InvalidLineClear { lines: u8, tspin: bool },
}

/// Failures while loading, saving or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}
