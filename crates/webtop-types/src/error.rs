//! Error types for webtop.

use std::io;

/// Errors produced by the webtop framework.
///
/// File-tree variants carry the path (or name) they refer to so that the
/// terminal can render command-specific messages from them.
#[derive(Debug, thiserror::Error)]
pub enum WebtopError {
    #[error("no such file or directory: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("is a directory: {0}")]
    NotAFile(String),

    #[error("file exists: {0}")]
    AlreadyExists(String),

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("operation not permitted: {0}")]
    PermissionDenied(String),

    #[error("{command}: missing {operand}")]
    MissingOperand { command: String, operand: String },

    #[error("{0}: command not found")]
    UnknownCommand(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, WebtopError>;
