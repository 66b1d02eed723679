use std::fmt;

/// Errors surfaced by the simulation core.
///
/// Integration, clamping and destruction are total; only construction with a
/// bad argument and removal of an unknown sound can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    InvalidArgument(String),
    NotFound(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            GameError::NotFound(what) => write!(f, "not found: {what}"),
        }
    }
}

impl std::error::Error for GameError {}
