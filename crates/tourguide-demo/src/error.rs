use std::path::PathBuf;

use thiserror::Error;
use tourguide::runtime::GuideConfigError;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("guide config: {0}")]
    Config(#[from] GuideConfigError),

    #[error("required path does not exist: {path}")]
    MissingPath { path: PathBuf },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("bad script token {token:?}: {message}")]
    Script { token: String, message: String },

    #[error("guide is invalid:\n  {}", .problems.join("\n  "))]
    Invalid { problems: Vec<String> },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Invalid { .. } | Self::Config(GuideConfigError::Validation(_)) => 2,
            Self::Script { .. } | Self::InvalidArgument { .. } => 64,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
