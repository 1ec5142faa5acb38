use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for scenesync operations
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(scenesync::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error in {path}: {message}")]
    #[diagnostic(code(scenesync::parse))]
    Parse {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(scenesync::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Directory not found at {}", path.display())]
    #[diagnostic(
        code(scenesync::missing_root),
        help("Pass the scenes directory explicitly, e.g. `scenesync sync path/to/scenes`")
    )]
    MissingRoot { path: PathBuf },

    #[error("Worker pool error: {message}")]
    #[diagnostic(code(scenesync::pool))]
    Pool { message: String },
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SyncError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        SyncError::Config {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
