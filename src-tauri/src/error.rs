use std::path::PathBuf;

use thiserror::Error;

/// Unified app errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Generation already running")]
    AlreadyRunning,

    #[error("Audio file does not exist: {}", .0.display())]
    AudioNotFound(PathBuf),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    #[error("{label} failed with status: {status}")]
    ProcessFailed { label: String, status: String },

    #[error("{tool} did not produce an .lrc file at {}", .path.display())]
    MissingOutput { tool: String, path: PathBuf },

    #[error("Download: {0}")]
    Download(String),

    #[error("Settings: {0}")]
    Settings(String),

    #[error("Dialog: {0}")]
    Dialog(String),

    #[error("Unsupported platform")]
    UnsupportedPlatform,

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Tauri(#[from] tauri::Error),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
