//! Wire payloads of the two progress channels listened to by the front end.

use serde::Serialize;
use tauri::{AppHandle, Emitter};

pub const LYRIC_PROGRESS_EVENT: &str = "lyric_progress";
pub const DOWNLOAD_PROGRESS_EVENT: &str = "download://progress";

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProgressEvent {
    Stage {
        stage: String,
        detail: Option<String>,
    },
    Log {
        line: String,
    },
    Done {
        #[serde(rename = "outputPath")]
        output_path: String,
    },
}

impl ProgressEvent {
    pub fn stage(stage: &str, detail: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.to_string(),
            detail: Some(detail.into()),
        }
    }

    pub fn log(line: impl Into<String>) -> Self {
        Self::Log { line: line.into() }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Downloading,
    Done,
    Error,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DownloadProgressEvent {
    pub group: String,
    pub file: String,
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
    pub status: DownloadStatus,
    pub error: Option<String>,
}

/// Destination for progress events; the app handle in production.
pub trait ProgressSink: Send + Sync {
    fn progress(&self, event: ProgressEvent);
    fn download(&self, event: DownloadProgressEvent);
}

impl ProgressSink for AppHandle {
    fn progress(&self, event: ProgressEvent) {
        if let Err(err) = self.emit(LYRIC_PROGRESS_EVENT, event) {
            log::error!("Failed to emit {LYRIC_PROGRESS_EVENT}: {err}");
        }
    }

    fn download(&self, event: DownloadProgressEvent) {
        if let Err(err) = self.emit(DOWNLOAD_PROGRESS_EVENT, event) {
            log::error!("Failed to emit {DOWNLOAD_PROGRESS_EVENT}: {err}");
        }
    }
}
