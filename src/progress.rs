use serde::Deserialize;

use crate::utils::format_bytes;

pub const LYRIC_PROGRESS_EVENT: &str = "lyric_progress";
pub const DOWNLOAD_PROGRESS_EVENT: &str = "download://progress";

/// Logged when a download fails without an error message.
pub const DOWNLOAD_ERROR_FALLBACK: &str = "Unknown download error";

/// Payload of the `lyric_progress` channel.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LyricProgressDto {
    Stage {
        stage: String,
        #[serde(default)]
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

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Downloading,
    Done,
    Error,
}

/// Payload of the `download://progress` channel.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DownloadProgressDto {
    pub group: String,
    pub file: String,
    pub downloaded_bytes: u64,
    #[serde(default)]
    pub total_bytes: Option<u64>,
    pub status: DownloadStatus,
    #[serde(default)]
    pub error: Option<String>,
}

/// One reported event, independent of the channel it arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressFact {
    Stage {
        stage: String,
        detail: Option<String>,
    },
    Log(String),
    Finished {
        output_path: String,
    },
    Downloading {
        file: String,
        downloaded: u64,
        total: Option<u64>,
    },
    Downloaded {
        file: String,
    },
    DownloadFailed {
        file: String,
        error: Option<String>,
    },
}

impl ProgressFact {
    /// The status line this fact projects to, if it replaces the current one.
    pub fn status_line(&self) -> Option<String> {
        match self {
            Self::Stage {
                stage,
                detail: Some(detail),
            } => Some(format!("{stage}: {detail}")),
            Self::Stage { stage, detail: None } => Some(stage.clone()),
            Self::Log(_) => None,
            Self::Finished { .. } => Some("Done".to_string()),
            Self::Downloading {
                file,
                downloaded,
                total,
            } => {
                let total = total.map(format_bytes).unwrap_or_else(|| "?".to_string());
                Some(format!(
                    "Downloading {file}: {} / {total}",
                    format_bytes(*downloaded)
                ))
            }
            Self::Downloaded { file } => Some(format!("Downloaded {file}")),
            Self::DownloadFailed { file, .. } => Some(format!("Error downloading {file}")),
        }
    }

    /// The line this fact appends to the activity log, if any.
    pub fn log_line(&self) -> Option<String> {
        match self {
            Self::Log(line) => Some(line.clone()),
            Self::DownloadFailed { error, .. } => Some(
                error
                    .clone()
                    .unwrap_or_else(|| DOWNLOAD_ERROR_FALLBACK.to_string()),
            ),
            _ => None,
        }
    }
}

impl From<LyricProgressDto> for ProgressFact {
    fn from(dto: LyricProgressDto) -> Self {
        match dto {
            LyricProgressDto::Stage { stage, detail } => Self::Stage { stage, detail },
            LyricProgressDto::Log { line } => Self::Log(line),
            LyricProgressDto::Done { output_path } => Self::Finished { output_path },
        }
    }
}

impl From<DownloadProgressDto> for ProgressFact {
    fn from(dto: DownloadProgressDto) -> Self {
        match dto.status {
            DownloadStatus::Downloading => Self::Downloading {
                file: dto.file,
                downloaded: dto.downloaded_bytes,
                total: dto.total_bytes,
            },
            DownloadStatus::Done => Self::Downloaded { file: dto.file },
            DownloadStatus::Error => Self::DownloadFailed {
                file: dto.file,
                error: dto.error,
            },
        }
    }
}
