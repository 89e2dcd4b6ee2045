//! Single-flight controller for LRC generation jobs.
//!
//! All handlers of the view mutate one `JobController` through pure updates,
//! so the invocation response and progress events can arrive in any order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::log_buffer::LogBuffer;
use crate::progress::ProgressFact;

/// Extensions offered by the audio file picker.
pub const AUDIO_EXTENSIONS: [&str; 9] = [
    "mp3", "m4a", "aac", "flac", "wav", "ogg", "opus", "aiff", "aif",
];

pub const STATUS_IDLE: &str = "Idle";
pub const STATUS_READY: &str = "Ready";
pub const STATUS_STARTING: &str = "Starting…";
pub const STATUS_DONE: &str = "Done";
pub const STATUS_ERROR: &str = "Error";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    #[default]
    Hybrid,
    Small,
    Medium,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 3] = [Self::Hybrid, Self::Small, Self::Medium];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hybrid => "Hybrid (best available)",
            Self::Small => "Small (faster)",
            Self::Medium => "Medium (more accurate)",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown model: {s}"))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JobState {
    #[default]
    Idle,
    Ready,
    Running,
    Done,
    Error,
}

impl JobState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Done => "Done",
            Self::Error => "Error",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("A generation job is already running")]
    Busy,

    #[error("No audio file selected")]
    NoSelection,
}

/// Arguments of one `generate_lrc_next_to_audio` invocation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub audio_path: String,
    pub model: ModelChoice,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobController {
    audio_path: String,
    model: ModelChoice,
    state: JobState,
    status: String,
    log: LogBuffer,
    output_path: String,
}

impl Default for JobController {
    fn default() -> Self {
        Self {
            audio_path: String::new(),
            model: ModelChoice::default(),
            state: JobState::Idle,
            status: STATUS_IDLE.to_string(),
            log: LogBuffer::new(),
            output_path: String::new(),
        }
    }
}

impl JobController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audio_path(&self) -> &str {
        &self.audio_path
    }

    pub fn model(&self) -> ModelChoice {
        self.model
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn is_busy(&self) -> bool {
        self.state == JobState::Running
    }

    pub fn can_run(&self) -> bool {
        !self.audio_path.is_empty() && !self.is_busy()
    }

    pub fn select_file(&mut self, path: String) -> Result<(), JobError> {
        if self.is_busy() {
            return Err(JobError::Busy);
        }
        if path.is_empty() {
            return Err(JobError::NoSelection);
        }

        self.audio_path = path;
        self.log.clear();
        self.output_path.clear();
        self.state = JobState::Ready;
        self.status = STATUS_READY.to_string();
        Ok(())
    }

    pub fn set_model(&mut self, model: ModelChoice) -> Result<(), JobError> {
        if self.is_busy() {
            return Err(JobError::Busy);
        }
        self.model = model;
        Ok(())
    }

    /// Moves to `Running` and hands out the request to send, or returns
    /// `None` without touching any state when a job cannot start.
    pub fn begin(&mut self) -> Option<JobRequest> {
        if !self.can_run() {
            return None;
        }

        self.log.clear();
        self.output_path.clear();
        self.status = STATUS_STARTING.to_string();
        self.state = JobState::Running;

        Some(JobRequest {
            audio_path: self.audio_path.clone(),
            model: self.model,
        })
    }

    /// Applies the response of the job invocation.
    pub fn finish(&mut self, result: Result<String, String>) {
        match result {
            Ok(output_path) => self.complete(output_path),
            Err(err) => {
                if self.is_busy() {
                    self.state = JobState::Error;
                    self.status = STATUS_ERROR.to_string();
                }
                self.log.push(err);
            }
        }
    }

    /// Applies one progress fact from either event channel.
    pub fn apply(&mut self, fact: ProgressFact) {
        if let ProgressFact::Finished { output_path } = fact {
            self.complete(output_path);
            return;
        }

        if let Some(status) = fact.status_line() {
            self.status = status;
        }
        if let Some(line) = fact.log_line() {
            self.log.push(line);
        }
    }

    // The invocation response and the `done` event race; the first one wins.
    fn complete(&mut self, output_path: String) {
        if !self.is_busy() {
            if self.state == JobState::Done && output_path != self.output_path {
                self.log.push(format!(
                    "Ignoring late output path {output_path} (kept {})",
                    self.output_path
                ));
            }
            return;
        }

        self.output_path = output_path;
        self.status = STATUS_DONE.to_string();
        self.state = JobState::Done;
    }
}
