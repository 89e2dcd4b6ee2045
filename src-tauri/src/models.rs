use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tauri::{AppHandle, Manager};

use crate::download::download_with_progress;
use crate::error::AppError;
use crate::events::ProgressSink;

pub const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";
pub const MODEL_DOWNLOAD_GROUP: &str = "models";

/// Model preference as selected in the UI.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    #[default]
    Hybrid,
    Small,
    Medium,
}

impl ModelChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }
}

impl FromStr for ModelChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Ok(Self::Hybrid),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            _ => Err(AppError::UnknownModel(s.to_string())),
        }
    }
}

/// A concrete whisper.cpp weight file family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhisperModel {
    Small,
    Medium,
}

impl WhisperModel {
    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }

    /// Accepted file names, preferred first. The first one is downloaded when
    /// nothing is installed.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Small => &[
                "ggml-small.bin",
                "ggml-model-whisper-small.bin",
                "ggml-model-whisper-small-q5_1.bin",
                "ggml-model-whisper-small-q8_0.bin",
                "ggml-small-q8_0.bin",
                "ggml-small-q5_1.bin",
            ],
            Self::Medium => &[
                "ggml-medium.bin",
                "ggml-model-whisper-medium.bin",
                "ggml-model-whisper-medium-q5_0.bin",
                "ggml-model-whisper-medium-q8_0.bin",
                "ggml-medium-q8_0.bin",
                "ggml-medium-q5_0.bin",
            ],
        }
    }

    pub fn download_file(self) -> &'static str {
        self.candidates()[0]
    }

    pub fn download_url(self) -> String {
        format!("{MODEL_BASE_URL}/{}", self.download_file())
    }
}

/// Finds a model file in `dir`: exact candidate names first, then any `.bin`
/// sharing a candidate's stem.
pub fn search_dir_for_model(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    let entries: Vec<fs::DirEntry> = fs::read_dir(dir).ok()?.filter_map(|r| r.ok()).collect();

    for &wanted in candidates {
        if let Some(entry) = entries.iter().find(|e| e.file_name() == wanted) {
            return Some(entry.path());
        }
    }

    for &wanted in candidates {
        let stem = wanted.trim_end_matches(".bin");
        let found = entries.iter().find(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            name.starts_with(stem) && name.ends_with(".bin")
        });
        if let Some(entry) = found {
            return Some(entry.path());
        }
    }

    None
}

#[derive(Clone, Debug)]
pub struct ModelLocator {
    search_dirs: Vec<PathBuf>,
    download_dir: PathBuf,
}

impl ModelLocator {
    pub fn new(search_dirs: Vec<PathBuf>, download_dir: PathBuf) -> Self {
        Self {
            search_dirs,
            download_dir,
        }
    }

    /// Custom directory from settings, downloaded models, bundled models, then
    /// development fallbacks.
    pub fn for_app(app: &AppHandle) -> Self {
        let custom = crate::settings::get_custom_models_dir(app);
        let app_models = app
            .path()
            .app_data_dir()
            .map(|dir| dir.join("models"))
            .unwrap_or_else(|_| fallback_models_dir());

        let mut search_dirs = Vec::new();
        search_dirs.extend(custom.clone());
        search_dirs.push(app_models.clone());
        if let Ok(resources) = app.path().resource_dir() {
            search_dirs.push(resources.join("resources").join("models"));
            search_dirs.push(resources.join("models"));
        }
        if let Ok(cwd) = std::env::current_dir() {
            search_dirs.push(cwd.join("resources").join("models"));
            search_dirs.push(cwd.join("src-tauri").join("resources").join("models"));
        }

        Self::new(search_dirs, custom.unwrap_or(app_models))
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn find(&self, model: WhisperModel) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .filter(|dir| dir.is_dir())
            .find_map(|dir| search_dir_for_model(dir, model.candidates()))
    }

    /// Hybrid prefers an installed medium model and otherwise settles for small.
    pub fn pick(&self, choice: ModelChoice) -> WhisperModel {
        match choice {
            ModelChoice::Small => WhisperModel::Small,
            ModelChoice::Medium => WhisperModel::Medium,
            ModelChoice::Hybrid => {
                if self.find(WhisperModel::Medium).is_some() {
                    WhisperModel::Medium
                } else {
                    WhisperModel::Small
                }
            }
        }
    }

    /// Returns the installed model, downloading it first when missing.
    pub fn ensure(&self, sink: &dyn ProgressSink, model: WhisperModel) -> Result<PathBuf, AppError> {
        if let Some(found) = self.find(model) {
            return Ok(found);
        }

        let dest = self.download_dir.join(model.download_file());
        log::info!(
            "Model '{}' not installed, downloading to {}",
            model.name(),
            dest.display()
        );
        download_with_progress(
            sink,
            MODEL_DOWNLOAD_GROUP,
            &model.download_url(),
            &dest,
            model.download_file(),
        )?;
        Ok(dest)
    }
}

fn fallback_models_dir() -> PathBuf {
    let base = dirs_next::data_dir()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join("lyric-time").join("models")
}
