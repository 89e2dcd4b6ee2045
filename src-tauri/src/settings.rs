use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;

use crate::error::AppError;
use crate::models::ModelChoice;

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub model: ModelChoice,
    pub models_dir: Option<String>,
}

const STORE_PATH: &str = "settings.json";

pub fn get_settings(app: &AppHandle) -> Settings {
    match app.store(STORE_PATH) {
        Ok(store) => {
            let model: ModelChoice = store
                .get("model")
                .and_then(|v| v.as_str().and_then(|s| s.parse().ok()))
                .unwrap_or_default();
            let models_dir = store
                .get("models_dir")
                .and_then(|v| v.as_str().map(|s| s.to_string()));
            Settings { model, models_dir }
        }
        Err(e) => {
            log::warn!("Failed to load settings store: {e}");
            Settings::default()
        }
    }
}

pub fn save_settings(app: &AppHandle, settings: &Settings) -> Result<(), AppError> {
    let store = app
        .store(STORE_PATH)
        .map_err(|e| AppError::Settings(format!("Failed to open settings store: {e}")))?;

    store.set("model", serde_json::json!(settings.model.as_str()));
    if let Some(dir) = &settings.models_dir {
        store.set("models_dir", serde_json::json!(dir));
    } else {
        store.delete("models_dir");
    }

    store.save().map_err(|e| AppError::Settings(e.to_string()))
}

pub fn get_custom_models_dir(app: &AppHandle) -> Option<PathBuf> {
    get_settings(app).models_dir.map(PathBuf::from)
}
