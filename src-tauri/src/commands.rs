use std::path::PathBuf;

use tauri::AppHandle;

use crate::error::AppError;
use crate::job;
use crate::models::{ModelChoice, ModelLocator};
use crate::process::Toolchain;
use crate::settings::{get_settings, save_settings};

#[tauri::command]
pub async fn pick_audio_file(
    app: AppHandle,
    extensions: Vec<String>,
) -> Result<Option<String>, AppError> {
    use tauri_plugin_dialog::DialogExt;

    let result = tauri::async_runtime::spawn_blocking(move || {
        let extensions: Vec<&str> = extensions.iter().map(String::as_str).collect();
        app.dialog()
            .file()
            .add_filter("Audio", &extensions)
            .blocking_pick_file()
    })
    .await
    .map_err(|e| AppError::Dialog(format!("Dialog task failed: {e}")))?;

    Ok(result.map(|p| p.to_string()))
}

#[tauri::command]
pub async fn generate_lrc_next_to_audio(
    app: AppHandle,
    audio_path: String,
    model: String,
) -> Result<String, AppError> {
    log::info!("Tauri command generate_lrc_next_to_audio invoked: model={model}");
    let choice: ModelChoice = model.parse()?;

    let output = tauri::async_runtime::spawn_blocking(move || {
        let toolchain = Toolchain::for_app(&app)?;
        let models = ModelLocator::for_app(&app);
        job::generate_lrc(&app, &toolchain, &models, &PathBuf::from(audio_path), choice)
    })
    .await??;

    Ok(output.display().to_string())
}

#[tauri::command]
pub fn get_model_choice(app: AppHandle) -> String {
    get_settings(&app).model.as_str().to_string()
}

#[tauri::command]
pub fn set_model_choice(app: AppHandle, model: String) -> Result<(), AppError> {
    let mut settings = get_settings(&app);
    settings.model = model.parse()?;
    log::info!("Command set_model_choice invoked: model={}", settings.model.as_str());
    save_settings(&app, &settings)
}
