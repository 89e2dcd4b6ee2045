use tauri::{AppHandle, Builder, Manager, RunEvent, WindowEvent};

use crate::commands;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let context = tauri::generate_context!();

    let app = Builder::default()
        .plugin(tauri_plugin_single_instance::init(on_second_instance))
        .plugin(
            tauri_plugin_log::Builder::new()
                .targets([
                    tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Stdout),
                    tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::LogDir {
                        file_name: None,
                    }),
                ])
                .rotation_strategy(tauri_plugin_log::RotationStrategy::KeepAll)
                .max_file_size(2_000_000)
                .timezone_strategy(tauri_plugin_log::TimezoneStrategy::UseLocal)
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_store::Builder::default().build())
        .plugin(tauri_plugin_dialog::init())
        .on_window_event(handle_window_event)
        .invoke_handler(tauri::generate_handler![
            commands::pick_audio_file,
            commands::generate_lrc_next_to_audio,
            commands::get_model_choice,
            commands::set_model_choice
        ])
        .build(context)
        .expect("error while running tauri application");

    app.run(handle_run_event);
}

/// macOS apps stay alive with no windows and come back on `Reopen`; elsewhere
/// closing the last window quits.
const HIDE_ON_CLOSE: bool = cfg!(target_os = "macos");

fn handle_window_event(window: &tauri::Window, event: &WindowEvent) {
    if !HIDE_ON_CLOSE {
        return;
    }
    if let WindowEvent::CloseRequested { api, .. } = event {
        if let Err(err) = window.hide() {
            log::warn!("Failed to hide window on close request: {err}");
        }
        api.prevent_close();
    }
}

#[cfg(target_os = "macos")]
fn handle_run_event(app_handle: &AppHandle, event: RunEvent) {
    if let RunEvent::Reopen {
        has_visible_windows,
        ..
    } = event
    {
        if !has_visible_windows {
            show_main_window(app_handle);
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn handle_run_event(_app_handle: &AppHandle, _event: RunEvent) {}

fn show_main_window(app: &AppHandle) {
    let Some(window) = app.get_webview_window("main") else {
        log::warn!("No main window to show");
        return;
    };
    if let Err(err) = window.show() {
        log::warn!("Failed to show main window: {err}");
    }
    if let Err(err) = window.set_focus() {
        log::warn!("Failed to focus main window: {err}");
    }
}

fn on_second_instance(app: &AppHandle, argv: Vec<String>, cwd: String) {
    log::info!("{}, {argv:?}, {cwd}", app.package_info().name);
    show_main_window(app);
}
