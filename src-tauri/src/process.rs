//! Locating and running the external ffmpeg and whisper executables.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tauri::{AppHandle, Manager};

use crate::error::AppError;
use crate::events::{ProgressEvent, ProgressSink};

pub fn platform_dir() -> Result<&'static str, AppError> {
    if cfg!(target_os = "macos") {
        Ok("macos")
    } else if cfg!(target_os = "windows") {
        Ok("windows")
    } else if cfg!(target_os = "linux") {
        Ok("linux")
    } else {
        Err(AppError::UnsupportedPlatform)
    }
}

pub fn exe_name(base: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{base}.exe")
    } else {
        base.to_string()
    }
}

/// First existing `<dir>/<base>[.exe]` in search order.
pub fn pick_executable(dirs: &[PathBuf], base: &str) -> Result<PathBuf, AppError> {
    let file_name = exe_name(base);
    dirs.iter()
        .map(|dir| dir.join(&file_name))
        .find(|path| path.is_file())
        .ok_or_else(|| AppError::ExecutableNotFound(base.to_string()))
}

#[derive(Clone, Debug)]
pub struct Toolchain {
    pub whisper: PathBuf,
    /// Only needed for inputs whisper cannot read directly.
    pub ffmpeg: Option<PathBuf>,
}

impl Toolchain {
    pub fn locate(dirs: &[PathBuf]) -> Result<Self, AppError> {
        Ok(Self {
            whisper: pick_executable(dirs, "whisper")?,
            ffmpeg: pick_executable(dirs, "ffmpeg").ok(),
        })
    }

    /// Downloaded binaries in app data first, then bundled resources, then
    /// the development tree.
    pub fn for_app(app: &AppHandle) -> Result<Self, AppError> {
        let platform = platform_dir()?;
        let mut dirs = Vec::new();

        if let Ok(app_data) = app.path().app_data_dir() {
            dirs.push(app_data.join("bin"));
        }
        if let Ok(resources) = app.path().resource_dir() {
            dirs.push(resources.join("resources").join("bin").join(platform));
            dirs.push(resources.join("bin").join(platform));
        }
        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd.join("resources").join("bin").join(platform));
            dirs.push(cwd.join("src-tauri").join("resources").join("bin").join(platform));
        }

        Self::locate(&dirs)
    }
}

/// Runs `cmd` to completion, forwarding each stderr line as a `log` event.
pub fn spawn_and_stream(sink: &dyn ProgressSink, mut cmd: Command, label: &str) -> Result<(), AppError> {
    sink.progress(ProgressEvent::log(format!("Running {label}…")));
    log::info!("Running {label}: {cmd:?}");

    let mut child = cmd.stdout(Stdio::null()).stderr(Stdio::piped()).spawn()?;

    if let Some(stderr) = child.stderr.take() {
        for line in BufReader::new(stderr).lines().map_while(Result::ok) {
            sink.progress(ProgressEvent::log(line));
        }
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(AppError::ProcessFailed {
            label: label.to_string(),
            status: status.to_string(),
        });
    }

    Ok(())
}

/// Converts `input` to 16 kHz mono WAV.
pub fn run_ffmpeg_to_wav(
    sink: &dyn ProgressSink,
    ffmpeg: &Path,
    input: &Path,
    output_wav: &Path,
) -> Result<(), AppError> {
    let mut cmd = Command::new(ffmpeg);
    cmd.arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-ac", "1", "-ar", "16000"])
        .arg(output_wav);

    spawn_and_stream(sink, cmd, "ffmpeg")
}

/// Runs whisper with LRC output; the file is written to `<out_prefix>.lrc`.
pub fn run_whisper_lrc(
    sink: &dyn ProgressSink,
    whisper: &Path,
    model: &Path,
    input_audio: &Path,
    out_prefix: &Path,
) -> Result<(), AppError> {
    let mut cmd = Command::new(whisper);
    cmd.arg("-m")
        .arg(model)
        .arg("-olrc")
        .arg("-of")
        .arg(out_prefix)
        .arg(input_audio);

    spawn_and_stream(sink, cmd, "whisper")
}
