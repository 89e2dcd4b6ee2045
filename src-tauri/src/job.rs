//! One end-to-end LRC generation run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AppError;
use crate::events::{ProgressEvent, ProgressSink};
use crate::lrc::clean_lrc;
use crate::models::{ModelChoice, ModelLocator, WhisperModel};
use crate::process::{run_ffmpeg_to_wav, run_whisper_lrc, Toolchain};

static IS_RUNNING: AtomicBool = AtomicBool::new(false);

/// Extensions whisper decodes without an ffmpeg conversion.
const DIRECT_EXTENSIONS: [&str; 4] = ["mp3", "wav", "flac", "ogg"];

/// Held for the duration of a run; at most one exists at a time.
#[derive(Debug)]
pub struct RunGuard(());

impl RunGuard {
    pub fn acquire() -> Result<Self, AppError> {
        if IS_RUNNING.swap(true, Ordering::SeqCst) {
            return Err(AppError::AlreadyRunning);
        }
        Ok(Self(()))
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        IS_RUNNING.store(false, Ordering::SeqCst);
    }
}

/// The `.lrc` file written next to the audio file.
pub fn lrc_path_for(audio_path: &Path) -> PathBuf {
    audio_path.with_extension("lrc")
}

pub fn needs_conversion(audio_path: &Path) -> bool {
    let ext = audio_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    !matches!(ext, Some(ext) if DIRECT_EXTENSIONS.contains(&ext.as_str()))
}

fn run_dir() -> Result<PathBuf, AppError> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let dir = std::env::temp_dir()
        .join("lyrictime")
        .join(format!("{millis}-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn model_detail(choice: ModelChoice, model: WhisperModel) -> String {
    match choice {
        ModelChoice::Hybrid => format!("Hybrid: using {} model", model.name()),
        _ => format!("Running whisper ({})", model.name()),
    }
}

/// Transcribes `audio_path` and writes the `.lrc` next to it, returning its
/// path. Progress is reported through `sink`; `done` is emitted right before
/// returning successfully.
pub fn generate_lrc(
    sink: &dyn ProgressSink,
    toolchain: &Toolchain,
    models: &ModelLocator,
    audio_path: &Path,
    choice: ModelChoice,
) -> Result<PathBuf, AppError> {
    let _guard = RunGuard::acquire()?;

    if !audio_path.is_file() {
        return Err(AppError::AudioNotFound(audio_path.to_path_buf()));
    }
    let out_path = lrc_path_for(audio_path);

    sink.progress(ProgressEvent::stage("Preparing", "Locating resources"));
    let tmp_dir = run_dir()?;
    let result = transcribe(sink, toolchain, models, audio_path, choice, &tmp_dir, &out_path);
    if let Err(err) = fs::remove_dir_all(&tmp_dir) {
        log::warn!("Failed to remove {}: {err}", tmp_dir.display());
    }
    result?;

    let output = out_path.display().to_string();
    log::info!("Wrote {output}");
    sink.progress(ProgressEvent::Done {
        output_path: output,
    });
    Ok(out_path)
}

fn transcribe(
    sink: &dyn ProgressSink,
    toolchain: &Toolchain,
    models: &ModelLocator,
    audio_path: &Path,
    choice: ModelChoice,
    tmp_dir: &Path,
    out_path: &Path,
) -> Result<(), AppError> {
    let whisper_input = if needs_conversion(audio_path) {
        let ffmpeg = toolchain
            .ffmpeg
            .as_deref()
            .ok_or_else(|| AppError::ExecutableNotFound("ffmpeg".to_string()))?;
        sink.progress(ProgressEvent::stage(
            "Converting",
            "Unsupported format → ffmpeg → 16k mono WAV",
        ));
        let wav_path = tmp_dir.join("input.wav");
        run_ffmpeg_to_wav(sink, ffmpeg, audio_path, &wav_path)?;
        wav_path
    } else {
        sink.progress(ProgressEvent::stage(
            "Preparing",
            "Input format supported by whisper (skipping ffmpeg)",
        ));
        audio_path.to_path_buf()
    };

    let model = models.pick(choice);
    let model_path = models.ensure(sink, model)?;

    sink.progress(ProgressEvent::stage("Transcribing", model_detail(choice, model)));
    let out_prefix = tmp_dir.join("out");
    run_whisper_lrc(sink, &toolchain.whisper, &model_path, &whisper_input, &out_prefix)?;

    let produced = out_prefix.with_extension("lrc");
    if !produced.is_file() {
        return Err(AppError::MissingOutput {
            tool: "whisper".to_string(),
            path: produced,
        });
    }

    sink.progress(ProgressEvent::stage("Writing", "Writing cleaned .lrc next to audio"));
    let raw = fs::read_to_string(&produced)?;
    fs::write(out_path, clean_lrc(&raw))?;
    Ok(())
}
