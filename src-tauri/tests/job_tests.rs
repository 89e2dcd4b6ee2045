use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lyric_time_lib::error::AppError;
use lyric_time_lib::events::{DownloadProgressEvent, ProgressEvent, ProgressSink};
use lyric_time_lib::job::{generate_lrc, lrc_path_for, needs_conversion, RunGuard};
use lyric_time_lib::models::{ModelChoice, ModelLocator};
use lyric_time_lib::process::{exe_name, pick_executable, Toolchain};

#[derive(Default)]
struct RecordingSink {
    progress: Mutex<Vec<ProgressEvent>>,
    downloads: Mutex<Vec<DownloadProgressEvent>>,
}

impl ProgressSink for RecordingSink {
    fn progress(&self, event: ProgressEvent) {
        self.progress.lock().unwrap().push(event);
    }

    fn download(&self, event: DownloadProgressEvent) {
        self.downloads.lock().unwrap().push(event);
    }
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{name}_{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

#[test]
fn lrc_is_written_next_to_audio() {
    assert_eq!(
        lrc_path_for(Path::new("/music/album/track 01.flac")),
        PathBuf::from("/music/album/track 01.lrc")
    );
    assert_eq!(
        lrc_path_for(Path::new("/music/noext")),
        PathBuf::from("/music/noext.lrc")
    );
}

#[test]
fn only_unsupported_formats_need_conversion() {
    for direct in ["a.mp3", "a.WAV", "a.flac", "a.ogg"] {
        assert!(!needs_conversion(Path::new(direct)), "{direct}");
    }
    for converted in ["a.m4a", "a.aac", "a.opus", "a.aiff", "a.aif", "a"] {
        assert!(needs_conversion(Path::new(converted)), "{converted}");
    }
}

#[test]
fn executables_are_picked_in_search_order() {
    let first = temp_dir("exe_first");
    let second = temp_dir("exe_second");
    std::fs::write(second.join(exe_name("whisper")), b"").unwrap();

    let dirs = vec![first.clone(), second.clone()];
    assert_eq!(
        pick_executable(&dirs, "whisper").unwrap(),
        second.join(exe_name("whisper"))
    );
    assert!(matches!(
        pick_executable(&dirs, "ffmpeg"),
        Err(AppError::ExecutableNotFound(name)) if name == "ffmpeg"
    ));

    let toolchain = Toolchain::locate(&dirs).unwrap();
    assert!(toolchain.ffmpeg.is_none());

    let _ = std::fs::remove_dir_all(&first);
    let _ = std::fs::remove_dir_all(&second);
}

// The run guard is process-wide, so every assertion touching it lives here.
#[test]
fn single_flight_guard_and_validation() {
    let dir = temp_dir("job_guard");
    let sink = RecordingSink::default();
    let toolchain = Toolchain {
        whisper: dir.join("whisper"),
        ffmpeg: None,
    };
    let models = ModelLocator::new(vec![dir.clone()], dir.clone());
    let missing = dir.join("missing.mp3");

    let guard = RunGuard::acquire().expect("guard should be free");
    assert!(matches!(RunGuard::acquire(), Err(AppError::AlreadyRunning)));
    let result = generate_lrc(&sink, &toolchain, &models, &missing, ModelChoice::Small);
    assert!(matches!(result, Err(AppError::AlreadyRunning)));
    drop(guard);

    let result = generate_lrc(&sink, &toolchain, &models, &missing, ModelChoice::Small);
    assert!(matches!(result, Err(AppError::AudioNotFound(path)) if path == missing));
    assert!(sink.progress.lock().unwrap().is_empty());

    // Released on the error path too.
    drop(RunGuard::acquire().expect("guard released after failure"));

    let audio = dir.join("song.m4a");
    std::fs::write(&audio, b"not really audio").unwrap();
    let result = generate_lrc(&sink, &toolchain, &models, &audio, ModelChoice::Small);
    assert!(matches!(result, Err(AppError::ExecutableNotFound(name)) if name == "ffmpeg"));
    assert!(!lrc_path_for(&audio).exists());
    assert!(sink.downloads.lock().unwrap().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn errors_serialize_as_their_message() {
    let err = AppError::AudioNotFound(PathBuf::from("/music/a.mp3"));
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!("Audio file does not exist: /music/a.mp3")
    );
}
