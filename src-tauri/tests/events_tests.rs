use lyric_time_lib::events::*;
use serde_json::json;

#[test]
fn stage_event_wire_shape() {
    let event = ProgressEvent::stage("Transcribing", "Running whisper (small)");
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({ "kind": "stage", "stage": "Transcribing", "detail": "Running whisper (small)" })
    );
}

#[test]
fn log_event_wire_shape() {
    assert_eq!(
        serde_json::to_value(ProgressEvent::log("whisper_init")).unwrap(),
        json!({ "kind": "log", "line": "whisper_init" })
    );
}

#[test]
fn done_event_uses_output_path_key() {
    let event = ProgressEvent::Done {
        output_path: "/music/song.lrc".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({ "kind": "done", "outputPath": "/music/song.lrc" })
    );
}

#[test]
fn download_event_wire_shape() {
    let event = DownloadProgressEvent {
        group: "models".to_string(),
        file: "ggml-small.bin".to_string(),
        downloaded_bytes: 42,
        total_bytes: None,
        status: DownloadStatus::Downloading,
        error: None,
    };
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({
            "group": "models",
            "file": "ggml-small.bin",
            "downloaded_bytes": 42,
            "total_bytes": null,
            "status": "downloading",
            "error": null
        })
    );
}

#[test]
fn channel_names() {
    assert_eq!(LYRIC_PROGRESS_EVENT, "lyric_progress");
    assert_eq!(DOWNLOAD_PROGRESS_EVENT, "download://progress");
}
