use lyric_time_ui::progress::*;
use serde_json::json;

fn lyric(value: serde_json::Value) -> ProgressFact {
    serde_json::from_value::<LyricProgressDto>(value)
        .expect("valid lyric payload")
        .into()
}

fn download(value: serde_json::Value) -> ProgressFact {
    serde_json::from_value::<DownloadProgressDto>(value)
        .expect("valid download payload")
        .into()
}

#[test]
fn stage_without_detail_shows_stage_name() {
    let fact = lyric(json!({ "kind": "stage", "stage": "Preparing", "detail": null }));
    assert_eq!(fact.status_line().as_deref(), Some("Preparing"));
    assert_eq!(fact.log_line(), None);

    let fact = lyric(json!({ "kind": "stage", "stage": "Writing" }));
    assert_eq!(fact.status_line().as_deref(), Some("Writing"));
}

#[test]
fn stage_with_detail_joins_both() {
    let fact = lyric(json!({
        "kind": "stage",
        "stage": "Transcribing",
        "detail": "Running whisper"
    }));
    assert_eq!(
        fact.status_line().as_deref(),
        Some("Transcribing: Running whisper")
    );
}

#[test]
fn log_line_is_kept_verbatim_and_leaves_status_alone() {
    let fact = lyric(json!({ "kind": "log", "line": "  whisper_init: loading  " }));
    assert_eq!(fact.status_line(), None);
    assert_eq!(fact.log_line().as_deref(), Some("  whisper_init: loading  "));
}

#[test]
fn done_event_uses_camel_case_output_path() {
    let fact = lyric(json!({ "kind": "done", "outputPath": "/music/song.lrc" }));
    assert_eq!(
        fact,
        ProgressFact::Finished {
            output_path: "/music/song.lrc".to_string()
        }
    );
    assert_eq!(fact.status_line().as_deref(), Some("Done"));
}

#[test]
fn unknown_kind_is_rejected() {
    let parsed = serde_json::from_value::<LyricProgressDto>(json!({ "kind": "bogus" }));
    assert!(parsed.is_err());
}

#[test]
fn downloading_with_known_total() {
    let fact = download(json!({
        "group": "models",
        "file": "ggml-small.bin",
        "downloaded_bytes": 1536,
        "total_bytes": 1048576,
        "status": "downloading",
        "error": null
    }));
    assert_eq!(
        fact.status_line().as_deref(),
        Some("Downloading ggml-small.bin: 1.5KB / 1.0MB")
    );
    assert_eq!(fact.log_line(), None);
}

#[test]
fn downloading_with_unknown_total_renders_question_mark() {
    let fact = download(json!({
        "group": "deps",
        "file": "ffmpeg",
        "downloaded_bytes": 10,
        "total_bytes": null,
        "status": "downloading",
        "error": null
    }));
    let status = fact.status_line().unwrap();
    assert_eq!(status, "Downloading ffmpeg: 10B / ?");
    assert!(status.contains("/ ?"));
}

#[test]
fn finished_download() {
    let fact = download(json!({
        "group": "models",
        "file": "ggml-medium.bin",
        "downloaded_bytes": 2048,
        "total_bytes": 2048,
        "status": "done",
        "error": null
    }));
    assert_eq!(
        fact.status_line().as_deref(),
        Some("Downloaded ggml-medium.bin")
    );
}

#[test]
fn failed_download_logs_error_or_fallback() {
    let fact = download(json!({
        "group": "models",
        "file": "ggml-small.bin",
        "downloaded_bytes": 0,
        "total_bytes": null,
        "status": "error",
        "error": "HTTP 404"
    }));
    assert_eq!(
        fact.status_line().as_deref(),
        Some("Error downloading ggml-small.bin")
    );
    assert_eq!(fact.log_line().as_deref(), Some("HTTP 404"));

    let fact = download(json!({
        "group": "models",
        "file": "ggml-small.bin",
        "downloaded_bytes": 0,
        "status": "error"
    }));
    assert_eq!(fact.log_line().as_deref(), Some(DOWNLOAD_ERROR_FALLBACK));
}
