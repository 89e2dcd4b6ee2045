use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::AppError;
use crate::events::{DownloadProgressEvent, DownloadStatus, ProgressSink};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const EMIT_INTERVAL: Duration = Duration::from_millis(150);
const CHUNK_SIZE: usize = 64 * 1024;

/// Downloads `url` into `dest`, streaming throttled `download://progress`
/// events. Data lands in `<dest>.part` and is renamed on success. Any failure
/// is reported as an `error` event before it is returned.
pub fn download_with_progress(
    sink: &dyn ProgressSink,
    group: &str,
    url: &str,
    dest: &Path,
    display_name: &str,
) -> Result<(), AppError> {
    let progress = |downloaded_bytes: u64,
                    total_bytes: Option<u64>,
                    status: DownloadStatus,
                    error: Option<String>| DownloadProgressEvent {
        group: group.to_string(),
        file: display_name.to_string(),
        downloaded_bytes,
        total_bytes,
        status,
        error,
    };

    let result = fetch(url, dest, |downloaded, total| {
        sink.download(progress(downloaded, total, DownloadStatus::Downloading, None));
    });

    match result {
        Ok((downloaded, total)) => {
            sink.download(progress(downloaded, total, DownloadStatus::Done, None));
            log::info!("Downloaded {display_name} ({downloaded} bytes)");
            Ok(())
        }
        Err(err) => {
            log::error!("Download of {display_name} from {url} failed: {err}");
            sink.download(progress(0, None, DownloadStatus::Error, Some(err.to_string())));
            Err(err)
        }
    }
}

fn fetch(
    url: &str,
    dest: &Path,
    on_progress: impl FnMut(u64, Option<u64>),
) -> Result<(u64, Option<u64>), AppError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| AppError::Download(e.to_string()))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| AppError::Download(e.to_string()))?;
    if !response.status().is_success() {
        return Err(AppError::Download(format!("HTTP {}", response.status())));
    }

    let total = response.content_length();
    let downloaded = write_streamed(&mut response, dest, total, on_progress)?;
    Ok((downloaded, total))
}

/// Copies `reader` into `<dest>.part` and renames it to `dest` once the
/// stream ends. On failure the partial file is removed.
pub fn write_streamed(
    reader: &mut impl Read,
    dest: &Path,
    total: Option<u64>,
    mut on_progress: impl FnMut(u64, Option<u64>),
) -> Result<u64, AppError> {
    let tmp = dest.with_extension("part");
    let _ = fs::remove_file(&tmp);

    let result = copy_to_part(reader, &tmp, total, &mut on_progress);
    let result = result.and_then(|downloaded| {
        fs::rename(&tmp, dest)?;
        Ok(downloaded)
    });
    if result.is_err() {
        if let Err(err) = fs::remove_file(&tmp) {
            if err.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to remove {}: {err}", tmp.display());
            }
        }
    }
    result
}

fn copy_to_part(
    reader: &mut impl Read,
    tmp: &Path,
    total: Option<u64>,
    on_progress: &mut impl FnMut(u64, Option<u64>),
) -> Result<u64, AppError> {
    let mut file = fs::File::create(tmp)?;
    on_progress(0, total);

    let mut downloaded: u64 = 0;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut last_emit = Instant::now();
    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        file.write_all(&buf[..read])?;
        downloaded += read as u64;

        if last_emit.elapsed() >= EMIT_INTERVAL {
            on_progress(downloaded, total);
            last_emit = Instant::now();
        }
    }
    file.flush()?;

    // The file is closed here, before the caller renames it (Windows).
    Ok(downloaded)
}
