use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lyric_time_lib::download::write_streamed;

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

/// Yields `good` bytes once, then fails like a dropped connection.
struct BrokenStream {
    good: Cursor<Vec<u8>>,
}

impl Read for BrokenStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.good.read(buf)?;
        if read > 0 {
            return Ok(read);
        }
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
    }
}

#[test]
fn completed_stream_is_renamed_into_place() {
    let dir = temp_dir("download_ok");
    let dest = dir.join("ggml-small.bin");
    let mut progress = Vec::new();

    let mut body = Cursor::new(b"model-bytes".to_vec());
    let written = write_streamed(&mut body, &dest, Some(11), |downloaded, total| {
        progress.push((downloaded, total))
    })
    .expect("stream should be written");

    assert_eq!(written, 11);
    assert_eq!(std::fs::read(&dest).unwrap(), b"model-bytes");
    assert!(!dest.with_extension("part").exists());
    assert_eq!(progress.first(), Some(&(0, Some(11))));
}

#[test]
fn failed_stream_leaves_no_partial_file() {
    let dir = temp_dir("download_broken");
    let dest = dir.join("ggml-medium.bin");
    let mut stream = BrokenStream {
        good: Cursor::new(vec![7u8; 1024]),
    };

    let err = write_streamed(&mut stream, &dest, Some(4096), |_, _| {})
        .expect_err("a reset connection should fail the download");

    assert!(err.to_string().contains("connection reset"), "{err}");
    assert!(!dest.exists());
    assert!(!dest.with_extension("part").exists());
}

#[test]
fn stale_partial_file_is_replaced() {
    let dir = temp_dir("download_stale");
    let dest = dir.join("ggml-small.bin");
    std::fs::write(dest.with_extension("part"), b"left over from a crash").unwrap();

    write_streamed(&mut Cursor::new(b"fresh".to_vec()), &dest, None, |_, _| {}).unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"fresh");
    assert!(!dest.with_extension("part").exists());
}
