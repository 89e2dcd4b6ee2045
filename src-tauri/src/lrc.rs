//! Tidying of the LRC text whisper writes.

const MUSIC_NOTE: char = '♪';

/// `[by:whisper.cpp]`, `[ar:...]` and similar header tags.
fn is_metadata_tag(line: &str) -> bool {
    let Some(inside) = line
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .map(|(inside, _)| inside)
    else {
        return false;
    };
    inside.contains(':') && inside.chars().next().is_some_and(|c| !c.is_ascii_digit())
}

fn collapse_spaces(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out
}

/// Drops header tags, music notes, cue lines like `(upbeat music)` and empty
/// timestamps; every kept timed line becomes `[ts] text`.
pub fn clean_lrc(input: &str) -> String {
    let mut out = String::new();

    for line in input.lines().map(str::trim) {
        if line.is_empty() || is_metadata_tag(line) {
            continue;
        }

        if let Some(end) = line.strip_prefix('[').and_then(|_| line.find(']')) {
            let (timestamp, rest) = line.split_at(end + 1);
            let text = rest.replace(MUSIC_NOTE, "");
            let text = text.trim();
            if text.is_empty() || (text.starts_with('(') && text.ends_with(')')) {
                continue;
            }

            out.push_str(timestamp);
            out.push(' ');
            out.push_str(&collapse_spaces(text));
            out.push('\n');
            continue;
        }

        let text = line.replace(MUSIC_NOTE, "");
        let text = text.trim();
        if !text.is_empty() {
            out.push_str(text);
            out.push('\n');
        }
    }

    out
}
