//! Metadata stripping
//!
//! Some providers embed credit lines in timed lyric text as serialized JSON
//! objects, e.g. `{"t":0,"c":[{"tx":"Lyricist: "},{"tx":"..."}]}`, either
//! bare or behind a `[mm:ss.xx]` tag. These are not lyrics and must be
//! removed before parsing.

use serde_json::Value;

/// The field that marks an embedded credit object.
const MARKER_KEY: &str = "c";

/// Remove embedded metadata lines from raw time-tagged text.
///
/// A line is dropped iff its content after any leading `[..]` tags parses
/// as a JSON object carrying the marker key. Everything else is kept
/// verbatim, including other JSON shapes and plain text, so stripping is
/// idempotent and order-preserving.
pub fn strip_metadata(raw: &str) -> String {
    raw.lines()
        .filter(|line| !is_metadata_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_metadata_line(line: &str) -> bool {
    let content = skip_leading_tags(line).trim();
    if !content.starts_with('{') {
        return false;
    }
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => map.contains_key(MARKER_KEY),
        // Parsed to something other than an object, or didn't parse at
        // all: literal lyric text as far as we're concerned.
        _ => false,
    }
}

/// Skip leading `[..]` tag groups (timestamps or id tags) and return the rest.
fn skip_leading_tags(line: &str) -> &str {
    let mut rest = line.trim_start();
    while rest.starts_with('[') {
        match rest.find(']') {
            Some(end) => rest = rest[end + 1..].trim_start(),
            None => break,
        }
    }
    rest
}
