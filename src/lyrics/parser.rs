//! Timed-text parsers
//!
//! Two wire formats are understood:
//!
//! Line granularity (LRC):
//! [00:12.34] Hello world
//! [00:15.00] Another line
//!
//! Word granularity (one line header, then one token per word):
//! [12340,2660](12340,800,0)Hello (13140,1860,0)world
//!
//! A line that fails to match either grammar is dropped from the output,
//! never fatal to the whole parse.

use super::{LyricLine, LyricTrack, Word, OPEN_END};

/// Parse line-granularity LRC text into a track.
///
/// Each entry becomes one line with a single word spanning the whole line.
/// A line's end time is the next line's start time; the last line is
/// open-ended.
pub fn parse_lrc(content: &str) -> LyricTrack {
    let mut entries: Vec<(u64, String)> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Skip id tags like [ti:Title]
        if is_id_tag(line) {
            continue;
        }

        // A line may stack several timestamps: [00:12.34][01:02.00]text
        if let Some((timestamps, text)) = parse_timed_entry(line) {
            for ts in timestamps {
                entries.push((ts, text.clone()));
            }
        }
    }

    entries.sort_by_key(|(ts, _)| *ts);

    let lines = entries
        .iter()
        .enumerate()
        .map(|(i, (start, text))| {
            let end = entries
                .get(i + 1)
                .map(|(next, _)| *next)
                .unwrap_or(OPEN_END);
            LyricLine {
                start_ms: *start,
                end_ms: end,
                words: vec![Word::new(*start, end, text.clone())],
            }
        })
        .collect();

    LyricTrack {
        lines,
        synced: true,
    }
}

/// Parse plain (unsynchronized) text into a degraded track.
///
/// Every non-empty line becomes a line at time zero whose single word
/// carries the `0/0` no-timing sentinel, so the track renders in full but
/// never drives the index mapper or karaoke reveal. Leftover `[..]` tag
/// lines are skipped.
pub fn parse_plain(content: &str) -> LyricTrack {
    let lines = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .map(|text| LyricLine {
            start_ms: 0,
            end_ms: OPEN_END,
            words: vec![Word::new(0, 0, text)],
        })
        .collect();

    LyricTrack {
        lines,
        synced: false,
    }
}

/// Parse word-granularity text into a track.
///
/// Each input line is `[start,duration]` followed by `(start,duration,idx)text`
/// tokens. The line's own span is its first word's start to its last word's
/// end; header-only lines are dropped.
pub fn parse_word_synced(content: &str) -> LyricTrack {
    let mut lines: Vec<LyricLine> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(parsed) = parse_word_line(line) {
            lines.push(parsed);
        }
    }

    lines.sort_by_key(|l| l.start_ms);
    LyricTrack {
        lines,
        synced: true,
    }
}

/// Parse one word-granularity line, or `None` if it doesn't match.
fn parse_word_line(line: &str) -> Option<LyricLine> {
    // Header: [start,duration]
    let rest = line.strip_prefix('[')?;
    let header_end = rest.find(']')?;
    let header = &rest[..header_end];
    let (h_start, h_dur) = header.split_once(',')?;
    h_start.trim().parse::<u64>().ok()?;
    h_dur.trim().parse::<u64>().ok()?;

    let mut rest = &rest[header_end + 1..];
    let mut words: Vec<Word> = Vec::new();

    while let Some(open) = rest.find('(') {
        let close = rest[open..].find(')')? + open;
        let mut fields = rest[open + 1..close].split(',');
        let start: u64 = fields.next()?.trim().parse().ok()?;
        let duration: u64 = fields.next()?.trim().parse().ok()?;
        // Third field is an index we don't use; require it for the grammar.
        fields.next()?;

        let after = &rest[close + 1..];
        let text_end = after.find('(').unwrap_or(after.len());
        let text = &after[..text_end];

        words.push(Word::new(start, start.saturating_add(duration), text));
        rest = after;
    }

    if words.is_empty() {
        return None;
    }

    let start_ms = words.first().map(|w| w.start_ms)?;
    let end_ms = words.last().map(|w| w.end_ms)?;
    Some(LyricLine {
        start_ms,
        end_ms,
        words,
    })
}

/// Check for an id tag like [ti:Title] (tag of 2-3 ascii letters).
fn is_id_tag(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('[') else {
        return false;
    };
    let Some(end) = rest.find(']') else {
        return false;
    };
    let Some(colon) = rest[..end].find(':') else {
        return false;
    };
    let tag = &rest[..colon];
    (2..=3).contains(&tag.len()) && tag.chars().all(|c| c.is_ascii_alphabetic())
}

/// Extract stacked leading timestamps and the trailing text.
fn parse_timed_entry(line: &str) -> Option<(Vec<u64>, String)> {
    let mut timestamps = Vec::new();
    let mut pos = 0;

    while line[pos..].starts_with('[') {
        let Some(end) = line[pos..].find(']') else {
            break;
        };
        match parse_timestamp(&line[pos + 1..pos + end]) {
            Some(ms) => {
                timestamps.push(ms);
                pos += end + 1;
            }
            None => break,
        }
    }

    if timestamps.is_empty() {
        return None;
    }

    Some((timestamps, line[pos..].trim().to_string()))
}

/// Parse "mm:ss", "mm:ss.xx", "mm:ss.xxx" or "mm:ss:xx" to milliseconds.
fn parse_timestamp(s: &str) -> Option<u64> {
    let parts: Vec<&str> = s.split([':', '.']).collect();

    match parts.len() {
        2 => {
            let min: u64 = parts[0].parse().ok()?;
            let sec: u64 = parts[1].parse().ok()?;
            Some(min * 60_000 + sec * 1000)
        }
        3 => {
            let min: u64 = parts[0].parse().ok()?;
            let sec: u64 = parts[1].parse().ok()?;
            let frac = parts[2];
            // "3" = tenths, "34" = centiseconds, "340" = milliseconds
            let ms: u64 = match frac.len() {
                1 => frac.parse::<u64>().ok()? * 100,
                2 => frac.parse::<u64>().ok()? * 10,
                3 => frac.parse().ok()?,
                _ => return None,
            };
            Some(min * 60_000 + sec * 1000 + ms)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("00:12"), Some(12000));
        assert_eq!(parse_timestamp("01:30"), Some(90000));
        assert_eq!(parse_timestamp("00:12.34"), Some(12340));
        assert_eq!(parse_timestamp("00:12.340"), Some(12340));
        assert_eq!(parse_timestamp("00:12:34"), Some(12340));
        assert_eq!(parse_timestamp("bogus"), None);
    }

    #[test]
    fn lrc_infers_end_times() {
        let track = parse_lrc("[00:01.00]Hello\n[00:05.50]World");
        assert!(track.synced);
        assert_eq!(track.lines.len(), 2);
        assert_eq!(track.lines[0].start_ms, 1000);
        assert_eq!(track.lines[0].end_ms, 5500);
        assert_eq!(track.lines[0].text(), "Hello");
        assert_eq!(track.lines[1].start_ms, 5500);
        assert_eq!(track.lines[1].end_ms, OPEN_END);
        assert_eq!(track.lines[1].text(), "World");
    }

    #[test]
    fn lrc_skips_id_tags_and_malformed_lines() {
        let lrc = "[ti:Test Song]\n[ar:Test Artist]\n[00:12.34]First line\nnot a lyric\n[00:15.00]Second line";
        let track = parse_lrc(lrc);
        assert_eq!(track.lines.len(), 2);
        assert_eq!(track.lines[0].text(), "First line");
    }

    #[test]
    fn lrc_expands_stacked_timestamps_in_order() {
        let track = parse_lrc("[00:10.00][00:02.00]Chorus\n[00:05.00]Verse");
        let starts: Vec<u64> = track.lines.iter().map(|l| l.start_ms).collect();
        assert_eq!(starts, vec![2000, 5000, 10000]);
        // Sorted ascending, ends chained
        assert!(track.lines.windows(2).all(|w| w[0].start_ms <= w[1].start_ms));
        assert_eq!(track.lines[0].end_ms, 5000);
    }

    #[test]
    fn word_synced_line_spans_its_words() {
        let track = parse_word_synced("[12340,2660](12340,800,0)Hello (13140,1860,0)world");
        assert_eq!(track.lines.len(), 1);
        let line = &track.lines[0];
        assert_eq!(line.start_ms, 12340);
        assert_eq!(line.end_ms, 15000);
        assert_eq!(line.words.len(), 2);
        assert_eq!(line.words[0].text, "Hello ");
        assert_eq!(line.words[0].end_ms, 13140);
        assert_eq!(line.words[1].text, "world");
    }

    #[test]
    fn word_synced_drops_broken_lines() {
        let input = "[100,200](100,50,0)ok\n[not a header]\n[300,100]header only\n(500,10,0)no header";
        let track = parse_word_synced(input);
        assert_eq!(track.lines.len(), 1);
        assert_eq!(track.lines[0].text(), "ok");
    }

    #[test]
    fn plain_text_parses_to_unsynced_track() {
        let plain = "Hello darkness my old friend\n\n[leftover tag]\nI've come to talk with you again";
        let track = parse_plain(plain);
        assert!(!track.synced);
        assert_eq!(track.lines.len(), 2);
        assert_eq!(track.lines[0].text(), "Hello darkness my old friend");
        // No timing data: the sentinel keeps karaoke from revealing anything.
        assert_eq!(track.lines[0].words[0].start_ms, 0);
        assert_eq!(track.lines[0].words[0].end_ms, 0);
        assert_eq!(track.lines[1].text(), "I've come to talk with you again");
    }

    #[test]
    fn word_synced_word_times_are_non_decreasing() {
        let input = "[0,1000](0,200,0)a(200,300,0)b(500,500,0)c\n[2000,500](2000,500,0)d";
        let track = parse_word_synced(input);
        for line in &track.lines {
            assert!(line
                .words
                .windows(2)
                .all(|w| w[0].start_ms <= w[1].start_ms));
            assert!(line.words.iter().all(|w| w.start_ms <= w.end_ms));
        }
        assert!(track.lines.windows(2).all(|w| w[0].start_ms <= w[1].start_ms));
    }
}
