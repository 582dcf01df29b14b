//! Lyric data model and text processing
//!
//! This module provides:
//! - Data structures for timed lyrics (lines, words, tracks)
//! - Metadata stripping for provider text that embeds JSON credit lines
//! - Parsers for line-granularity (LRC) and word-granularity timed text
//! - Positional translation lookup

pub mod parser;
pub mod strip;
pub mod translate;

/// Open-ended sentinel for the last line's (or word's) end time.
///
/// Only ever compared against, never used in arithmetic.
pub const OPEN_END: u64 = u64::MAX;

/// Message shown when every resolution step came up empty.
pub const NOT_FOUND_TEXT: &str = "We can't find the lyrics :(";

/// Identity of the song lyrics are being resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongInfo {
    pub id: String,
    pub title: String,
    /// Primary artist name.
    pub artist: String,
    pub album: Option<String>,
    pub duration_ms: Option<u64>,
}

/// A single timed word within a lyric line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Start time in milliseconds from track start
    pub start_ms: u64,
    /// End time in milliseconds
    pub end_ms: u64,
    /// The word text
    pub text: String,
}

impl Word {
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }
}

/// A single line of lyrics with timestamps and its ordered words.
///
/// Line-granularity input produces one word spanning the whole line;
/// word-granularity input produces one word per timing token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub start_ms: u64,
    pub end_ms: u64,
    pub words: Vec<Word>,
}

impl LyricLine {
    /// Full line text, words joined in order.
    pub fn text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

/// One lyric variant (primary, word-synced, or translated) for one song.
///
/// Immutable once constructed; replaced wholesale on track change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricTrack {
    /// Lines in ascending start-time order
    pub lines: Vec<LyricLine>,
    /// Whether the lines carry real timing data. Plain-text fallbacks are
    /// unsynced: they render, but never drive the index mapper or karaoke.
    pub synced: bool,
}

impl LyricTrack {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Where a resolved lyric came from. Fallback-chain bookkeeping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricSource {
    /// Unified bundle keyed by song id (provider A)
    Bundle,
    /// Alternate primary source keyed by song id (provider B)
    Backup,
    /// Title/artist/duration-indexed external search
    Lrclib,
    /// Track is instrumental by design; no lyrics exist
    Instrumental,
    /// Every step exhausted; synthesized "not found" line
    Placeholder,
}

impl LyricSource {
    pub fn label(self) -> &'static str {
        match self {
            LyricSource::Bundle => "bundle",
            LyricSource::Backup => "backup",
            LyricSource::Lrclib => "lrclib",
            LyricSource::Instrumental => "instrumental",
            LyricSource::Placeholder => "placeholder",
        }
    }
}

/// The complete outcome of lyric resolution for one song.
///
/// Always a valid, renderable structure: the resolver never surfaces an
/// error past this type. `word_synced` and `translated` are optional
/// variants aligned with `primary` by line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLyrics {
    pub primary: LyricTrack,
    pub word_synced: Option<LyricTrack>,
    pub translated: Option<LyricTrack>,
    pub source: LyricSource,
}

impl ResolvedLyrics {
    pub fn new(
        primary: LyricTrack,
        word_synced: Option<LyricTrack>,
        translated: Option<LyricTrack>,
        source: LyricSource,
    ) -> Self {
        Self {
            primary,
            word_synced,
            translated,
            source,
        }
    }

    /// Single-line "not found" track shown when every step exhausted.
    pub fn placeholder() -> Self {
        let line = LyricLine {
            start_ms: 0,
            end_ms: OPEN_END,
            words: vec![Word::new(0, OPEN_END, NOT_FOUND_TEXT)],
        };
        Self {
            primary: LyricTrack {
                lines: vec![line],
                synced: true,
            },
            word_synced: None,
            translated: None,
            source: LyricSource::Placeholder,
        }
    }

    /// Valid empty result for a track with no lyrics by design.
    ///
    /// Distinct from "not found": it suppresses further fallback and the
    /// rendering layer shows its plain no-lyrics state.
    pub fn instrumental() -> Self {
        Self {
            primary: LyricTrack::default(),
            word_synced: None,
            translated: None,
            source: LyricSource::Instrumental,
        }
    }
}
