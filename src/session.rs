//! Per-playback lyric session
//!
//! Owns the lyric state for the currently selected song and enforces the
//! concurrency rules: resolution runs on tokio, results are tagged with the
//! song id they were started for, and a result whose id no longer matches
//! the current song is silently discarded. The playback clock is fed in by
//! the embedding player (single writer); this module and the karaoke
//! helpers are its readers.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::config::Config;
use crate::lyrics::{translate, LyricLine, ResolvedLyrics, SongInfo};
use crate::resolver::Resolver;
use crate::sync::karaoke::{line_word_states, WordState};
use crate::sync::{line_index_at, SyncState};

/// Lyric state for one playback session.
///
/// Cheap to clone handles are not needed; the session itself is shared
/// behind `Arc` internals and all methods take `&self`.
pub struct LyricSession {
    resolver: Arc<Resolver>,
    inner: Arc<Mutex<Inner>>,
}

/// One line's karaoke snapshot: the line itself plus per-word states.
///
/// Carries the line by value rather than an index: the word-synced track's
/// segmentation may differ from the primary's, so an index into one track
/// must never be looked up in the other.
#[derive(Debug, Clone, PartialEq)]
pub struct KaraokeLine {
    pub line: LyricLine,
    pub states: Vec<WordState>,
}

#[derive(Default)]
struct Inner {
    current_id: Option<String>,
    lyrics: Option<ResolvedLyrics>,
    sync: SyncState,
}

impl LyricSession {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            resolver,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Session wired from a loaded [`Config`].
    pub fn from_config(resolver: Arc<Resolver>, cfg: &Config) -> Self {
        Self::with_tick_granularity(resolver, cfg.sync.tick_granularity_ms)
    }

    /// Session with a non-default tick coalescing threshold.
    pub fn with_tick_granularity(resolver: Arc<Resolver>, granularity_ms: u64) -> Self {
        let inner = Inner {
            sync: SyncState::with_granularity(granularity_ms),
            ..Inner::default()
        };
        Self {
            resolver,
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Switch to a new song.
    ///
    /// Discards the previous song's lyric structures immediately and spawns
    /// resolution for the new one. Calling again with the current song id is
    /// a no-op, so rapid duplicate track-change events are harmless.
    pub fn set_track(&self, song: SongInfo) {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.current_id.as_deref() == Some(song.id.as_str()) {
                return;
            }
            inner.current_id = Some(song.id.clone());
            inner.lyrics = None;
            inner.sync.reset();
        }

        let resolver = self.resolver.clone();
        let inner = self.inner.clone();
        tokio::spawn(async move {
            let resolved = resolver.resolve(&song).await;
            commit(&inner, &song.id, resolved);
        });
    }

    /// Apply a playback tick against the primary track.
    ///
    /// Returns `Some(new_active_index)` only when the committed line
    /// changes. Sub-granularity ticks are coalesced.
    pub fn tick(&self, t_ms: u64) -> Option<Option<usize>> {
        let mut inner = self.inner.lock().unwrap();
        let Inner { lyrics, sync, .. } = &mut *inner;
        let lines = lyrics
            .as_ref()
            .filter(|l| l.primary.synced)
            .map(|l| l.primary.lines.as_slice())?;
        sync.tick(lines, t_ms)
    }

    /// Apply a seek: the mapper re-runs immediately, bypassing coalescing.
    pub fn seek(&self, t_ms: u64) -> Option<Option<usize>> {
        let mut inner = self.inner.lock().unwrap();
        let Inner { lyrics, sync, .. } = &mut *inner;
        let lines = lyrics
            .as_ref()
            .filter(|l| l.primary.synced)
            .map(|l| l.primary.lines.as_slice())?;
        sync.seek(lines, t_ms)
    }

    /// The committed active line index, `None` before the first line.
    pub fn active_line(&self) -> Option<usize> {
        self.inner.lock().unwrap().sync.active_line()
    }

    /// Snapshot of the resolved lyrics, if resolution has completed.
    pub fn lyrics(&self) -> Option<ResolvedLyrics> {
        self.inner.lock().unwrap().lyrics.clone()
    }

    /// The line active at `t_ms` with its per-word karaoke states.
    ///
    /// Computed against the word-synced track when one exists, else the
    /// primary; `None` for unsynced tracks. Independent of the committed
    /// index and the coalescing guard: callers may poll this at animation
    /// frequency for the one active line without disturbing the rest of
    /// the view.
    pub fn karaoke_line(&self, t_ms: u64) -> Option<KaraokeLine> {
        let inner = self.inner.lock().unwrap();
        let lyrics = inner.lyrics.as_ref()?;
        let track = lyrics.word_synced.as_ref().unwrap_or(&lyrics.primary);
        if !track.synced {
            return None;
        }
        let index = line_index_at(&track.lines, t_ms)?;
        let line = track.lines[index].clone();
        let states = line_word_states(&line, t_ms);
        Some(KaraokeLine { line, states })
    }

    /// Translated text for the line at `index`, if a translation exists.
    pub fn translation_for(&self, index: usize) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        let lyrics = inner.lyrics.as_ref()?;
        translate::translation_at(lyrics.translated.as_ref(), index)
    }
}

/// Commit a resolution result iff the session is still on the song it was
/// started for. Stale results are dropped, not errors.
fn commit(inner: &Mutex<Inner>, song_id: &str, resolved: ResolvedLyrics) {
    let mut inner = inner.lock().unwrap();
    if inner.current_id.as_deref() == Some(song_id) {
        inner.lyrics = Some(resolved);
    } else {
        debug!("discarding stale lyric result for song {song_id}");
    }
}
