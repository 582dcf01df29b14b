//! Lyric source resolver
//!
//! Walks the provider chain in priority order and always terminates with a
//! renderable result: a found lyric, a valid-empty instrumental result, or
//! the single-line placeholder. Network and parse failures at any step are
//! logged and advance the chain; nothing propagates past this module.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use tracing::{debug, warn};

use crate::config::Config;
use crate::lyrics::parser::{parse_lrc, parse_plain, parse_word_synced};
use crate::lyrics::strip::strip_metadata;
use crate::lyrics::{LyricSource, LyricTrack, ResolvedLyrics, SongInfo};
use crate::providers::backup::BackupClient;
use crate::providers::bundle::BundleClient;
use crate::providers::lrclib::{LrclibClient, LrclibResponse};

/// Resolves lyrics for songs, fronted by an LRU cache keyed by song id.
///
/// Resolved lyrics for a given id are stable, so eviction is purely
/// capacity-based; there is no TTL.
pub struct Resolver {
    bundle: BundleClient,
    backup: BackupClient,
    lrclib: LrclibClient,
    cache: Mutex<LruCache<String, ResolvedLyrics>>,
}

impl Resolver {
    pub fn new(cfg: &Config) -> Self {
        Self::with_clients(
            BundleClient::new(&cfg.providers.bundle_url),
            BackupClient::new(&cfg.providers.backup_url),
            LrclibClient::new(&cfg.providers.lrclib_url),
            cfg.cache.capacity,
        )
    }

    pub fn with_clients(
        bundle: BundleClient,
        backup: BackupClient,
        lrclib: LrclibClient,
        cache_capacity: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            bundle,
            backup,
            lrclib,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Resolve lyrics for a song. Infallible: the worst outcome is the
    /// placeholder track.
    pub async fn resolve(&self, song: &SongInfo) -> ResolvedLyrics {
        if let Some(hit) = self.cache.lock().unwrap().get(&song.id).cloned() {
            debug!("lyric cache hit for song {}", song.id);
            return hit;
        }

        let resolved = self.resolve_uncached(song).await;
        debug!(
            "resolved lyrics for song {}: source={}, {} lines",
            song.id,
            resolved.source.label(),
            resolved.primary.lines.len()
        );

        // A placeholder may only mean the providers were unreachable, so
        // never cache it; the next request gets a fresh walk of the chain.
        if resolved.source != LyricSource::Placeholder {
            self.cache
                .lock()
                .unwrap()
                .put(song.id.clone(), resolved.clone());
        }
        resolved
    }

    async fn resolve_uncached(&self, song: &SongInfo) -> ResolvedLyrics {
        let mut word_synced: Option<LyricTrack> = None;
        let mut translated: Option<LyricTrack> = None;

        // Step 1: unified bundle. Variants are validated independently, so
        // word-synced and translated tracks survive a junk primary.
        match self.bundle.fetch(&song.id).await {
            Ok(Some(bundle)) => {
                word_synced = bundle.word_synced.as_deref().and_then(clean_word_synced);
                translated = bundle.translated.as_deref().and_then(clean_lrc);
                if let Some(primary) = bundle.primary.as_deref().and_then(clean_lrc) {
                    return ResolvedLyrics::new(
                        primary,
                        word_synced,
                        translated,
                        LyricSource::Bundle,
                    );
                }
                debug!("bundle for song {} had no valid primary lyric", song.id);
            }
            Ok(None) => debug!("no lyric bundle for song {}", song.id),
            Err(e) => warn!("lyric bundle fetch failed for song {}: {e:#}", song.id),
        }

        // Step 2: alternate primary source, same id.
        match self.backup.fetch(&song.id).await {
            Ok(Some(raw)) => {
                if let Some(primary) = clean_lrc(&raw) {
                    return ResolvedLyrics::new(
                        primary,
                        word_synced,
                        translated,
                        LyricSource::Backup,
                    );
                }
                debug!("backup lyric for song {} failed validity", song.id);
            }
            Ok(None) => debug!("no backup lyric for song {}", song.id),
            Err(e) => warn!("backup lyric fetch failed for song {}: {e:#}", song.id),
        }

        // Step 3: external search by track metadata.
        match self.search_external(song).await {
            Ok(Some(SearchOutcome::Found(primary))) => {
                return ResolvedLyrics::new(primary, word_synced, translated, LyricSource::Lrclib);
            }
            Ok(Some(SearchOutcome::Instrumental)) => {
                // Terminal: no lyrics exist by design, stop falling back.
                return ResolvedLyrics::instrumental();
            }
            Ok(None) => debug!("external search found nothing for song {}", song.id),
            Err(e) => warn!("external search failed for song {}: {e:#}", song.id),
        }

        // A valid word-synced track with no primary anywhere still beats the
        // placeholder: its lines carry full text.
        if let Some(word) = word_synced {
            return ResolvedLyrics::new(word.clone(), Some(word), translated, LyricSource::Bundle);
        }

        ResolvedLyrics::placeholder()
    }

    async fn search_external(&self, song: &SongInfo) -> anyhow::Result<Option<SearchOutcome>> {
        let duration_secs = song.duration_ms.map(|ms| ms / 1000);

        // Exact lookup first; failure here only means we fall through to
        // the fuzzy search.
        match self
            .lrclib
            .get_exact(
                &song.title,
                &song.artist,
                song.album.as_deref(),
                duration_secs,
            )
            .await
        {
            Ok(Some(hit)) => {
                if let Some(outcome) = outcome_from(&hit) {
                    return Ok(Some(outcome));
                }
            }
            Ok(None) => {}
            Err(e) => debug!("lrclib exact lookup failed: {e:#}"),
        }

        let results = self.lrclib.search(&song.title, &song.artist).await?;
        Ok(closest_by_duration(&results, song.duration_ms).and_then(outcome_from))
    }
}

enum SearchOutcome {
    Found(LyricTrack),
    Instrumental,
}

fn outcome_from(hit: &LrclibResponse) -> Option<SearchOutcome> {
    if hit.instrumental {
        return Some(SearchOutcome::Instrumental);
    }
    // Timed text first; a candidate with only plain text still yields a
    // renderable (unsynced) track.
    if let Some(raw) = hit.synced_text()
        && let Some(track) = clean_lrc(raw)
    {
        return Some(SearchOutcome::Found(track));
    }
    let raw = hit.plain_text()?;
    clean_plain(raw).map(SearchOutcome::Found)
}

/// Pick the candidate whose declared duration is closest to the track's.
///
/// Ties break to the first-listed candidate; candidates with no declared
/// duration rank last. Without a known track duration the first candidate
/// wins outright.
fn closest_by_duration<'a>(
    results: &'a [LrclibResponse],
    duration_ms: Option<u64>,
) -> Option<&'a LrclibResponse> {
    match duration_ms {
        Some(want) => results.iter().min_by_key(|r| {
            r.duration_ms()
                .map(|have| have.abs_diff(want))
                .unwrap_or(u64::MAX)
        }),
        None => results.first(),
    }
}

/// Strip, parse as line-granularity text, and check validity.
fn clean_lrc(raw: &str) -> Option<LyricTrack> {
    let track = parse_lrc(&strip_metadata(raw));
    is_valid(&track).then_some(track)
}

/// Strip, parse as plain (unsynchronized) text, and check validity.
fn clean_plain(raw: &str) -> Option<LyricTrack> {
    let track = parse_plain(&strip_metadata(raw));
    is_valid(&track).then_some(track)
}

/// Strip, parse as word-granularity text, and check validity.
fn clean_word_synced(raw: &str) -> Option<LyricTrack> {
    let track = parse_word_synced(&strip_metadata(raw));
    is_valid(&track).then_some(track)
}

/// A track is valid only if some word's trimmed text is non-empty and is
/// not itself a serialized JSON object. A track of nothing but structured
/// data is as useless as an empty one.
fn is_valid(track: &LyricTrack) -> bool {
    track.lines.iter().any(|line| {
        line.words.iter().any(|word| {
            let text = word.text.trim();
            !text.is_empty()
                && serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(text)
                    .is_err()
        })
    })
}
