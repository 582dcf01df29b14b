//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API that provides synchronized (LRC format) lyrics.
//! API Documentation: https://lrclib.net/docs
//!
//! Last step of the fallback chain: an exact lookup by track metadata, then
//! a fuzzy search whose candidates the resolver ranks by duration.

use serde::Deserialize;

/// LRCLIB API response / search candidate
#[derive(Debug, Deserialize, Clone)]
pub struct LrclibResponse {
    #[allow(dead_code)]
    id: i64,
    #[allow(dead_code)]
    #[serde(rename = "trackName")]
    track_name: String,
    #[allow(dead_code)]
    #[serde(rename = "artistName")]
    artist_name: String,
    /// Declared track duration in seconds
    pub duration: Option<f64>,
    /// Track has no lyrics by design (distinct from "lookup failed")
    #[serde(default)]
    pub instrumental: bool,
    #[serde(rename = "plainLyrics")]
    pub plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics")]
    pub synced_lyrics: Option<String>,
}

impl LrclibResponse {
    /// Declared duration in milliseconds, if any.
    pub fn duration_ms(&self) -> Option<u64> {
        self.duration.map(|secs| (secs * 1000.0) as u64)
    }

    /// Timed lyric text, if this candidate has any.
    pub fn synced_text(&self) -> Option<&str> {
        self.synced_lyrics
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Untimed lyric text, if this candidate has any.
    pub fn plain_text(&self) -> Option<&str> {
        self.plain_lyrics
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
        }
    }

    /// Exact lookup by track name, artist, album and duration.
    pub async fn get_exact(
        &self,
        track_name: &str,
        artist_name: &str,
        album_name: Option<&str>,
        duration_secs: Option<u64>,
    ) -> anyhow::Result<Option<LrclibResponse>> {
        let mut url = format!(
            "{}/get?track_name={}&artist_name={}",
            self.base_url,
            urlencoding::encode(track_name),
            urlencoding::encode(artist_name)
        );

        if let Some(album) = album_name {
            url.push_str(&format!("&album_name={}", urlencoding::encode(album)));
        }

        if let Some(duration) = duration_secs {
            url.push_str(&format!("&duration={}", duration));
        }

        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            let lyrics: LrclibResponse = response.json().await?;
            Ok(Some(lyrics))
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(None)
        } else {
            anyhow::bail!("LRCLIB API error: {}", response.status());
        }
    }

    /// Fuzzy search by track name and artist, returning all candidates.
    pub async fn search(
        &self,
        track_name: &str,
        artist_name: &str,
    ) -> anyhow::Result<Vec<LrclibResponse>> {
        let query = format!("{} {}", track_name, artist_name);
        let url = format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(&query)
        );

        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            let results: Vec<LrclibResponse> = response.json().await?;
            Ok(results)
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(Vec::new())
        } else {
            anyhow::bail!("LRCLIB search error: {}", response.status());
        }
    }
}
