//! Alternate primary lyric client (provider B)
//!
//! Keyed by song id only. Returns a single raw line-level text, used when
//! the bundle yields no valid primary lyric.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BackupResponse {
    lrc: Option<BackupBody>,
}

#[derive(Debug, Deserialize)]
struct BackupBody {
    lyric: Option<String>,
}

/// Client for the alternate primary endpoint.
#[derive(Debug, Clone)]
pub struct BackupClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackupClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the raw primary text for a song id. 404 means none exists.
    pub async fn fetch(&self, song_id: &str) -> anyhow::Result<Option<String>> {
        let url = format!(
            "{}/lyric?id={}",
            self.base_url,
            urlencoding::encode(song_id)
        );

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("backup lyric API error: {}", response.status());
        }

        let body: BackupResponse = response.json().await?;
        Ok(body
            .lrc
            .and_then(|b| b.lyric)
            .filter(|s| !s.trim().is_empty()))
    }
}
