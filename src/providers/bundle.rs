//! Unified lyric bundle client (provider A)
//!
//! Keyed by song id. One response may carry up to three raw text variants:
//! line-level primary, word-level, and line-level translation. Any of them
//! may be absent or junk; validation is the resolver's job.

use serde::Deserialize;

/// Up to three raw lyric variants for one song.
#[derive(Debug, Clone, Default)]
pub struct LyricBundle {
    pub primary: Option<String>,
    pub word_synced: Option<String>,
    pub translated: Option<String>,
}

impl LyricBundle {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.word_synced.is_none() && self.translated.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct BundleResponse {
    lrc: Option<VariantBody>,
    yrc: Option<VariantBody>,
    tlyric: Option<VariantBody>,
}

#[derive(Debug, Deserialize)]
struct VariantBody {
    lyric: Option<String>,
}

/// Client for the unified bundle endpoint.
#[derive(Debug, Clone)]
pub struct BundleClient {
    client: reqwest::Client,
    base_url: String,
}

impl BundleClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the lyric bundle for a song id. 404 means no bundle exists.
    pub async fn fetch(&self, song_id: &str) -> anyhow::Result<Option<LyricBundle>> {
        let url = format!(
            "{}/lyric/new?id={}",
            self.base_url,
            urlencoding::encode(song_id)
        );

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("bundle API error: {}", response.status());
        }

        let body: BundleResponse = response.json().await?;
        let bundle = LyricBundle {
            primary: non_empty(body.lrc),
            word_synced: non_empty(body.yrc),
            translated: non_empty(body.tlyric),
        };

        Ok(if bundle.is_empty() { None } else { Some(bundle) })
    }
}

fn non_empty(variant: Option<VariantBody>) -> Option<String> {
    variant
        .and_then(|v| v.lyric)
        .filter(|s| !s.trim().is_empty())
}
