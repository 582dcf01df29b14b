//! Lyric provider clients
//!
//! Three upstreams, queried by the resolver in priority order:
//! - `bundle`: unified lyric bundle keyed by song id (up to three variants)
//! - `backup`: alternate primary lyric source keyed by song id
//! - `lrclib`: title/artist/duration-indexed external search
//!
//! Clients return raw text; cleaning, validation and parsing happen in the
//! resolver.

pub mod backup;
pub mod bundle;
pub mod lrclib;

pub(crate) const USER_AGENT: &str = "chorus/0.1.0 (https://github.com/chorus-player/chorus)";
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Shared reqwest client construction for all providers.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("failed to create reqwest client")
}
