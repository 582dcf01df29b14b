//! Lyric acquisition and playback synchronization core.
//!
//! Resolves lyrics for a song from a chain of providers, strips embedded
//! metadata lines, parses line- and word-granularity timed text, and maps a
//! playback clock onto the active line and the in-progress word.

pub mod config;
pub mod lyrics;
pub mod providers;
pub mod resolver;
pub mod session;
pub mod sync;

pub use lyrics::{LyricLine, LyricSource, LyricTrack, ResolvedLyrics, SongInfo, Word, OPEN_END};
pub use resolver::Resolver;
pub use session::{KaraokeLine, LyricSession};
