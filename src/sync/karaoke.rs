//! Karaoke word progress
//!
//! Per-word display state for the single active line. These are pure
//! functions of the clock, so a caller can recompute the active line's
//! words at high frequency without touching any other line.

use crate::lyrics::{LyricLine, Word};

/// Display state of one word at one clock value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WordState {
    /// Clock has not reached the word yet
    Upcoming,
    /// Clock is inside the word's range; `progress` is the reveal
    /// percentage, clamped to [0, 100]
    Playing { progress: f32 },
    /// Clock is at or past the word's end
    Played,
}

impl WordState {
    /// Reveal percentage regardless of state.
    pub fn progress(self) -> f32 {
        match self {
            WordState::Upcoming => 0.0,
            WordState::Playing { progress } => progress,
            WordState::Played => 100.0,
        }
    }
}

/// Compute one word's state at `t_ms`.
///
/// A word with both times exactly zero has no timing data and is always
/// `Upcoming`; a zero-or-negative duration collapses to `Played` as soon as
/// the clock reaches its start.
pub fn word_state(word: &Word, t_ms: u64) -> WordState {
    if word.start_ms == 0 && word.end_ms == 0 {
        return WordState::Upcoming;
    }
    if t_ms < word.start_ms {
        return WordState::Upcoming;
    }
    if t_ms >= word.end_ms {
        return WordState::Played;
    }

    let elapsed = (t_ms - word.start_ms) as f32;
    let duration = (word.end_ms - word.start_ms) as f32;
    WordState::Playing {
        progress: (elapsed / duration * 100.0).clamp(0.0, 100.0),
    }
}

/// States for every word of the active line at `t_ms`.
pub fn line_word_states(line: &LyricLine, t_ms: u64) -> Vec<WordState> {
    line.words.iter().map(|w| word_state(w, t_ms)).collect()
}
