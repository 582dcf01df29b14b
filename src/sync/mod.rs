//! Playback-to-lyric index mapping
//!
//! Maps the playback clock onto the active lyric line. The search runs in
//! O(log n) per tick, ticks closer together than [`TICK_GRANULARITY_MS`]
//! are coalesced, and a change is only reported when the committed index
//! actually moves, so the rendering layer never re-renders for a no-op.

pub mod karaoke;

use crate::lyrics::LyricLine;

/// Minimum spacing between applied clock ticks. Sub-threshold deltas are
/// coalesced and do not trigger a new search.
pub const TICK_GRANULARITY_MS: u64 = 150;

/// Index of the line active at `t_ms`: the greatest `start_ms <= t_ms`.
///
/// `None` when `t_ms` precedes the first line or `lines` is empty. Assumes
/// `lines` is sorted ascending by `start_ms`, which the parsers guarantee.
pub fn line_index_at(lines: &[LyricLine], t_ms: u64) -> Option<usize> {
    lines
        .partition_point(|line| line.start_ms <= t_ms)
        .checked_sub(1)
}

/// Per-playback-session sync state.
///
/// `committed` is derived from the clock, never set directly; it is `None`
/// until the clock reaches the first line.
#[derive(Debug, Clone)]
pub struct SyncState {
    granularity_ms: u64,
    last_applied_ms: Option<u64>,
    committed: Option<usize>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::with_granularity(TICK_GRANULARITY_MS)
    }
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tick coalescing threshold (0 applies every tick).
    pub fn with_granularity(granularity_ms: u64) -> Self {
        Self {
            granularity_ms,
            last_applied_ms: None,
            committed: None,
        }
    }

    /// The committed active line index.
    pub fn active_line(&self) -> Option<usize> {
        self.committed
    }

    /// Apply a playback tick.
    ///
    /// Returns `Some(new_index)` only when the committed index changes;
    /// coalesced and no-op ticks return `None`. The first tick of a session
    /// is always applied.
    pub fn tick(&mut self, lines: &[LyricLine], t_ms: u64) -> Option<Option<usize>> {
        if let Some(last) = self.last_applied_ms
            && last.abs_diff(t_ms) < self.granularity_ms
        {
            return None;
        }
        self.apply(lines, t_ms)
    }

    /// Apply a seek: bypasses the coalescing guard and re-runs the search
    /// immediately.
    pub fn seek(&mut self, lines: &[LyricLine], t_ms: u64) -> Option<Option<usize>> {
        self.apply(lines, t_ms)
    }

    /// Forget the applied-tick history and committed index; used on track
    /// change. The granularity setting survives.
    pub fn reset(&mut self) {
        self.last_applied_ms = None;
        self.committed = None;
    }

    fn apply(&mut self, lines: &[LyricLine], t_ms: u64) -> Option<Option<usize>> {
        self.last_applied_ms = Some(t_ms);
        let index = line_index_at(lines, t_ms);
        if index != self.committed {
            self.committed = index;
            Some(index)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::parser::parse_lrc;

    fn two_lines() -> Vec<LyricLine> {
        parse_lrc("[00:01.00]Hello\n[00:05.50]World").lines
    }

    #[test]
    fn maps_time_to_line_index() {
        let lines = two_lines();
        assert_eq!(line_index_at(&lines, 0), None);
        assert_eq!(line_index_at(&lines, 999), None);
        assert_eq!(line_index_at(&lines, 1000), Some(0));
        assert_eq!(line_index_at(&lines, 3000), Some(0));
        assert_eq!(line_index_at(&lines, 5499), Some(0));
        assert_eq!(line_index_at(&lines, 5500), Some(1));
        // Any time at or after the last line's start stays on it.
        assert_eq!(line_index_at(&lines, 6000), Some(1));
        assert_eq!(line_index_at(&lines, u64::MAX - 1), Some(1));
    }

    #[test]
    fn empty_sequence_yields_none() {
        assert_eq!(line_index_at(&[], 1000), None);
    }

    #[test]
    fn mapper_result_satisfies_predecessor_contract() {
        let lines = parse_lrc("[00:01.00]a\n[00:02.00]b\n[00:10.00]c\n[00:10.00]d").lines;
        for t in [0u64, 500, 1000, 1500, 2000, 9999, 10000, 20000] {
            match line_index_at(&lines, t) {
                Some(k) => {
                    assert!(lines[k].start_ms <= t);
                    if k + 1 < lines.len() {
                        assert!(t < lines[k + 1].start_ms || lines[k + 1].start_ms == lines[k].start_ms);
                    }
                }
                None => assert!(t < lines[0].start_ms),
            }
        }
    }

    #[test]
    fn commits_only_on_change() {
        let lines = two_lines();
        let mut sync = SyncState::new();

        // First tick applies and commits line 0.
        assert_eq!(sync.tick(&lines, 3000), Some(Some(0)));
        // Within the same line, far enough apart to apply: no change.
        assert_eq!(sync.tick(&lines, 4000), None);
        assert_eq!(sync.active_line(), Some(0));
        // Crossing into line 1 commits once.
        assert_eq!(sync.tick(&lines, 6000), Some(Some(1)));
        assert_eq!(sync.tick(&lines, 7000), None);
    }

    #[test]
    fn sub_threshold_ticks_are_coalesced() {
        let lines = two_lines();
        let mut sync = SyncState::new();

        assert_eq!(sync.tick(&lines, 5400), Some(Some(0)));
        // 100 ms later the clock has crossed into line 1, but the tick is
        // below the granularity threshold and must be dropped.
        assert_eq!(sync.tick(&lines, 5500), None);
        assert_eq!(sync.active_line(), Some(0));
        // The next full-granularity tick catches up.
        assert_eq!(sync.tick(&lines, 5600), Some(Some(1)));
    }

    #[test]
    fn seek_bypasses_coalescing() {
        let lines = two_lines();
        let mut sync = SyncState::new();

        assert_eq!(sync.tick(&lines, 5400), Some(Some(0)));
        // Same 100 ms jump as a seek applies immediately.
        assert_eq!(sync.seek(&lines, 5500), Some(Some(1)));
        assert_eq!(sync.active_line(), Some(1));
    }

    #[test]
    fn backwards_seek_recomputes() {
        let lines = two_lines();
        let mut sync = SyncState::new();

        assert_eq!(sync.tick(&lines, 6000), Some(Some(1)));
        assert_eq!(sync.seek(&lines, 1200), Some(Some(0)));
        assert_eq!(sync.seek(&lines, 0), Some(None));
        assert_eq!(sync.active_line(), None);
    }

    #[test]
    fn reset_clears_session_state() {
        let lines = two_lines();
        let mut sync = SyncState::new();
        sync.tick(&lines, 3000);
        sync.reset();
        assert_eq!(sync.active_line(), None);
        // First tick after reset always applies.
        assert_eq!(sync.tick(&lines, 3000), Some(Some(0)));
    }
}
