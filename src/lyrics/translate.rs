//! Translation alignment
//!
//! Translated tracks are assumed pre-aligned 1:1 by line index with the
//! primary track. No fuzzy re-alignment: a shorter translated track simply
//! has no text for the unmatched tail.

use super::LyricTrack;

/// Translated text for the line at `index`, if the track has one.
pub fn translation_at(translated: Option<&LyricTrack>, index: usize) -> Option<String> {
    let line = translated?.lines.get(index)?;
    let text = line.text();
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::parser::parse_lrc;

    #[test]
    fn looks_up_by_index() {
        let translated = parse_lrc("[00:01.00]Hallo\n[00:05.50]Welt");
        assert_eq!(
            translation_at(Some(&translated), 0).as_deref(),
            Some("Hallo")
        );
        assert_eq!(translation_at(Some(&translated), 1).as_deref(), Some("Welt"));
    }

    #[test]
    fn missing_tail_and_missing_track_yield_none() {
        let translated = parse_lrc("[00:01.00]Hallo");
        // Primary has more lines than the translation: no error, just None.
        assert_eq!(translation_at(Some(&translated), 5), None);
        assert_eq!(translation_at(None, 0), None);
    }
}
