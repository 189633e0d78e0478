use std::collections::BTreeMap;

use crate::payload::model::{LyricLine, TimedWord, WordDirective};
use crate::style::tags::KineticClass;

/// A word may start slightly before its line's nominal start and still belong to it.
pub const LINE_MATCH_TOLERANCE: f64 = 0.05;

/// One transcribed word with its line placement and matched directive.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordMetaEntry {
    pub text: String,
    pub clean: String,
    pub start: f64,
    pub end: f64,
    pub line_index: usize,
    pub word_index: usize,
    pub directive: Option<WordDirective>,
}

impl WordMetaEntry {
    pub fn emphasis(&self) -> u8 {
        self.directive
            .as_ref()
            .map(WordDirective::emphasis_level)
            .unwrap_or(1)
    }

    pub fn kinetic_class(&self) -> KineticClass {
        self.directive
            .as_ref()
            .and_then(|d| d.kinetic_class)
            .unwrap_or(KineticClass::Neutral)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Lowercase alphanumeric form used for directive matching and scoring.
pub fn clean_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Attach line index, word index, and directive to every raw word.
///
/// Returns one ordered word list per line. Words with non-finite timing are dropped; an
/// inverted span is collapsed to its start.
#[tracing::instrument(skip_all, fields(lines = lines.len(), words = words.len()))]
pub fn build_word_timeline(
    lines: &[LyricLine],
    words: &[TimedWord],
    directives: &BTreeMap<String, WordDirective>,
) -> Vec<Vec<WordMetaEntry>> {
    let mut by_clean: BTreeMap<String, &WordDirective> = BTreeMap::new();
    for (key, directive) in directives {
        let clean = clean_word(key);
        if !clean.is_empty() {
            by_clean.entry(clean).or_insert(directive);
        }
    }

    let mut ordered: Vec<&TimedWord> = words
        .iter()
        .filter(|w| w.start.is_finite() && w.end.is_finite())
        .collect();
    ordered.sort_by(|a, b| a.start.total_cmp(&b.start));

    let line_count = if lines.is_empty() && !ordered.is_empty() {
        1
    } else {
        lines.len()
    };
    let mut per_line: Vec<Vec<WordMetaEntry>> = vec![Vec::new(); line_count];

    for w in ordered {
        let line_index = lines
            .iter()
            .rposition(|l| l.start <= w.start + LINE_MATCH_TOLERANCE)
            .unwrap_or(0);
        let clean = clean_word(&w.word);
        let directive = by_clean.get(&clean).map(|d| (*d).clone());
        let bucket = &mut per_line[line_index];
        bucket.push(WordMetaEntry {
            text: w.word.trim().to_string(),
            clean,
            start: w.start,
            end: w.end.max(w.start),
            line_index,
            word_index: bucket.len(),
            directive,
        });
    }

    per_line
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/words.rs"]
mod tests;
