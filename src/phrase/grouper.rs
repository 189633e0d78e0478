use crate::style::tags::KineticClass;
use crate::timeline::words::WordMetaEntry;

pub const MAX_GROUP_SIZE: usize = 5;
/// Groups shorter than this are flash-cuts and get merged forward.
pub const MIN_GROUP_DURATION: f64 = 0.4;

const TERMINAL_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Closed stop-word set scored down during anchor selection.
const FILLER_WORDS: &[&str] = &[
    "a", "an", "the", "i", "me", "my", "you", "your", "he", "him", "his", "she", "her", "it",
    "its", "we", "us", "our", "they", "them", "their", "and", "or", "but", "so", "nor", "yet",
    "if", "to", "of", "in", "on", "at", "by", "for", "from", "with", "into", "onto", "up",
    "as", "is", "am", "are", "was", "be", "im", "thats", "oh", "yeah",
];

/// A readable chunk of consecutive same-line words.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PhraseGroup {
    pub words: Vec<WordMetaEntry>,
    pub start: f64,
    pub end: f64,
    pub anchor_word_idx: usize,
    pub line_index: usize,
    pub group_index: usize,
}

impl PhraseGroup {
    fn from_words(words: Vec<WordMetaEntry>, line_index: usize, group_index: usize) -> Self {
        let start = words.first().map(|w| w.start).unwrap_or(0.0);
        let end = words.iter().map(|w| w.end).fold(start, f64::max);
        let anchor_word_idx = select_anchor(&words);
        Self {
            words,
            start,
            end,
            anchor_word_idx,
            line_index,
            group_index,
        }
    }

    pub fn anchor(&self) -> &WordMetaEntry {
        &self.words[self.anchor_word_idx]
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

pub fn is_filler(clean: &str) -> bool {
    FILLER_WORDS.contains(&clean)
}

fn ends_phrase(text: &str) -> bool {
    text.trim_end().ends_with(TERMINAL_PUNCTUATION)
}

fn span(words: &[WordMetaEntry]) -> f64 {
    match (words.first(), words.last()) {
        (Some(first), Some(last)) => last.end - first.start,
        _ => 0.0,
    }
}

/// Anchor score: `2×emphasis + 6×impact + 4×rising − 5×filler + 2×(len>5) + 2×(len>8)`.
pub fn anchor_score(word: &WordMetaEntry) -> i32 {
    let len = word.clean.chars().count();
    let kinetic = word.kinetic_class();
    2 * i32::from(word.emphasis())
        + if kinetic == KineticClass::Impact { 6 } else { 0 }
        + if kinetic == KineticClass::Rising { 4 } else { 0 }
        - if is_filler(&word.clean) { 5 } else { 0 }
        + if len > 5 { 2 } else { 0 }
        + if len > 8 { 2 } else { 0 }
}

/// Index of the highest-scoring word; the first maximum wins ties.
pub fn select_anchor(words: &[WordMetaEntry]) -> usize {
    let mut best = 0usize;
    let mut best_score = i32::MIN;
    for (i, w) in words.iter().enumerate() {
        let s = anchor_score(w);
        if s > best_score {
            best = i;
            best_score = s;
        }
    }
    best
}

/// Partition one line's words into phrase groups.
pub fn group_line(words: &[WordMetaEntry]) -> Vec<PhraseGroup> {
    let Some(line_index) = words.first().map(|w| w.line_index) else {
        return Vec::new();
    };

    let mut chunks: Vec<Vec<WordMetaEntry>> = Vec::new();
    let mut current: Vec<WordMetaEntry> = Vec::new();
    for (i, w) in words.iter().enumerate() {
        current.push(w.clone());
        let at_line_end = i + 1 == words.len();
        let full = current.len() >= MAX_GROUP_SIZE && span(&current) >= MIN_GROUP_DURATION;
        if at_line_end || ends_phrase(&w.text) || full {
            chunks.push(std::mem::take(&mut current));
        }
    }

    let merged = merge_short_chunks(chunks);
    merged
        .into_iter()
        .enumerate()
        .map(|(group_index, ws)| PhraseGroup::from_words(ws, line_index, group_index))
        .collect()
}

/// Fold each under-duration chunk into the following one when the result still fits.
fn merge_short_chunks(chunks: Vec<Vec<WordMetaEntry>>) -> Vec<Vec<WordMetaEntry>> {
    let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
    let mut out: Vec<Vec<WordMetaEntry>> = Vec::with_capacity(chunks.len());
    let mut carry: Option<Vec<WordMetaEntry>> = None;

    for (i, chunk) in chunks.into_iter().enumerate() {
        let chunk = match carry.take() {
            Some(mut prev) => {
                prev.extend(chunk);
                prev
            }
            None => chunk,
        };
        let fits_next = sizes
            .get(i + 1)
            .is_some_and(|next| chunk.len() + next <= MAX_GROUP_SIZE);
        if span(&chunk) < MIN_GROUP_DURATION && fits_next {
            carry = Some(chunk);
        } else {
            out.push(chunk);
        }
    }
    out
}

/// Group every line, in line order.
pub fn group_lines(lines: &[Vec<WordMetaEntry>]) -> Vec<PhraseGroup> {
    lines.iter().flat_map(|ws| group_line(ws)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/phrase/grouper.rs"]
mod tests;
