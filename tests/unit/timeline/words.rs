use super::*;

fn line(start: f64, end: f64) -> LyricLine {
    LyricLine {
        start,
        end,
        text: String::new(),
        tag: None,
    }
}

fn word(w: &str, start: f64, end: f64) -> TimedWord {
    TimedWord {
        word: w.to_string(),
        start,
        end,
    }
}

#[test]
fn clean_word_strips_punctuation_and_case() {
    assert_eq!(clean_word("Don't!"), "dont");
    assert_eq!(clean_word("  Fire,"), "fire");
    assert_eq!(clean_word("..."), "");
}

#[test]
fn words_are_bucketed_by_line_start() {
    let lines = vec![line(0.0, 2.0), line(2.0, 4.0)];
    let words = vec![
        word("hello", 0.1, 0.4),
        word("world", 0.5, 0.9),
        word("again", 1.98, 2.3),
        word("now", 2.4, 2.6),
    ];
    let out = build_word_timeline(&lines, &words, &BTreeMap::new());
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].len(), 2);
    // Within tolerance of line 1's start.
    assert_eq!(out[1][0].text, "again");
    assert_eq!(out[1][0].line_index, 1);
    assert_eq!(out[1][0].word_index, 0);
    assert_eq!(out[1][1].word_index, 1);
}

#[test]
fn words_without_lines_land_in_a_single_line() {
    let words = vec![word("solo", 0.0, 0.5)];
    let out = build_word_timeline(&[], &words, &BTreeMap::new());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0][0].line_index, 0);
}

#[test]
fn directives_match_clean_form() {
    let mut directives = BTreeMap::new();
    directives.insert(
        "FIRE!".to_string(),
        WordDirective {
            emphasis: Some(4.0),
            kinetic_class: Some(KineticClass::Impact),
            ..WordDirective::default()
        },
    );
    let out = build_word_timeline(
        &[line(0.0, 1.0)],
        &[word("fire,", 0.0, 0.3), word("burn", 0.3, 0.6)],
        &directives,
    );
    assert_eq!(out[0][0].emphasis(), 4);
    assert_eq!(out[0][0].kinetic_class(), KineticClass::Impact);
    assert_eq!(out[0][1].emphasis(), 1);
    assert_eq!(out[0][1].kinetic_class(), KineticClass::Neutral);
}

#[test]
fn non_finite_words_are_dropped_and_inverted_spans_collapse() {
    let out = build_word_timeline(
        &[line(0.0, 1.0)],
        &[word("bad", f64::NAN, 1.0), word("odd", 0.5, 0.2)],
        &BTreeMap::new(),
    );
    assert_eq!(out[0].len(), 1);
    assert_eq!(out[0][0].end, 0.5);
}
