use super::*;

#[test]
fn empty_object_parses_to_defaults() {
    let p = ScenePayload::from_json("{}").unwrap();
    assert!(p.lines.is_empty());
    assert!(p.words.is_empty());
    assert!(p.direction.motion.is_none());
    assert_eq!(p.beat_grid.confidence, 1.0);
}

#[test]
fn non_object_payload_is_rejected() {
    assert!(matches!(
        ScenePayload::from_json("[1, 2]"),
        Err(LyricError::Payload(_))
    ));
    assert!(matches!(
        ScenePayload::from_json("{"),
        Err(LyricError::Serde(_))
    ));
}

#[test]
fn unknown_tags_degrade_to_none() {
    let p = ScenePayload::from_json(
        r#"{
            "direction": {
                "motion": "teleport",
                "typography": "BOLD_IMPACT",
                "texture": 42,
                "word_directives": {
                    "fire": { "emphasis": 9, "visual_metaphor": "Ember Burst", "entry": "nope" }
                }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(p.direction.motion, None);
    assert_eq!(p.direction.typography, Some(TypographyPreset::BoldImpact));
    assert_eq!(p.direction.texture, None);
    let d = &p.direction.word_directives["fire"];
    assert_eq!(d.visual_metaphor, Some(VisualMetaphor::EmberBurst));
    assert_eq!(d.entry, None);
    assert_eq!(d.emphasis_level(), 5);
}

#[test]
fn malformed_list_entries_are_dropped() {
    let p = ScenePayload::from_json(
        r#"{
            "words": [
                { "word": "hold", "start": 1.0, "end": 1.2 },
                { "word": "broken" },
                { "word": "on", "start": 1.2, "end": 1.4 }
            ],
            "direction": "not-an-object"
        }"#,
    )
    .unwrap();
    assert_eq!(p.words.len(), 2);
    assert_eq!(p.words[1].word, "on");
    assert!(p.direction.sections.is_empty());
}

#[test]
fn emphasis_level_clamps_and_rounds() {
    let mut d = WordDirective::default();
    assert_eq!(d.emphasis_level(), 1);
    d.emphasis = Some(3.6);
    assert_eq!(d.emphasis_level(), 4);
    d.emphasis = Some(-2.0);
    assert_eq!(d.emphasis_level(), 1);
    d.emphasis = Some(f64::NAN);
    assert_eq!(d.emphasis_level(), 1);
}

#[test]
fn palette_accepts_list_and_object_forms() {
    let list: Palette = serde_json::from_str(r##"["#000000", "#ffffff"]"##).unwrap();
    assert_eq!(list.background.as_deref(), Some("#000000"));
    assert_eq!(list.text.as_deref(), Some("#ffffff"));
    assert_eq!(list.accent, None);

    let obj: Palette = serde_json::from_str(r##"{ "accent": "#ff0000" }"##).unwrap();
    assert_eq!(obj.accent.as_deref(), Some("#ff0000"));
    assert_eq!(obj.background, None);
}

#[test]
fn physics_heat_is_clamped() {
    let p = PhysicsProfile {
        kind: None,
        heat: Some(3.0),
    };
    assert_eq!(p.heat_clamped(), Some(1.0));
    let p = PhysicsProfile {
        kind: None,
        heat: Some(f64::INFINITY),
    };
    assert_eq!(p.heat_clamped(), None);
}

#[test]
fn camel_case_keys_are_read() {
    let p = ScenePayload::from_json(
        r#"{
            "songStart": 0.5,
            "songEnd": 4.0,
            "beatGrid": { "bpm": 120, "beats": [1.0, 1.5, 2.0] },
            "direction": {
                "emotionalArc": "peak",
                "visualMode": "intimate",
                "sections": [{ "startRatio": 0.0, "endRatio": 0.5, "shot": "wide" }],
                "storyboard": [{ "lineIndex": 2, "entry": "cut" }],
                "wordDirectives": {
                    "shatter": {
                        "letterSequence": true,
                        "visualMetaphor": "fracture",
                        "kineticClass": "impact",
                        "ghostTrail": true
                    }
                }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(p.song_start, Some(0.5));
    assert_eq!(p.song_end, Some(4.0));
    assert_eq!(p.beat_grid.beats, vec![1.0, 1.5, 2.0]);
    let d = &p.direction;
    assert_eq!(d.emotional_arc, Some(EmotionalArc::Peak));
    assert_eq!(d.visual_mode, Some(VisualMode::Intimate));
    assert_eq!(d.sections.len(), 1);
    assert_eq!(d.sections[0].end_ratio, 0.5);
    assert_eq!(d.storyboard[0].line_index, 2);
    let w = &d.word_directives["shatter"];
    assert!(w.letter_sequence);
    assert!(w.ghost_trail);
    assert_eq!(w.visual_metaphor, Some(VisualMetaphor::Fracture));
    assert_eq!(w.kinetic_class, Some(KineticClass::Impact));
}

#[test]
fn snake_case_keys_are_still_read() {
    let p = ScenePayload::from_json(
        r#"{
            "song_end": 3.0,
            "beat_grid": { "beats": [0.5] },
            "direction": { "word_directives": { "go": { "letter_sequence": true } } }
        }"#,
    )
    .unwrap();
    assert_eq!(p.song_end, Some(3.0));
    assert_eq!(p.beat_grid.beats.len(), 1);
    assert!(p.direction.word_directives["go"].letter_sequence);
}
