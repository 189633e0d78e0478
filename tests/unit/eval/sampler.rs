use super::*;
use crate::compile::compiler::{CompileOpts, compile_scene};
use crate::layout::measure::ApproxMeasurer;
use crate::payload::model::ScenePayload;

fn compile(json: &str) -> CompiledScene {
    let payload = ScenePayload::from_json(json).unwrap();
    let mut m = ApproxMeasurer::default();
    compile_scene(&payload, &mut m, &CompileOpts::default()).unwrap()
}

// Fluid timing: stagger 0.08, entry 0.35, linger 0.4, exit 0.45.
const I_LOVE_YOU: &str = r#"{
    "lines": [{ "start": 0.0, "end": 1.0, "text": "I love you" }],
    "words": [
        { "word": "I", "start": 0.0, "end": 0.3 },
        { "word": "love", "start": 0.3, "end": 0.6 },
        { "word": "you", "start": 0.6, "end": 1.0 }
    ],
    "beat_grid": { "bpm": 120, "beats": [0.0, 0.5, 1.0, 1.5] }
}"#;

fn still() -> PhysicsState {
    PhysicsState::default()
}

#[test]
fn nothing_is_visible_outside_the_window() {
    let scene = compile(I_LOVE_YOU);
    assert!(sample_scene(&scene, -0.6, &still()).words.is_empty());
    assert!(sample_scene(&scene, 1.85, &still()).words.is_empty());
    assert!(sample_scene(&scene, 10.0, &still()).words.is_empty());
}

#[test]
fn entries_are_staggered_by_word_index() {
    let scene = compile(I_LOVE_YOU);
    let frame = sample_scene(&scene, -0.55, &still());
    assert_eq!(frame.words.len(), 1);
    assert_eq!(frame.words[0].word_index, 0);
    assert_eq!(frame.words[0].phase, WordPhase::Entry);
}

#[test]
fn hold_shows_every_word_at_its_emphasis_alpha() {
    let scene = compile(I_LOVE_YOU);
    let frame = sample_scene(&scene, 0.5, &still());
    assert_eq!(frame.words.len(), 3);
    for w in &frame.words {
        assert_eq!(w.phase, WordPhase::Hold);
        assert!((w.transform.alpha - 0.76).abs() < 1e-9);
    }
    let anchor = &frame.words[1];
    assert_eq!(anchor.text, "love");
    assert_eq!(anchor.color, frame.palette.accent);
    assert_eq!(frame.words[0].color, frame.palette.text);
}

#[test]
fn exit_follows_linger() {
    let scene = compile(I_LOVE_YOU);
    let hold = sample_scene(&scene, 1.35, &still());
    assert!(hold.words.iter().all(|w| w.phase == WordPhase::Hold));
    let leaving = sample_scene(&scene, 1.6, &still());
    assert!(!leaving.words.is_empty());
    for w in &leaving.words {
        assert_eq!(w.phase, WordPhase::Exit);
        assert!(w.transform.alpha < 0.76);
    }
}

#[test]
fn sampling_is_pure() {
    let scene = compile(I_LOVE_YOU);
    for t in [-0.4, 0.1, 0.77, 1.5] {
        assert_eq!(
            sample_scene(&scene, t, &still()),
            sample_scene(&scene, t, &still())
        );
    }
}

#[test]
fn beat_phase_is_reported() {
    let scene = compile(I_LOVE_YOU);
    let frame = sample_scene(&scene, 0.75, &still());
    assert!((frame.beat_phase.unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn physics_glow_only_lifts_semantic_words() {
    let scene = compile(
        r#"{
            "lines": [{ "start": 0.0, "end": 2.0, "text": "cold fire" }],
            "words": [
                { "word": "cold", "start": 0.0, "end": 0.8 },
                { "word": "fire", "start": 0.8, "end": 1.6 }
            ],
            "direction": {
                "motion": "drift",
                "word_directives": { "fire": { "visual_metaphor": "radiance" } }
            }
        }"#,
    );
    let calm = sample_scene(&scene, 1.0, &still());
    let glowing = PhysicsState {
        glow: 1.0,
        ..PhysicsState::default()
    };
    let lit = sample_scene(&scene, 1.0, &glowing);
    let find = |f: &FrameSample, text: &str| {
        f.words
            .iter()
            .find(|w| w.text == text)
            .map(|w| w.transform.glow_mult)
            .unwrap()
    };
    assert_eq!(find(&calm, "cold"), find(&lit, "cold"));
    assert!((find(&lit, "fire") - 2.0 * find(&calm, "fire")).abs() < 1e-9);
}

#[test]
fn empty_scene_still_reports_chapter_state() {
    let scene = compile("{}");
    let frame = sample_scene(&scene, 0.0, &still());
    assert!(frame.words.is_empty());
    assert_eq!(frame.zoom, 1.0);
    assert_eq!(frame.palette, ResolvedPalette::FALLBACK);
}

#[test]
fn null_physics_is_inert() {
    let mut p = NullPhysics;
    p.on_beat(3.0, true);
    assert_eq!(p.tick(), PhysicsState::default());
}
