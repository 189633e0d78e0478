use super::*;
use crate::layout::measure::ApproxMeasurer;
use crate::layout::solver::anchor_slot;

fn compile(json: &str) -> CompiledScene {
    let payload = ScenePayload::from_json(json).unwrap();
    let mut m = ApproxMeasurer::default();
    compile_scene(&payload, &mut m, &CompileOpts::default()).unwrap()
}

const I_LOVE_YOU: &str = r#"{
    "lines": [{ "start": 0.0, "end": 1.0, "text": "I love you" }],
    "words": [
        { "word": "I", "start": 0.0, "end": 0.3 },
        { "word": "love", "start": 0.3, "end": 0.6 },
        { "word": "you", "start": 0.6, "end": 1.0 }
    ]
}"#;

#[test]
fn i_love_you_is_one_group_anchored_on_love() {
    let scene = compile(I_LOVE_YOU);
    assert_eq!(scene.groups.len(), 1);
    let g = &scene.groups[0];
    assert_eq!(g.word_count, 3);
    assert_eq!(g.anchor_word_idx, 1);
    assert_eq!(g.anchor().map(|w| w.text.as_str()), Some("love"));
    assert!(g.words[1].is_anchor);
    assert_eq!(scene.diagnostics.word_count, 3);
}

#[test]
fn empty_payload_compiles_to_empty_scene() {
    let scene = compile(r#"{ "beat_grid": { "bpm": 120, "beats": [0.5, 1.0] } }"#);
    assert!(scene.is_empty());
    assert_eq!(scene.chapters.len(), 1);
    assert_eq!(scene.beats.len(), 2);
    assert_eq!(scene.defaults.motion, MotionProfile::Fluid);
    assert_eq!(scene.defaults.typography.preset, TypographyPreset::CleanModern);
}

#[test]
fn invalid_opts_are_rejected() {
    let payload = ScenePayload::default();
    let mut m = ApproxMeasurer::default();
    let opts = CompileOpts {
        padding: 600.0,
        ..CompileOpts::default()
    };
    assert!(matches!(
        compile_scene(&payload, &mut m, &opts),
        Err(LyricError::Validation(_))
    ));
    let opts = CompileOpts {
        canvas: Canvas {
            width: 0,
            height: 10,
        },
        ..CompileOpts::default()
    };
    assert!(compile_scene(&payload, &mut m, &opts).is_err());
}

#[test]
fn letter_sequence_expands_into_letters() {
    let scene = compile(
        r#"{
            "words": [{ "word": "shatter", "start": 1.0, "end": 1.6 }],
            "direction": {
                "word_directives": {
                    "shatter": { "letter_sequence": true, "exit": "scatter-letters" }
                }
            }
        }"#,
    );
    let g = &scene.groups[0];
    assert_eq!(g.word_count, 1);
    assert_eq!(g.words.len(), 7);
    for (i, w) in g.words.iter().enumerate() {
        let letter = w.letter.expect("letter metadata");
        assert_eq!(letter.index, i);
        assert_eq!(letter.total, 7);
        assert!((letter.delay - i as f64 * 0.012).abs() < 1e-12);
        assert_eq!(w.exit, ExitStyle::ScatterLetters);
        assert_eq!(w.word_index, 0);
    }
    assert_eq!(g.anchor_word_idx, 0);
}

#[test]
fn style_precedence_directive_over_metaphor_over_storyboard() {
    let scene = compile(
        r#"{
            "lines": [{ "start": 0.0, "end": 3.0, "text": "burn the night" }],
            "words": [
                { "word": "burn", "start": 0.0, "end": 0.8 },
                { "word": "the", "start": 0.8, "end": 1.0 },
                { "word": "night", "start": 1.0, "end": 2.0 }
            ],
            "direction": {
                "motion": "weighted",
                "storyboard": [{ "line_index": 0, "entry": "cut", "exit": "blur-out" }],
                "word_directives": {
                    "burn": { "visual_metaphor": "ember-burst", "entry": "zoom-in" },
                    "night": { "visual_metaphor": "void-absorb" }
                }
            }
        }"#,
    );
    let words = &scene.groups[0].words;
    // explicit entry wins, metaphor still supplies the exit
    assert_eq!(words[0].entry, EntryStyle::ZoomIn);
    assert_eq!(words[0].exit, ExitStyle::BurnOut);
    assert_eq!(words[0].emitter, Some(EmitterKind::Embers));
    // storyboard over profile
    assert_eq!(words[1].entry, EntryStyle::Cut);
    assert_eq!(words[1].exit, ExitStyle::BlurOut);
    // profile behavior by position: weighted behaviors = [pulse, vibrate], (0 + 1) % 2
    assert_eq!(words[1].behavior, BehaviorStyle::Vibrate);
    // metaphor over storyboard
    assert_eq!(words[2].entry, EntryStyle::BlurIn);
    assert_eq!(words[2].exit, ExitStyle::Implode);
    assert!(words[2].alpha_mult <= 0.85);
}

#[test]
fn undirected_words_follow_the_motion_profile() {
    let scene = compile(
        r#"{
            "lines": [{ "start": 0.0, "end": 2.0, "text": "hold on" }],
            "words": [
                { "word": "hold", "start": 0.0, "end": 0.6 },
                { "word": "on", "start": 0.6, "end": 1.2 }
            ],
            "direction": { "motion": "glitch" }
        }"#,
    );
    let words = &scene.groups[0].words;
    assert_eq!(words[0].entry, EntryStyle::GlitchIn);
    assert_eq!(words[1].entry, EntryStyle::ShatterIn);
    assert_eq!(scene.groups[0].timing.stagger, 0.03);
    assert_eq!(scene.defaults.visual_mode, VisualMode::Explosive);
}

#[test]
fn emphasis_drives_multipliers() {
    let (s1, a1, g1) = emphasis_multipliers(1);
    assert_eq!((s1, g1), (1.0, 1.0));
    assert!((a1 - 0.76).abs() < 1e-12);
    let (s, a, g) = emphasis_multipliers(5);
    assert!((s - 1.32).abs() < 1e-12);
    assert!((a - 1.0).abs() < 1e-12);
    assert!((g - 2.0).abs() < 1e-12);
}

#[test]
fn emotional_arc_shapes_intensity() {
    assert_eq!(arc_intensity(EmotionalArc::Steady, 0.3), 1.0);
    assert!(arc_intensity(EmotionalArc::Rising, 1.0) > arc_intensity(EmotionalArc::Rising, 0.0));
    assert!(arc_intensity(EmotionalArc::Falling, 1.0) < arc_intensity(EmotionalArc::Falling, 0.0));
    assert!(arc_intensity(EmotionalArc::Peak, 0.5) > arc_intensity(EmotionalArc::Peak, 0.05));
}

#[test]
fn case_transform_reaches_display_text() {
    let scene = compile(
        r#"{
            "words": [{ "word": "thunder", "start": 0.0, "end": 1.0 }],
            "direction": { "typography": "bold-impact" }
        }"#,
    );
    let w = &scene.groups[0].words[0];
    assert_eq!(w.text, "THUNDER");
    assert_eq!(w.clean, "thunder");
    assert_eq!(w.font.family, "Anton");
}

#[test]
fn groups_are_sorted_and_positions_stay_inside_padding() {
    let mut words = Vec::new();
    let mut lines = Vec::new();
    for line in 0..6 {
        let base = f64::from(line) * 1.2;
        lines.push(format!(
            r#"{{ "start": {base}, "end": {}, "text": "l" }}"#,
            base + 1.2
        ));
        for k in 0..4 {
            let s = base + f64::from(k) * 0.3;
            words.push(format!(
                r#"{{ "word": "overlapping{k}", "start": {s}, "end": {} }}"#,
                s + 0.3
            ));
        }
    }
    let json = format!(
        r#"{{ "lines": [{}], "words": [{}], "direction": {{ "visual_mode": "explosive" }} }}"#,
        lines.join(","),
        words.join(",")
    );
    let scene = compile(&json);
    assert!(
        scene
            .groups
            .windows(2)
            .all(|g| g[0].start <= g[1].start)
    );
    let bounds = CompileOpts::default().bounds();
    for g in &scene.groups {
        assert!(g.anchor_word_idx < g.words.len());
        for w in &g.words {
            assert!(bounds.contains_point(w.position), "{:?}", w.position);
        }
    }
    assert_eq!(scene.diagnostics.word_count, 24);
}

#[test]
fn compilation_is_deterministic() {
    let a = compile(I_LOVE_YOU);
    let b = compile(I_LOVE_YOU);
    assert_eq!(a, b);
}

#[test]
fn visible_window_extends_by_timing() {
    let scene = compile(I_LOVE_YOU);
    let g = &scene.groups[0];
    let (s, e) = g.visible_window();
    let t = g.timing;
    assert!((s - (0.0 - t.entry_duration - t.stagger * 3.0)).abs() < 1e-12);
    assert!((e - (1.0 + t.linger_duration + t.exit_duration)).abs() < 1e-12);
}

// Groups 0 and 2 of line 0 share anchor slot 0 and are on screen together.
const SHARED_SLOT: &str = r#"{
    "lines": [{ "start": 0.0, "end": 1.5, "text": "we burn, so cold, my heart" }],
    "words": [
        { "word": "we", "start": 0.0, "end": 0.25 },
        { "word": "burn,", "start": 0.25, "end": 0.5 },
        { "word": "so", "start": 0.5, "end": 0.75 },
        { "word": "cold,", "start": 0.75, "end": 1.0 },
        { "word": "my", "start": 1.0, "end": 1.25 },
        { "word": "heart", "start": 1.25, "end": 1.5 }
    ]
}"#;

const FIRST_GROUP_ONLY: &str = r#"{
    "lines": [{ "start": 0.0, "end": 0.5, "text": "we burn," }],
    "words": [
        { "word": "we", "start": 0.0, "end": 0.25 },
        { "word": "burn,", "start": 0.25, "end": 0.5 }
    ]
}"#;

fn anchor_box(g: &CompiledPhraseGroup) -> crate::foundation::core::Rect {
    let a = g.anchor().unwrap();
    crate::foundation::core::Rect::from_center_size(a.position.to_point(), (a.width, a.height))
}

#[test]
fn collision_shifts_reach_compiled_words() {
    let scene = compile(SHARED_SLOT);
    assert_eq!(scene.groups.len(), 3);
    let (g0, g2) = (&scene.groups[0], &scene.groups[2]);
    assert_eq!(anchor_slot(g0.line_index, g0.group_index), 0);
    assert_eq!(anchor_slot(g2.line_index, g2.group_index), 0);
    let (w0, w2) = (g0.visible_window(), g2.visible_window());
    assert!(w0.0 < w2.1 && w2.0 < w0.1);

    assert!(scene.diagnostics.collision_pairs >= 1);
    assert!(scene.diagnostics.collision_converged);
    let overlap = anchor_box(g0).intersect(anchor_box(g2));
    assert!(overlap.width() <= 1e-6 || overlap.height() <= 1e-6, "{overlap:?}");

    // Without neighbours the first group sits at its unshifted layout.
    let alone = compile(FIRST_GROUP_ONLY);
    let before = &alone.groups[0];
    assert_eq!(before.words.len(), g0.words.len());
    let shift = g0.words[0].position - before.words[0].position;
    assert!(shift.hypot() > 1.0, "first group did not move");
    for (moved, orig) in g0.words.iter().zip(&before.words) {
        let d = moved.position - orig.position;
        assert!((d - shift).hypot() < 1e-9, "{} moved by {d:?}, not {shift:?}", moved.text);
    }
}
