use std::f64::consts::{PI, TAU};

use crate::{
    beat::events::{BeatEvent, DEFAULT_HEAT, resolve_physics_kind, synthesize_beats},
    chapter::resolve::{
        CompiledChapter, Typography, chapter_at, default_motion, default_visual_mode,
        resolve_chapters,
    },
    foundation::core::{Canvas, Rgb8, Vec2},
    foundation::error::{LyricError, LyricResult},
    layout::collision::{
        CollisionItem, DEFAULT_BOX_PADDING, DEFAULT_MAX_PASSES, resolve_collisions,
    },
    layout::measure::{FontSpec, TextMeasurer},
    layout::solver::{GroupLayout, LayoutBounds, PlacedWord, layout_group},
    payload::model::{ScenePayload, WordDirective},
    phrase::grouper::{PhraseGroup, group_lines},
    semantic::effects::{SemanticEffect, effect_for, split_letters},
    style::profiles::{AnimationTiming, motion_bundle},
    style::tags::{
        BehaviorStyle, EmitterKind, EmotionalArc, EntryStyle, ExitStyle, KineticClass,
        MotionProfile, PhysicsKind, Texture, TypographyPreset, VisualMetaphor, VisualMode,
    },
    timeline::words::{WordMetaEntry, build_word_timeline},
};

/// Base font size as a fraction of canvas height, per visual mode.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BaseFontRatio {
    pub intimate: f64,
    pub cinematic: f64,
    pub explosive: f64,
}

impl Default for BaseFontRatio {
    fn default() -> Self {
        Self {
            intimate: 0.05,
            cinematic: 0.06,
            explosive: 0.07,
        }
    }
}

impl BaseFontRatio {
    pub fn for_mode(&self, mode: VisualMode) -> f64 {
        match mode {
            VisualMode::Intimate => self.intimate,
            VisualMode::Cinematic => self.cinematic,
            VisualMode::Explosive => self.explosive,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompileOpts {
    pub canvas: Canvas,
    /// Uniform canvas padding every word box must stay inside.
    pub padding: f64,
    pub collision_box_padding: f64,
    pub collision_max_passes: usize,
    pub base_font_ratio: BaseFontRatio,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            padding: 48.0,
            collision_box_padding: DEFAULT_BOX_PADDING,
            collision_max_passes: DEFAULT_MAX_PASSES,
            base_font_ratio: BaseFontRatio::default(),
        }
    }
}

impl CompileOpts {
    pub fn validate(&self) -> LyricResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(LyricError::validation("canvas width/height must be > 0"));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(LyricError::validation("padding must be finite and >= 0"));
        }
        let short_side = f64::from(self.canvas.width.min(self.canvas.height));
        if self.padding * 2.0 >= short_side {
            return Err(LyricError::validation(format!(
                "padding {} leaves no drawable area on a {}x{} canvas",
                self.padding, self.canvas.width, self.canvas.height
            )));
        }
        if !self.collision_box_padding.is_finite() || self.collision_box_padding < 0.0 {
            return Err(LyricError::validation(
                "collision_box_padding must be finite and >= 0",
            ));
        }
        if self.collision_max_passes == 0 {
            return Err(LyricError::validation("collision_max_passes must be >= 1"));
        }
        let r = self.base_font_ratio;
        for (name, v) in [
            ("intimate", r.intimate),
            ("cinematic", r.cinematic),
            ("explosive", r.explosive),
        ] {
            if !v.is_finite() || v <= 0.0 || v >= 1.0 {
                return Err(LyricError::validation(format!(
                    "base_font_ratio.{name} must be in (0, 1)"
                )));
            }
        }
        Ok(())
    }

    pub fn bounds(&self) -> LayoutBounds {
        LayoutBounds {
            canvas: self.canvas,
            padding: self.padding,
        }
    }
}

/// Letter-sequence metadata of one per-character word.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LetterInfo {
    pub index: usize,
    pub total: usize,
    /// Extra entry delay in seconds.
    pub delay: f64,
}

/// A fully resolved on-screen word.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompiledWord {
    /// Display text after the chapter's case transform (one character for letter words).
    pub text: String,
    pub clean: String,
    /// Position of the source word inside its group; drives stagger.
    pub word_index: usize,
    pub start: f64,
    pub end: f64,
    pub position: Vec2,
    pub font: FontSpec,
    pub width: f64,
    pub height: f64,
    pub entry: EntryStyle,
    pub exit: ExitStyle,
    pub behavior: BehaviorStyle,
    pub entry_duration: f64,
    /// Strength handed to the entry and exit curves.
    pub motion_intensity: f64,
    pub emphasis: u8,
    pub kinetic_class: KineticClass,
    pub is_anchor: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    pub alpha_mult: f64,
    pub glow_mult: f64,
    pub color: Option<Rgb8>,
    pub emitter: Option<EmitterKind>,
    pub semantic: Option<VisualMetaphor>,
    pub ghost_trail: bool,
    pub trail: bool,
    pub letter: Option<LetterInfo>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompiledPhraseGroup {
    pub line_index: usize,
    pub group_index: usize,
    pub start: f64,
    pub end: f64,
    /// Index into `words` of the anchor (its first letter when letter-expanded).
    pub anchor_word_idx: usize,
    /// Source words before letter expansion.
    pub word_count: usize,
    pub words: Vec<CompiledWord>,
    pub motion: MotionProfile,
    pub timing: AnimationTiming,
    pub behavior_intensity: f64,
    pub chapter_index: usize,
    pub icon: Option<String>,
}

impl CompiledPhraseGroup {
    /// `[start - entry - stagger * n, end + linger + exit]`.
    pub fn visible_window(&self) -> (f64, f64) {
        extended_window(self.start, self.end, self.word_count, &self.timing)
    }

    pub fn anchor(&self) -> Option<&CompiledWord> {
        self.words.get(self.anchor_word_idx)
    }
}

fn extended_window(start: f64, end: f64, n: usize, timing: &AnimationTiming) -> (f64, f64) {
    (
        start - timing.entry_duration - timing.stagger * n as f64,
        end + timing.linger_duration + timing.exit_duration,
    )
}

/// Global style resolved from the direction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDefaults {
    pub motion: MotionProfile,
    pub typography: Typography,
    pub texture: Texture,
    pub visual_mode: VisualMode,
    pub emotional_arc: EmotionalArc,
    pub physics_kind: PhysicsKind,
    pub heat: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompileDiagnostics {
    pub word_count: usize,
    pub group_count: usize,
    pub collision_pairs: usize,
    pub collision_passes: usize,
    pub collision_converged: bool,
}

/// Immutable output of [`compile_scene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompiledScene {
    pub canvas: Canvas,
    pub padding: f64,
    /// Sorted by start time.
    pub groups: Vec<CompiledPhraseGroup>,
    pub beats: Vec<BeatEvent>,
    pub chapters: Vec<CompiledChapter>,
    pub defaults: SceneDefaults,
    /// Timing constants of the global motion profile.
    pub timing: AnimationTiming,
    pub song_start: f64,
    pub song_end: f64,
    pub diagnostics: CompileDiagnostics,
}

impl CompiledScene {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn duration(&self) -> f64 {
        (self.song_end - self.song_start).max(0.0)
    }

    /// Normalized song position of `t`, clamped to `[0, 1]`.
    pub fn progress_ratio(&self, t: f64) -> f64 {
        song_ratio(t, self.song_start, self.song_end)
    }
}

fn song_ratio(t: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span <= 0.0 || !t.is_finite() {
        0.0
    } else {
        ((t - start) / span).clamp(0.0, 1.0)
    }
}

/// Behavior-intensity multiplier of an emotional arc at normalized progress `r`.
pub fn arc_intensity(arc: EmotionalArc, r: f64) -> f64 {
    let r = r.clamp(0.0, 1.0);
    match arc {
        EmotionalArc::Steady => 1.0,
        EmotionalArc::Rising => 0.6 + 0.6 * r,
        EmotionalArc::Falling => 1.2 - 0.6 * r,
        EmotionalArc::Peak => 0.6 + 0.6 * (PI * r).sin(),
        EmotionalArc::Wave => 0.9 + 0.3 * (TAU * 2.0 * r).sin(),
    }
}

/// Emphasis 1..=5 multipliers: `(scale, alpha, glow)`.
pub fn emphasis_multipliers(emphasis: u8) -> (f64, f64, f64) {
    let e = f64::from(emphasis);
    (
        1.0 + (e - 1.0) * 0.08,
        0.7 + e * 0.06,
        1.0 + (e - 1.0) * 0.25,
    )
}

fn song_span(payload: &ScenePayload) -> (f64, f64) {
    let start = payload
        .song_start
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    let content_end = payload
        .words
        .iter()
        .map(|w| w.end)
        .chain(payload.lines.iter().map(|l| l.end))
        .chain(payload.beat_grid.beats.iter().copied())
        .filter(|v| v.is_finite())
        .fold(start, f64::max);
    let end = payload
        .song_end
        .filter(|v| v.is_finite() && *v > start)
        .unwrap_or(content_end);
    (start, end)
}

/// Styles picked for one source word, before emphasis and letter expansion.
struct WordStyle {
    entry: EntryStyle,
    exit: ExitStyle,
    behavior: BehaviorStyle,
    effect: Option<SemanticEffect>,
}

/// Explicit directive, then metaphor bundle, then storyboard line style, then the motion
/// profile's position-derived default.
fn resolve_word_style(
    word: &WordMetaEntry,
    motion: MotionProfile,
    storyboard: Option<(Option<EntryStyle>, Option<ExitStyle>)>,
) -> WordStyle {
    let bundle = motion_bundle(motion);
    let directive: Option<&WordDirective> = word.directive.as_ref();
    let effect = directive
        .and_then(|d| d.visual_metaphor)
        .map(effect_for);
    let (board_entry, board_exit) = storyboard.unwrap_or((None, None));

    let entry = directive
        .and_then(|d| d.entry)
        .or(effect.map(|fx| fx.entry))
        .or(board_entry)
        .unwrap_or_else(|| bundle.entry_at(word.line_index, word.word_index));
    let exit = directive
        .and_then(|d| d.exit)
        .or(effect.map(|fx| fx.exit))
        .or(board_exit)
        .unwrap_or_else(|| bundle.exit_at(word.line_index, word.word_index));
    let behavior = directive
        .and_then(|d| d.behavior)
        .or(effect.map(|fx| fx.behavior))
        .unwrap_or_else(|| bundle.behavior_at(word.line_index, word.word_index));

    WordStyle {
        entry,
        exit,
        behavior,
        effect,
    }
}

/// Per-group context threaded into word compilation.
struct GroupCtx<'a> {
    motion: MotionProfile,
    timing: AnimationTiming,
    storyboard: Option<(Option<EntryStyle>, Option<ExitStyle>)>,
    bounds: &'a LayoutBounds,
}

/// `word.text` is already the display form.
fn compile_word(
    word: &WordMetaEntry,
    placed: &PlacedWord,
    word_index: usize,
    is_anchor: bool,
    ctx: &GroupCtx<'_>,
    measurer: &mut dyn TextMeasurer,
) -> Vec<CompiledWord> {
    let style = resolve_word_style(word, ctx.motion, ctx.storyboard);
    let emphasis = word.emphasis();
    let (e_scale, e_alpha, e_glow) = emphasis_multipliers(emphasis);
    let fx = style.effect;

    let mut font = placed.font.clone();
    let mut width = placed.width;
    let mut position = placed.position;
    if let Some(weight) = fx
        .and_then(|fx| fx.font_weight)
        .filter(|w| *w != font.weight)
    {
        font.weight = weight;
        width = measurer.measure(&font, &word.text);
        position = ctx.bounds.clamp_center(position, width, placed.height);
    }

    let directive = word.directive.as_ref();
    let base = CompiledWord {
        text: word.text.clone(),
        clean: word.clean.clone(),
        word_index,
        start: word.start,
        end: word.end,
        position,
        font,
        width,
        height: placed.height,
        entry: style.entry,
        exit: style.exit,
        behavior: style.behavior,
        entry_duration: ctx.timing.entry_duration
            * fx.map_or(1.0, |fx| fx.entry_duration_mult),
        motion_intensity: 1.0 + f64::from(emphasis.saturating_sub(1)) * 0.1,
        emphasis,
        kinetic_class: word.kinetic_class(),
        is_anchor,
        scale_x: e_scale * fx.map_or(1.0, |fx| fx.scale_x),
        scale_y: e_scale * fx.map_or(1.0, |fx| fx.scale_y),
        alpha_mult: fx.map_or(e_alpha, |fx| e_alpha.min(fx.max_alpha)),
        glow_mult: e_glow * fx.map_or(1.0, |fx| fx.glow_mult),
        color: fx.and_then(|fx| fx.color),
        emitter: fx.and_then(|fx| fx.emitter),
        semantic: directive.and_then(|d| d.visual_metaphor),
        ghost_trail: directive.is_some_and(|d| d.ghost_trail),
        trail: directive.is_some_and(|d| d.trail),
        letter: None,
    };

    if !directive.is_some_and(|d| d.letter_sequence) {
        return vec![base];
    }
    let letters = split_letters(&word.text, &base.font, measurer);
    if letters.is_empty() {
        return vec![base];
    }
    letters
        .into_iter()
        .map(|chunk| {
            let center = base.position + Vec2::new(chunk.center_offset, 0.0);
            CompiledWord {
                text: chunk.text,
                position: ctx.bounds.clamp_center(center, chunk.width, base.height),
                width: chunk.width,
                letter: Some(LetterInfo {
                    index: chunk.index,
                    total: chunk.total,
                    delay: chunk.delay,
                }),
                ..base.clone()
            }
        })
        .collect()
}

/// Compile a payload into an immutable scene.
///
/// Never fails on payload content: unknown or missing direction fields resolve to
/// defaults, and an empty word list yields a scene without groups. Only invalid `opts`
/// are rejected.
#[tracing::instrument(skip_all, fields(words = payload.words.len(), lines = payload.lines.len()))]
pub fn compile_scene(
    payload: &ScenePayload,
    measurer: &mut dyn TextMeasurer,
    opts: &CompileOpts,
) -> LyricResult<CompiledScene> {
    opts.validate()?;
    let bounds = opts.bounds();
    let direction = &payload.direction;

    let motion = default_motion(direction);
    let visual_mode = default_visual_mode(direction, motion);
    let texture = direction.texture.unwrap_or(Texture::Clean);
    let emotional_arc = direction.emotional_arc.unwrap_or(EmotionalArc::Steady);
    let defaults = SceneDefaults {
        motion,
        typography: Typography::from_preset(
            direction
                .typography
                .unwrap_or(TypographyPreset::CleanModern),
        ),
        texture,
        visual_mode,
        emotional_arc,
        physics_kind: resolve_physics_kind(&direction.physics),
        heat: direction.physics.heat_clamped().unwrap_or(DEFAULT_HEAT),
    };
    let (song_start, song_end) = song_span(payload);

    let chapters = resolve_chapters(direction, &payload.palettes, motion);
    let beats = synthesize_beats(&payload.beat_grid, &direction.physics);

    let lines = build_word_timeline(&payload.lines, &payload.words, &direction.word_directives);
    let mut groups = group_lines(&lines);
    groups.sort_by(|a, b| a.start.total_cmp(&b.start));

    // Layout pass: one chapter lookup per group, case transform applied before measuring.
    let base_size = opts.base_font_ratio.for_mode(visual_mode) * f64::from(opts.canvas.height);
    let mut prepared: Vec<(PhraseGroup, usize, MotionProfile, GroupLayout)> =
        Vec::with_capacity(groups.len());
    for group in groups {
        let chapter_index = chapter_at(&chapters, song_ratio(group.start, song_start, song_end));
        let chapter = &chapters[chapter_index];
        let mut display = group;
        for w in &mut display.words {
            w.text = chapter.typography.case.apply(&w.text);
        }
        let base_font = FontSpec {
            family: chapter.typography.family.clone(),
            weight: chapter.typography.weight,
            size: base_size,
        };
        let layout = layout_group(
            &display,
            visual_mode,
            &bounds,
            &base_font,
            chapter.typography.hero_weight,
            measurer,
        );
        prepared.push((display, chapter_index, chapter.motion, layout));
    }

    let items: Vec<CollisionItem> = prepared
        .iter()
        .map(|(group, _, motion, layout)| {
            let timing = motion_bundle(*motion).timing;
            let (window_start, window_end) =
                extended_window(group.start, group.end, group.words.len(), &timing);
            CollisionItem {
                window_start,
                window_end,
                anchor_box: layout.anchor_box,
                emphasis: group.anchor().emphasis(),
            }
        })
        .collect();
    let outcome = resolve_collisions(
        &items,
        &bounds,
        opts.collision_box_padding,
        opts.collision_max_passes,
    );

    let mut compiled_groups = Vec::with_capacity(prepared.len());
    let mut word_count = 0usize;
    for ((display, chapter_index, group_motion, mut layout), shift) in
        prepared.into_iter().zip(&outcome.shifts)
    {
        layout.translate(*shift, &bounds);

        let bundle = motion_bundle(group_motion);
        let ratio = song_ratio(display.start, song_start, song_end);
        let board = direction
            .storyboard
            .iter()
            .find(|s| s.line_index == display.line_index);
        let ctx = GroupCtx {
            motion: group_motion,
            timing: bundle.timing,
            storyboard: board.map(|s| (s.entry, s.exit)),
            bounds: &bounds,
        };

        let mut words = Vec::with_capacity(display.words.len());
        let mut anchor_word_idx = 0;
        for (k, (word, placed)) in display.words.iter().zip(&layout.words).enumerate() {
            let is_anchor = k == display.anchor_word_idx;
            if is_anchor {
                anchor_word_idx = words.len();
            }
            words.extend(compile_word(word, placed, k, is_anchor, &ctx, measurer));
        }
        word_count += display.words.len();

        compiled_groups.push(CompiledPhraseGroup {
            line_index: display.line_index,
            group_index: display.group_index,
            start: display.start,
            end: display.end,
            anchor_word_idx,
            word_count: display.words.len(),
            words,
            motion: group_motion,
            timing: bundle.timing,
            behavior_intensity: bundle.behavior_intensity * arc_intensity(emotional_arc, ratio),
            chapter_index,
            icon: board.and_then(|s| s.icon.clone()),
        });
    }

    let diagnostics = CompileDiagnostics {
        word_count,
        group_count: compiled_groups.len(),
        collision_pairs: outcome.candidate_pairs,
        collision_passes: outcome.passes,
        collision_converged: outcome.converged,
    };
    tracing::debug!(
        groups = diagnostics.group_count,
        chapters = chapters.len(),
        beats = beats.len(),
        passes = diagnostics.collision_passes,
        converged = diagnostics.collision_converged,
        "compiled scene"
    );

    Ok(CompiledScene {
        canvas: opts.canvas,
        padding: opts.padding,
        groups: compiled_groups,
        beats,
        chapters,
        defaults,
        timing: motion_bundle(motion).timing,
        song_start,
        song_end,
        diagnostics,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
