use crate::{
    animation::behavior::behavior,
    animation::entry::entry,
    animation::exit::{LetterSlot, exit},
    animation::transform::WordTransform,
    beat::events::beat_phase,
    chapter::resolve::{ResolvedPalette, chapter_at},
    compile::compiler::{CompiledPhraseGroup, CompiledScene, CompiledWord},
    foundation::core::{Rgb8, Vec2},
    layout::measure::FontSpec,
    style::tags::{Atmosphere, EmitterKind},
};

/// Physical state produced by an external beat-reactive integrator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhysicsState {
    pub heat: f64,
    pub glow: f64,
    pub shake: f64,
    pub velocity: f64,
    pub rotation: f64,
    pub scale: f64,
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self {
            heat: 0.0,
            glow: 0.0,
            shake: 0.0,
            velocity: 0.0,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Beat-reactive spring system driven once per rendered frame.
pub trait PhysicsIntegrator {
    /// Advance one frame and report the new state.
    fn tick(&mut self) -> PhysicsState;
    fn on_beat(&mut self, strength: f64, is_downbeat: bool);
    /// Called on loop wrap and backward seeks.
    fn reset(&mut self);
}

/// Integrator that never moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPhysics;

impl PhysicsIntegrator for NullPhysics {
    fn tick(&mut self) -> PhysicsState {
        PhysicsState::default()
    }

    fn on_beat(&mut self, _strength: f64, _is_downbeat: bool) {}

    fn reset(&mut self) {}
}

impl<P: PhysicsIntegrator + ?Sized> PhysicsIntegrator for Box<P> {
    fn tick(&mut self) -> PhysicsState {
        (**self).tick()
    }

    fn on_beat(&mut self, strength: f64, is_downbeat: bool) {
        (**self).on_beat(strength, is_downbeat)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordPhase {
    Entry,
    Hold,
    Exit,
}

/// One visible word in a sampled frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordFrame {
    pub group_index: usize,
    pub word_index: usize,
    pub text: String,
    pub phase: WordPhase,
    /// Placed center plus the transform offset.
    pub position: Vec2,
    pub font: FontSpec,
    pub transform: WordTransform,
    pub color: Rgb8,
    pub emitter: Option<EmitterKind>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSample {
    pub time: f64,
    pub progress: f64,
    pub chapter_index: usize,
    pub zoom: f64,
    pub atmosphere: Atmosphere,
    pub palette: ResolvedPalette,
    /// `None` when the beat grid has fewer than two beats.
    pub beat_phase: Option<f64>,
    pub physics: PhysicsState,
    pub words: Vec<WordFrame>,
}

/// Per-word timeline derived from its group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordSchedule {
    pub entry_start: f64,
    pub entry_end: f64,
    pub exit_start: f64,
    pub exit_end: f64,
}

pub fn word_schedule(group: &CompiledPhraseGroup, word: &CompiledWord) -> WordSchedule {
    let t = &group.timing;
    let n = group.word_count as f64;
    let k = word.word_index as f64;
    let delay = word.letter.map_or(0.0, |l| l.delay);
    let entry_start = group.start - t.entry_duration - t.stagger * n + t.stagger * k + delay;
    let exit_start = group.end + t.linger_duration;
    WordSchedule {
        entry_start,
        entry_end: entry_start + word.entry_duration.max(0.0),
        exit_start,
        exit_end: exit_start + t.exit_duration.max(0.0),
    }
}

fn progress(t: f64, start: f64, end: f64) -> f64 {
    if end > start {
        ((t - start) / (end - start)).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

fn sample_word(
    group: &CompiledPhraseGroup,
    word: &CompiledWord,
    t: f64,
    phase: Option<f64>,
    physics: &PhysicsState,
) -> Option<(WordPhase, WordTransform)> {
    let s = word_schedule(group, word);
    if t < s.entry_start || t >= s.exit_end {
        return None;
    }
    let (stage, curve) = if t >= s.exit_start {
        let letter = word.letter.map(|l| LetterSlot {
            index: l.index,
            total: l.total,
        });
        (
            WordPhase::Exit,
            exit(
                word.exit,
                progress(t, s.exit_start, s.exit_end),
                word.motion_intensity,
                letter,
            ),
        )
    } else if t < s.entry_end {
        (
            WordPhase::Entry,
            entry(
                word.entry,
                progress(t, s.entry_start, s.entry_end),
                word.motion_intensity,
            ),
        )
    } else {
        let intensity = group.behavior_intensity * (1.0 + 0.5 * physics.heat.clamp(0.0, 1.0));
        (
            WordPhase::Hold,
            behavior(word.behavior, t, word.start, phase, intensity),
        )
    };

    let semantic_glow = if word.semantic.is_some() {
        1.0 + physics.glow.max(0.0)
    } else {
        1.0
    };
    let base = WordTransform {
        scale_x: word.scale_x,
        scale_y: word.scale_y,
        alpha: word.alpha_mult,
        glow_mult: word.glow_mult * semantic_glow,
        ..WordTransform::IDENTITY
    };
    let out = curve.compose(base).sanitized();
    out.is_visible().then_some((stage, out))
}

/// Sample the scene at `t` seconds. Pure: the same inputs always yield the same frame.
pub fn sample_scene(scene: &CompiledScene, t: f64, physics: &PhysicsState) -> FrameSample {
    let progress = scene.progress_ratio(t);
    let chapter_index = chapter_at(&scene.chapters, progress);
    let chapter = scene.chapters.get(chapter_index);
    let palette = chapter.map_or(ResolvedPalette::FALLBACK, |c| c.palette);
    let phase = beat_phase(&scene.beats, t);

    let mut words = Vec::new();
    for (gi, group) in scene.groups.iter().enumerate() {
        let (w_start, w_end) = group.visible_window();
        if t < w_start || t >= w_end {
            continue;
        }
        let group_palette = scene
            .chapters
            .get(group.chapter_index)
            .map_or(palette, |c| c.palette);
        for (wi, word) in group.words.iter().enumerate() {
            let Some((stage, transform)) = sample_word(group, word, t, phase, physics) else {
                continue;
            };
            let color = word.color.unwrap_or(if word.is_anchor {
                group_palette.accent
            } else {
                group_palette.text
            });
            words.push(WordFrame {
                group_index: gi,
                word_index: wi,
                text: word.text.clone(),
                phase: stage,
                position: word.position + transform.offset(),
                font: word.font.clone(),
                transform,
                color,
                emitter: word.emitter,
            });
        }
    }

    FrameSample {
        time: t,
        progress,
        chapter_index,
        zoom: chapter.map_or(1.0, |c| c.zoom),
        atmosphere: chapter.map_or(Atmosphere::Clean, |c| c.atmosphere),
        palette,
        beat_phase: phase,
        physics: *physics,
        words,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/sampler.rs"]
mod tests;
