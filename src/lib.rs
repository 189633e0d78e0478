//! Wavyte Lyrics compiles timed lyrics into a kinetic-typography timeline.
//!
//! A [`ScenePayload`] (lyric lines, timed words, a beat grid, and a high-level style
//! direction) goes in; an immutable [`CompiledScene`] comes out. The scene holds every word's
//! placement, resolved styles, and timing, and can be sampled at any timestamp to get a
//! [`FrameSample`] a renderer can draw.
//!
//! # Pipeline overview
//!
//! 1. **Timeline**: raw words -> per-line [`WordMetaEntry`] lists with matched directives
//! 2. **Group**: lines -> [`PhraseGroup`]s with one anchor word each
//! 3. **Layout**: groups -> slot-based placement, then compile-time collision resolution
//! 4. **Resolve**: motion profiles, semantic effects, chapters, and beat events
//! 5. **Sample**: `CompiledScene + t -> FrameSample` through the pure curve library
//!
//! Live preview ([`Playhead`]) and offline export ([`ExportStepper`]) drive the same sampler
//! over a shared `Arc<CompiledScene>`, so both produce identical frames for the same times.
//!
//! `unsafe` is forbidden in this crate.
#![forbid(unsafe_code)]

mod animation;
mod beat;
mod chapter;
mod compile;
mod eval;
mod foundation;
mod layout;
mod payload;
mod phrase;
mod semantic;
mod session;
mod style;
mod timeline;

pub use animation::behavior::behavior;
pub use animation::ease::Ease;
pub use animation::entry::entry;
pub use animation::exit::{FREEZE_CRACK_HOLD, LINGER_ALPHA, LetterSlot, exit};
pub use animation::transform::WordTransform;
pub use beat::events::{BeatEvent, beat_phase, resolve_physics_kind, synthesize_beats};
pub use chapter::resolve::{
    CompiledChapter, ResolvedPalette, Typography, chapter_at, default_motion,
    default_visual_mode, resolve_chapters, shot_zoom,
};
pub use compile::compiler::{
    BaseFontRatio, CompileDiagnostics, CompileOpts, CompiledPhraseGroup, CompiledScene,
    CompiledWord, LetterInfo, SceneDefaults, arc_intensity, compile_scene, emphasis_multipliers,
};
pub use compile::fingerprint::{SceneFingerprint, fingerprint_json, fingerprint_of};
pub use eval::sampler::{
    FrameSample, NullPhysics, PhysicsIntegrator, PhysicsState, WordFrame, WordPhase,
    WordSchedule, sample_scene, word_schedule,
};
pub use foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgb8, Vec2,
};
pub use foundation::error::{LyricError, LyricResult};
pub use layout::collision::{
    CollisionItem, CollisionOutcome, resolve_collisions, time_overlapping_pairs,
};
pub use layout::measure::{ApproxMeasurer, FontSpec, ParleyMeasurer, TextMeasurer};
pub use layout::solver::{GroupLayout, LayoutBounds, PlacedWord, anchor_slot, layout_group};
pub use payload::model::{
    BeatGrid, Direction, LyricLine, Palette, PhysicsProfile, ScenePayload, Section,
    StoryboardEntry, TimedWord, WordDirective,
};
pub use phrase::grouper::{PhraseGroup, anchor_score, group_line, group_lines};
pub use semantic::effects::{LetterChunk, SemanticEffect, effect_for, split_letters};
pub use session::export::{CancelToken, ExportStats, ExportStepper};
pub use session::playhead::Playhead;
pub use session::scene_session::SceneSession;
pub use style::profiles::{AnimationTiming, MotionBundle, motion_bundle};
pub use style::tags::{
    Atmosphere, BehaviorStyle, CaseTransform, EmitterKind, EmotionalArc, EntryStyle, ExitStyle,
    KineticClass, MotionProfile, PalettePreset, PhysicsKind, ShotType, Texture, TypographyPreset,
    VisualMetaphor, VisualMode,
};
pub use timeline::words::{WordMetaEntry, build_word_timeline, clean_word};
