use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{LyricError, LyricResult};
use crate::payload::lenient;
use crate::style::tags::{
    Atmosphere, BehaviorStyle, EmotionalArc, EntryStyle, ExitStyle, KineticClass, MotionProfile,
    PalettePreset, PhysicsKind, ShotType, Texture, TypographyPreset, VisualMetaphor, VisualMode,
};

/// Sections beyond this count are ignored.
pub const MAX_SECTIONS: usize = 12;

/// Everything the compiler consumes for one song.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePayload {
    #[serde(default, deserialize_with = "lenient::list")]
    pub lines: Vec<LyricLine>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub words: Vec<TimedWord>,
    #[serde(default, deserialize_with = "lenient::or_default", alias = "beat_grid")]
    pub beat_grid: BeatGrid,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub direction: Direction,
    #[serde(default, deserialize_with = "lenient::list")]
    pub palettes: Vec<Palette>,
    #[serde(default, deserialize_with = "lenient::value", alias = "song_start")]
    pub song_start: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value", alias = "song_end")]
    pub song_end: Option<f64>,
}

impl ScenePayload {
    /// Parse a payload. Only a document that is not a JSON object at all is rejected.
    pub fn from_json(s: &str) -> LyricResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> LyricResult<Self> {
        if !value.is_object() {
            return Err(LyricError::payload("scene payload must be a JSON object"));
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub tag: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatGrid {
    #[serde(default)]
    pub bpm: f64,
    #[serde(default, deserialize_with = "lenient::list")]
    pub beats: Vec<f64>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl Default for BeatGrid {
    fn default() -> Self {
        Self {
            bpm: 0.0,
            beats: Vec::new(),
            confidence: default_confidence(),
        }
    }
}

/// High-level style choices. Every field is optional and resolves to a named default.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Direction {
    #[serde(default, deserialize_with = "lenient::tag")]
    pub motion: Option<MotionProfile>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub typography: Option<TypographyPreset>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub texture: Option<Texture>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub palette: Option<PalettePreset>,
    #[serde(default, deserialize_with = "lenient::tag", alias = "emotional_arc")]
    pub emotional_arc: Option<EmotionalArc>,
    #[serde(default, deserialize_with = "lenient::tag", alias = "visual_mode")]
    pub visual_mode: Option<VisualMode>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub physics: PhysicsProfile,
    #[serde(default, deserialize_with = "lenient::list")]
    pub sections: Vec<Section>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub storyboard: Vec<StoryboardEntry>,
    /// Keyed by word text; matched against the normalized (clean) form.
    #[serde(default, deserialize_with = "lenient::map", alias = "word_directives")]
    pub word_directives: BTreeMap<String, WordDirective>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsProfile {
    #[serde(default, deserialize_with = "lenient::tag")]
    pub kind: Option<PhysicsKind>,
    /// 0..1 energy scalar.
    #[serde(default, deserialize_with = "lenient::value")]
    pub heat: Option<f64>,
}

impl PhysicsProfile {
    pub fn heat_clamped(&self) -> Option<f64> {
        self.heat.filter(|h| h.is_finite()).map(|h| h.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(alias = "start_ratio")]
    pub start_ratio: f64,
    #[serde(alias = "end_ratio")]
    pub end_ratio: f64,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub motion: Option<MotionProfile>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub texture: Option<Texture>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub typography: Option<TypographyPreset>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub atmosphere: Option<Atmosphere>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub shot: Option<ShotType>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardEntry {
    #[serde(alias = "line_index")]
    pub line_index: usize,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub entry: Option<EntryStyle>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub exit: Option<ExitStyle>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub icon: Option<String>,
}

/// Externally supplied semantic tag for one word.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDirective {
    #[serde(default, deserialize_with = "lenient::value")]
    pub emphasis: Option<f64>,
    #[serde(default, deserialize_with = "lenient::tag", alias = "kinetic_class")]
    pub kinetic_class: Option<KineticClass>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub entry: Option<EntryStyle>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub behavior: Option<BehaviorStyle>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub exit: Option<ExitStyle>,
    #[serde(default, deserialize_with = "lenient::tag", alias = "visual_metaphor")]
    pub visual_metaphor: Option<VisualMetaphor>,
    #[serde(default, alias = "ghost_trail")]
    pub ghost_trail: bool,
    #[serde(default, alias = "letter_sequence")]
    pub letter_sequence: bool,
    #[serde(default)]
    pub trail: bool,
}

pub const MIN_EMPHASIS: u8 = 1;
pub const MAX_EMPHASIS: u8 = 5;

impl WordDirective {
    /// Emphasis rounded and clamped into `1..=5`; missing or non-finite values read as 1.
    pub fn emphasis_level(&self) -> u8 {
        match self.emphasis {
            Some(e) if e.is_finite() => {
                e.round()
                    .clamp(f64::from(MIN_EMPHASIS), f64::from(MAX_EMPHASIS)) as u8
            }
            _ => MIN_EMPHASIS,
        }
    }
}

/// A palette is either a list of colors (`[background, text, accent, ...]`) or an object
/// naming the three roles.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Palette {
    pub background: Option<String>,
    pub text: Option<String>,
    pub accent: Option<String>,
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<String>),
            Obj {
                #[serde(default)]
                background: Option<String>,
                #[serde(default)]
                text: Option<String>,
                #[serde(default)]
                accent: Option<String>,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::List(colors) => {
                let mut it = colors.into_iter();
                Ok(Self {
                    background: it.next(),
                    text: it.next(),
                    accent: it.next(),
                })
            }
            Repr::Obj {
                background,
                text,
                accent,
            } => Ok(Self {
                background,
                text,
                accent,
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/payload/model.rs"]
mod tests;
