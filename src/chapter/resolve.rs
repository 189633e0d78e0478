use crate::{
    foundation::core::Rgb8,
    payload::model::{Direction, MAX_SECTIONS, Palette},
    style::tags::{
        Atmosphere, CaseTransform, MotionProfile, PalettePreset, ShotType, Texture,
        TypographyPreset, VisualMode,
    },
};

const HOT_HEAT: f64 = 0.75;
const COLD_HEAT: f64 = 0.3;

/// Resolved font choice for a chapter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Typography {
    pub preset: TypographyPreset,
    pub family: String,
    pub weight: u16,
    pub hero_weight: u16,
    pub case: CaseTransform,
}

impl Typography {
    pub fn from_preset(preset: TypographyPreset) -> Self {
        let (family, weight, hero_weight, case) = match preset {
            TypographyPreset::CleanModern => ("Inter", 500, 800, CaseTransform::AsWritten),
            TypographyPreset::BoldImpact => ("Anton", 700, 900, CaseTransform::Upper),
            TypographyPreset::ElegantSerif => {
                ("Playfair Display", 400, 700, CaseTransform::AsWritten)
            }
            TypographyPreset::RawHandwritten => ("Caveat", 400, 700, CaseTransform::Lower),
            TypographyPreset::TechMono => ("JetBrains Mono", 400, 700, CaseTransform::Upper),
            TypographyPreset::CondensedDisplay => ("Oswald", 500, 700, CaseTransform::Upper),
        };
        Self {
            preset,
            family: family.to_string(),
            weight,
            hero_weight,
            case,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedPalette {
    pub background: Rgb8,
    pub text: Rgb8,
    pub accent: Rgb8,
}

impl ResolvedPalette {
    pub const FALLBACK: Self = Self {
        background: Rgb8::new(0x0a, 0x0a, 0x0f),
        text: Rgb8::new(0xf5, 0xf5, 0xf5),
        accent: Rgb8::new(0xff, 0x4d, 0x6d),
    };

    pub const fn from_preset(preset: PalettePreset) -> Self {
        let (background, text, accent) = match preset {
            PalettePreset::Noir => (
                Rgb8::new(0x0a, 0x0a, 0x0a),
                Rgb8::new(0xf2, 0xf2, 0xf2),
                Rgb8::new(0xc0, 0xc0, 0xc0),
            ),
            PalettePreset::Ember => (
                Rgb8::new(0x14, 0x08, 0x05),
                Rgb8::new(0xff, 0xe8, 0xd6),
                Rgb8::new(0xff, 0x6b, 0x2c),
            ),
            PalettePreset::Ocean => (
                Rgb8::new(0x04, 0x14, 0x1f),
                Rgb8::new(0xe0, 0xf4, 0xff),
                Rgb8::new(0x2e, 0xc4, 0xff),
            ),
            PalettePreset::Neon => (
                Rgb8::new(0x0b, 0x00, 0x18),
                Rgb8::new(0xf8, 0xf0, 0xff),
                Rgb8::new(0xff, 0x2b, 0xd6),
            ),
            PalettePreset::Dawn => (
                Rgb8::new(0x1a, 0x10, 0x20),
                Rgb8::new(0xff, 0xf1, 0xe6),
                Rgb8::new(0xff, 0xb3, 0x8a),
            ),
            PalettePreset::Forest => (
                Rgb8::new(0x07, 0x14, 0x0c),
                Rgb8::new(0xe9, 0xf5, 0xe9),
                Rgb8::new(0x6f, 0xcf, 0x73),
            ),
        };
        Self {
            background,
            text,
            accent,
        }
    }

    /// Unparsable or missing roles fall back role by role.
    pub fn from_payload(p: &Palette) -> Self {
        let pick = |raw: &Option<String>, fallback: Rgb8| {
            raw.as_deref().and_then(Rgb8::parse_hex).unwrap_or(fallback)
        };
        Self {
            background: pick(&p.background, Self::FALLBACK.background),
            text: pick(&p.text, Self::FALLBACK.text),
            accent: pick(&p.accent, Self::FALLBACK.accent),
        }
    }
}

pub const fn shot_zoom(shot: ShotType) -> f64 {
    match shot {
        ShotType::ExtremeCloseUp => 1.6,
        ShotType::CloseUp => 1.3,
        ShotType::Medium => 1.0,
        ShotType::Wide => 0.85,
        ShotType::ExtremeWide => 0.7,
    }
}

pub const fn texture_atmosphere(texture: Texture) -> Atmosphere {
    match texture {
        Texture::Clean => Atmosphere::Clean,
        Texture::Grain | Texture::Haze => Atmosphere::Haze,
        Texture::Film | Texture::Fire => Atmosphere::Golden,
        Texture::Glitch | Texture::Neon => Atmosphere::Neon,
        Texture::Storm => Atmosphere::Storm,
    }
}

/// Motion profile when none is named: inferred from physics heat, else fluid.
pub fn default_motion(direction: &Direction) -> MotionProfile {
    if let Some(m) = direction.motion {
        return m;
    }
    match direction.physics.heat_clamped() {
        Some(h) if h > HOT_HEAT => MotionProfile::Weighted,
        Some(h) if h < COLD_HEAT => MotionProfile::Drift,
        _ => MotionProfile::Fluid,
    }
}

/// Visual mode when none is named: texture hints first, then motion hints, else cinematic.
pub fn default_visual_mode(direction: &Direction, motion: MotionProfile) -> VisualMode {
    if let Some(mode) = direction.visual_mode {
        return mode;
    }
    match direction.texture {
        Some(Texture::Glitch | Texture::Fire | Texture::Storm) => return VisualMode::Explosive,
        Some(Texture::Haze | Texture::Film) => return VisualMode::Intimate,
        _ => {}
    }
    match motion {
        MotionProfile::Weighted | MotionProfile::Glitch => VisualMode::Explosive,
        MotionProfile::Drift => VisualMode::Intimate,
        MotionProfile::Fluid | MotionProfile::Elastic => VisualMode::Cinematic,
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompiledChapter {
    pub index: usize,
    pub start_ratio: f64,
    pub end_ratio: f64,
    pub shot: ShotType,
    pub zoom: f64,
    pub typography: Typography,
    pub atmosphere: Atmosphere,
    pub palette: ResolvedPalette,
    pub motion: MotionProfile,
    pub texture: Texture,
}

impl CompiledChapter {
    pub fn contains_ratio(&self, ratio: f64) -> bool {
        ratio >= self.start_ratio && ratio < self.end_ratio
    }
}

fn palette_for(index: usize, direction: &Direction, palettes: &[Palette]) -> ResolvedPalette {
    match palettes {
        [] => direction
            .palette
            .map_or(ResolvedPalette::FALLBACK, ResolvedPalette::from_preset),
        [only] => ResolvedPalette::from_payload(only),
        many => ResolvedPalette::from_payload(&many[index % many.len()]),
    }
}

/// One chapter per usable section, ordered by start ratio. A direction without sections
/// yields a single chapter spanning the whole song.
pub fn resolve_chapters(
    direction: &Direction,
    palettes: &[Palette],
    motion: MotionProfile,
) -> Vec<CompiledChapter> {
    let typography = direction
        .typography
        .unwrap_or(TypographyPreset::CleanModern);
    let texture = direction.texture.unwrap_or(Texture::Clean);

    let mut spans: Vec<_> = direction
        .sections
        .iter()
        .filter(|s| s.start_ratio.is_finite() && s.end_ratio.is_finite())
        .map(|s| {
            let start = s.start_ratio.clamp(0.0, 1.0);
            let end = s.end_ratio.clamp(0.0, 1.0).max(start);
            (start, end, s)
        })
        .collect();
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    if spans.len() > MAX_SECTIONS {
        tracing::warn!(
            sections = spans.len(),
            kept = MAX_SECTIONS,
            "dropping sections past the limit"
        );
        spans.truncate(MAX_SECTIONS);
    }

    let chapters: Vec<CompiledChapter> = if spans.is_empty() {
        let shot = ShotType::Medium;
        vec![CompiledChapter {
            index: 0,
            start_ratio: 0.0,
            end_ratio: 1.0,
            shot,
            zoom: shot_zoom(shot),
            typography: Typography::from_preset(typography),
            atmosphere: texture_atmosphere(texture),
            palette: palette_for(0, direction, palettes),
            motion,
            texture,
        }]
    } else {
        spans
            .into_iter()
            .enumerate()
            .map(|(index, (start_ratio, end_ratio, s))| {
                let shot = s.shot.unwrap_or(ShotType::Medium);
                let texture = s.texture.unwrap_or(texture);
                CompiledChapter {
                    index,
                    start_ratio,
                    end_ratio,
                    shot,
                    zoom: shot_zoom(shot),
                    typography: Typography::from_preset(s.typography.unwrap_or(typography)),
                    atmosphere: s.atmosphere.unwrap_or_else(|| texture_atmosphere(texture)),
                    palette: palette_for(index, direction, palettes),
                    motion: s.motion.unwrap_or(motion),
                    texture,
                }
            })
            .collect()
    };
    tracing::debug!(chapters = chapters.len(), "resolved chapters");
    chapters
}

/// Index of the chapter covering `ratio`: the last one starting at or before it.
pub fn chapter_at(chapters: &[CompiledChapter], ratio: f64) -> usize {
    chapters
        .iter()
        .rposition(|c| c.start_ratio <= ratio)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/chapter/resolve.rs"]
mod tests;
