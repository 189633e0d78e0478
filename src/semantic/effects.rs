use crate::{
    foundation::core::Rgb8,
    layout::measure::{FontSpec, TextMeasurer},
    style::tags::{BehaviorStyle, EmitterKind, EntryStyle, ExitStyle, VisualMetaphor},
};

/// Per-letter start delay for letter-sequence words, in seconds.
pub const LETTER_DELAY: f64 = 0.012;

/// Override bundle attached to a visual metaphor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SemanticEffect {
    pub entry: EntryStyle,
    pub exit: ExitStyle,
    pub behavior: BehaviorStyle,
    pub color: Option<Rgb8>,
    pub glow_mult: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub emitter: Option<EmitterKind>,
    pub max_alpha: f64,
    pub entry_duration_mult: f64,
    pub font_weight: Option<u16>,
}

#[allow(clippy::too_many_arguments)]
const fn bundle(
    entry: EntryStyle,
    exit: ExitStyle,
    behavior: BehaviorStyle,
    color: Option<Rgb8>,
    glow_mult: f64,
    scale: (f64, f64),
    emitter: Option<EmitterKind>,
    max_alpha: f64,
    entry_duration_mult: f64,
    font_weight: Option<u16>,
) -> SemanticEffect {
    SemanticEffect {
        entry,
        exit,
        behavior,
        color,
        glow_mult,
        scale_x: scale.0,
        scale_y: scale.1,
        emitter,
        max_alpha,
        entry_duration_mult,
        font_weight,
    }
}

pub const fn effect_for(metaphor: VisualMetaphor) -> SemanticEffect {
    use BehaviorStyle as B;
    use EmitterKind as K;
    use EntryStyle as E;
    use ExitStyle as X;

    match metaphor {
        VisualMetaphor::EmberBurst => bundle(
            E::Ignite,
            X::BurnOut,
            B::Flicker,
            Some(Rgb8::new(0xff, 0x7a, 0x2f)),
            1.8,
            (1.1, 1.1),
            Some(K::Embers),
            1.0,
            0.9,
            Some(800),
        ),
        VisualMetaphor::FrostForm => bundle(
            E::Materialize,
            X::FreezeCrack,
            B::Freeze,
            Some(Rgb8::new(0xbf, 0xe6, 0xff)),
            1.3,
            (1.0, 1.0),
            Some(K::Frost),
            0.95,
            1.4,
            Some(300),
        ),
        VisualMetaphor::GravityDrop => bundle(
            E::DropIn,
            X::GravityFall,
            B::Contract,
            None,
            1.0,
            (1.0, 1.05),
            Some(K::Dust),
            1.0,
            0.8,
            Some(900),
        ),
        VisualMetaphor::Fracture => bundle(
            E::ShatterIn,
            X::ScatterLetters,
            B::Vibrate,
            Some(Rgb8::new(0xe8, 0xe8, 0xe8)),
            1.2,
            (1.0, 1.0),
            Some(K::Shards),
            1.0,
            0.9,
            Some(800),
        ),
        VisualMetaphor::Shockwave => bundle(
            E::SlamDown,
            X::Explode,
            B::Pulse,
            None,
            1.6,
            (1.2, 1.2),
            Some(K::Ripple),
            1.0,
            0.7,
            Some(900),
        ),
        VisualMetaphor::VoidAbsorb => bundle(
            E::BlurIn,
            X::Implode,
            B::Contract,
            Some(Rgb8::new(0x6b, 0x5b, 0x95)),
            0.6,
            (0.95, 0.95),
            Some(K::Void),
            0.85,
            1.3,
            Some(300),
        ),
        VisualMetaphor::Heartbeat => bundle(
            E::PopIn,
            X::Shrink,
            B::Pulse,
            Some(Rgb8::new(0xff, 0x4d, 0x6d)),
            1.4,
            (1.05, 1.05),
            None,
            1.0,
            1.0,
            None,
        ),
        VisualMetaphor::Echo => bundle(
            E::FadeIn,
            X::Linger,
            B::FocusPulse,
            None,
            1.1,
            (1.0, 1.0),
            Some(K::Ripple),
            0.9,
            1.2,
            None,
        ),
        VisualMetaphor::SmokeDrift => bundle(
            E::Whisper,
            X::Evaporate,
            B::Float,
            Some(Rgb8::new(0xb0, 0xb0, 0xb0)),
            0.9,
            (1.0, 1.0),
            Some(K::Smoke),
            0.8,
            1.5,
            Some(300),
        ),
        VisualMetaphor::ElectricArc => bundle(
            E::GlitchIn,
            X::GlitchOut,
            B::Flicker,
            Some(Rgb8::new(0x7d, 0xf9, 0xff)),
            2.0,
            (1.0, 1.0),
            Some(K::Sparks),
            1.0,
            0.6,
            Some(700),
        ),
        VisualMetaphor::LiquidFlow => bundle(
            E::RiseUp,
            X::Melt,
            B::Float,
            Some(Rgb8::new(0x4f, 0xc3, 0xf7)),
            1.1,
            (1.0, 1.1),
            None,
            0.95,
            1.3,
            None,
        ),
        VisualMetaphor::Hush => bundle(
            E::Whisper,
            X::Dissolve,
            B::Freeze,
            None,
            0.8,
            (0.9, 0.9),
            None,
            0.6,
            1.6,
            Some(200),
        ),
        VisualMetaphor::Ascend => bundle(
            E::RiseUp,
            X::FadeUp,
            B::Float,
            Some(Rgb8::new(0xff, 0xf3, 0xc4)),
            1.4,
            (1.0, 1.0),
            Some(K::Light),
            1.0,
            1.1,
            None,
        ),
        VisualMetaphor::Collapse => bundle(
            E::Stomp,
            X::Crumble,
            B::Contract,
            None,
            1.0,
            (1.0, 0.95),
            Some(K::Dust),
            1.0,
            0.8,
            Some(900),
        ),
        VisualMetaphor::Blaze => bundle(
            E::Ignite,
            X::BurnOut,
            B::Vibrate,
            Some(Rgb8::new(0xff, 0xb0, 0x20)),
            2.2,
            (1.15, 1.15),
            Some(K::Embers),
            1.0,
            0.7,
            Some(900),
        ),
        VisualMetaphor::Tremor => bundle(
            E::Stomp,
            X::Static,
            B::Vibrate,
            None,
            1.1,
            (1.0, 1.0),
            Some(K::Dust),
            1.0,
            0.8,
            Some(800),
        ),
        VisualMetaphor::DreamHaze => bundle(
            E::Bloom,
            X::BlurOut,
            B::Float,
            Some(Rgb8::new(0xd8, 0xb4, 0xfe)),
            1.3,
            (1.0, 1.0),
            Some(K::Light),
            0.85,
            1.5,
            Some(300),
        ),
        VisualMetaphor::StaticNoise => bundle(
            E::FlickerIn,
            X::Static,
            B::Flicker,
            Some(Rgb8::new(0xcf, 0xd8, 0xdc)),
            1.0,
            (1.0, 1.0),
            Some(K::Sparks),
            0.9,
            0.7,
            Some(500),
        ),
        VisualMetaphor::Radiance => bundle(
            E::Bloom,
            X::Evaporate,
            B::Pulse,
            Some(Rgb8::new(0xff, 0xf8, 0xe1)),
            2.0,
            (1.1, 1.1),
            Some(K::Light),
            1.0,
            1.1,
            Some(600),
        ),
    }
}

/// One character of a letter-sequence word.
#[derive(Clone, Debug, PartialEq)]
pub struct LetterChunk {
    pub text: String,
    pub index: usize,
    pub total: usize,
    pub delay: f64,
    /// Horizontal offset of the letter's center from the parent word's center.
    pub center_offset: f64,
    pub width: f64,
}

/// Split `text` into per-letter chunks laid out left to right around the word's center.
///
/// Whitespace is dropped; every remaining character becomes one chunk.
pub fn split_letters(
    text: &str,
    font: &FontSpec,
    measurer: &mut dyn TextMeasurer,
) -> Vec<LetterChunk> {
    let letters: Vec<String> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(String::from)
        .collect();
    let total = letters.len();
    let widths: Vec<f64> = letters.iter().map(|l| measurer.measure(font, l)).collect();
    let run: f64 = widths.iter().sum();

    let mut cursor = -run * 0.5;
    letters
        .into_iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (text, width))| {
            let chunk = LetterChunk {
                text,
                index,
                total,
                delay: index as f64 * LETTER_DELAY,
                center_offset: cursor + width * 0.5,
                width,
            };
            cursor += width;
            chunk
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/semantic/effects.rs"]
mod tests;
