use std::f64::consts::PI;

use crate::{
    animation::ease::{out_back, out_cubic, out_elastic},
    animation::transform::WordTransform,
    foundation::math::pseudo_sign,
    style::tags::EntryStyle,
};

/// Entry curve for `style` at `progress`.
///
/// Every style starts fully transparent at `progress == 0` and lands exactly on
/// [`WordTransform::IDENTITY`] at `progress == 1`. Jittery styles read their noise from
/// [`pseudo_sign`] keyed on a quantized progress so the curve scrubs deterministically.
pub fn entry(style: EntryStyle, progress: f64, intensity: f64) -> WordTransform {
    let p = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    if p >= 1.0 {
        return WordTransform::IDENTITY;
    }
    let i = intensity.max(0.0);
    let id = WordTransform::IDENTITY;

    let t = match style {
        EntryStyle::SlamDown => {
            let e = out_back(p);
            let flash = if p > 0.7 {
                ((p - 0.7) / 0.3 * PI).sin() * 1.5 * i
            } else {
                0.0
            };
            WordTransform {
                offset_y: -(1.0 - e) * 120.0 * i,
                scale_x: 1.0 + (1.0 - e) * 0.4 * i,
                scale_y: 1.0 + (1.0 - e) * 0.4 * i,
                alpha: (p * 4.0).min(1.0),
                glow_mult: 1.0 + flash,
                ..id
            }
        }
        EntryStyle::Stomp => {
            let e = out_cubic(p);
            let squash = if p > 0.8 {
                ((p - 0.8) / 0.2 * PI).sin() * 0.15 * i
            } else {
                0.0
            };
            WordTransform {
                offset_y: -(1.0 - e) * 80.0 * i,
                scale_x: 1.0 + squash,
                scale_y: 1.0 - squash,
                alpha: (p * 5.0).min(1.0),
                ..id
            }
        }
        EntryStyle::DropIn => {
            let e = out_cubic(p);
            WordTransform {
                offset_y: -(1.0 - e) * 200.0 * i,
                alpha: e,
                ..id
            }
        }
        EntryStyle::RiseUp => {
            let e = out_cubic(p);
            WordTransform {
                offset_y: (1.0 - e) * 60.0 * i,
                alpha: e,
                ..id
            }
        }
        EntryStyle::Materialize => {
            let e = out_cubic(p);
            WordTransform {
                scale_x: 0.85 + 0.15 * e,
                scale_y: 0.85 + 0.15 * e,
                alpha: e,
                glow_mult: 1.0 + (1.0 - p) * 2.0 * i,
                blur: (1.0 - e) * 8.0 * i,
                ..id
            }
        }
        EntryStyle::SlideLeft => {
            let e = out_cubic(p);
            WordTransform {
                offset_x: (1.0 - e) * 240.0 * i,
                alpha: e,
                ..id
            }
        }
        EntryStyle::SlideRight => {
            let e = out_cubic(p);
            WordTransform {
                offset_x: -(1.0 - e) * 240.0 * i,
                alpha: e,
                ..id
            }
        }
        EntryStyle::ZoomIn => {
            let e = out_cubic(p);
            WordTransform {
                scale_x: 0.3 + 0.7 * e,
                scale_y: 0.3 + 0.7 * e,
                alpha: e,
                ..id
            }
        }
        EntryStyle::ExplodeIn => {
            let e = out_back(p);
            WordTransform {
                scale_x: 1.0 + (1.0 - e) * 1.2 * i,
                scale_y: 1.0 + (1.0 - e) * 1.2 * i,
                alpha: (p * 3.0).min(1.0),
                glow_mult: 1.0 + (1.0 - e) * 1.5 * i,
                blur: (1.0 - e) * 10.0 * i,
                ..id
            }
        }
        EntryStyle::BounceIn => {
            let e = out_elastic(p);
            WordTransform {
                scale_x: e,
                scale_y: e,
                alpha: (p * 4.0).min(1.0),
                ..id
            }
        }
        EntryStyle::SpringUp => {
            let e = out_elastic(p);
            WordTransform {
                offset_y: (1.0 - e) * 90.0 * i,
                alpha: (p * 4.0).min(1.0),
                ..id
            }
        }
        EntryStyle::PopIn => {
            let e = out_back(p);
            WordTransform {
                scale_x: e,
                scale_y: e,
                alpha: (p * 6.0).min(1.0),
                ..id
            }
        }
        EntryStyle::FadeIn => WordTransform {
            alpha: out_cubic(p),
            ..id
        },
        EntryStyle::Bloom => {
            let e = out_cubic(p);
            WordTransform {
                scale_x: 0.6 + 0.4 * e,
                scale_y: 0.6 + 0.4 * e,
                alpha: e,
                glow_mult: 1.0 + (1.0 - e) * 1.2 * i,
                blur: (1.0 - e) * 6.0 * i,
                ..id
            }
        }
        EntryStyle::Whisper => {
            let e = out_cubic(p);
            WordTransform {
                offset_y: (1.0 - e) * 12.0 * i,
                alpha: e,
                blur: (1.0 - e) * 4.0 * i,
                ..id
            }
        }
        EntryStyle::Typewriter => WordTransform {
            offset_x: -(1.0 - p) * 8.0 * i,
            alpha: (p * 4.0).floor() / 4.0,
            ..id
        },
        EntryStyle::ShatterIn => {
            let e = out_cubic(p);
            let k = (p * 12.0).floor() as i64;
            let rest = 1.0 - p;
            WordTransform {
                offset_x: pseudo_sign(k) * rest * 30.0 * i,
                offset_y: pseudo_sign(k + 7) * rest * 20.0 * i,
                rotation: pseudo_sign(k + 13) * rest * 0.35 * i,
                scale_x: 0.8 + 0.2 * e,
                scale_y: 0.8 + 0.2 * e,
                alpha: e,
                ..id
            }
        }
        EntryStyle::GlitchIn => {
            let k = (p * 20.0).floor() as i64;
            let rest = 1.0 - p;
            let lit = pseudo_sign(k + 5) > 0.0 || p > 0.6;
            WordTransform {
                offset_x: pseudo_sign(k) * rest * 24.0 * i,
                skew_x: pseudo_sign(k + 3) * rest * 0.4 * i,
                alpha: if lit { p } else { p * 0.3 },
                ..id
            }
        }
        EntryStyle::FlickerIn => {
            let k = (p * 16.0).floor() as i64;
            let alpha = if p >= 0.8 {
                1.0
            } else if pseudo_sign(k) > 0.0 {
                p
            } else {
                p * 0.2
            };
            WordTransform { alpha, ..id }
        }
        EntryStyle::BlurIn => {
            let e = out_cubic(p);
            WordTransform {
                alpha: e,
                blur: (1.0 - e) * 16.0 * i,
                ..id
            }
        }
        EntryStyle::Unfold => WordTransform {
            scale_y: out_back(p),
            alpha: (p * 3.0).min(1.0),
            ..id
        },
        EntryStyle::SpinIn => {
            let e = out_cubic(p);
            WordTransform {
                rotation: -(1.0 - e) * PI * i,
                scale_x: 0.5 + 0.5 * e,
                scale_y: 0.5 + 0.5 * e,
                alpha: e,
                ..id
            }
        }
        EntryStyle::Ignite => {
            let e = out_cubic(p);
            WordTransform {
                scale_x: 0.95 + 0.05 * e,
                scale_y: 0.95 + 0.05 * e,
                alpha: e,
                glow_mult: 1.0 + (p * PI).sin() * 2.0 * i,
                ..id
            }
        }
        EntryStyle::Surge => {
            let e = out_back(p);
            WordTransform {
                offset_x: -(1.0 - e) * 160.0 * i,
                scale_x: 1.0 + (1.0 - e) * 0.5 * i,
                alpha: (p * 4.0).min(1.0),
                blur: (1.0 - e) * 6.0 * i,
                ..id
            }
        }
        EntryStyle::Cut => WordTransform {
            alpha: if p > 0.0 { 1.0 } else { 0.0 },
            ..id
        },
    };
    t.sanitized()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/entry.rs"]
mod tests;
