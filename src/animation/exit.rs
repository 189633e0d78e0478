use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::{
    animation::ease::{in_cubic, out_cubic},
    animation::transform::WordTransform,
    foundation::math::pseudo_sign,
    style::tags::ExitStyle,
};

/// Residual alpha a lingering word settles at.
pub const LINGER_ALPHA: f64 = 0.28;
/// Progress at which a freeze-crack exit starts to break.
pub const FREEZE_CRACK_HOLD: f64 = 0.7;

/// Position of a letter inside its parent word, for letter-aware exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterSlot {
    pub index: usize,
    pub total: usize,
}

impl LetterSlot {
    fn phase(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.index as f64 / self.total as f64
        }
    }
}

/// Exit curve for `style` at `progress`.
///
/// `progress == 0` is the resting word. At `progress == 1` every style is fully transparent
/// except [`ExitStyle::Linger`], which settles at [`LINGER_ALPHA`].
pub fn exit(
    style: ExitStyle,
    progress: f64,
    intensity: f64,
    letter: Option<LetterSlot>,
) -> WordTransform {
    let p = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    if p <= 0.0 {
        return WordTransform::IDENTITY;
    }
    let i = intensity.max(0.0);
    let id = WordTransform::IDENTITY;
    let letter_seed = letter.map_or(0, |l| l.index as i64);

    let t = match style {
        ExitStyle::GravityFall => {
            let e = in_cubic(p);
            WordTransform {
                offset_y: e * 260.0 * i,
                scale_x: 1.0 + e * 0.1 * i,
                scale_y: 1.0 - e * 0.2 * i,
                alpha: 1.0 - p * p,
                ..id
            }
        }
        ExitStyle::Crumble => {
            let e = in_cubic(p);
            WordTransform {
                offset_y: e * 120.0 * i,
                rotation: pseudo_sign(letter_seed) * e * 0.5 * i,
                scale_x: 1.0 - 0.3 * e,
                scale_y: 1.0 - 0.3 * e,
                alpha: 1.0 - e,
                ..id
            }
        }
        ExitStyle::SinkDown => {
            let e = out_cubic(p);
            WordTransform {
                offset_y: e * 80.0 * i,
                alpha: 1.0 - e,
                blur: e * 4.0 * i,
                ..id
            }
        }
        ExitStyle::FadeUp => {
            let e = out_cubic(p);
            WordTransform {
                offset_y: -e * 60.0 * i,
                alpha: 1.0 - e,
                ..id
            }
        }
        ExitStyle::Dissolve => WordTransform {
            scale_x: 1.0 + 0.08 * p,
            scale_y: 1.0 + 0.08 * p,
            alpha: 1.0 - p,
            blur: p * 10.0 * i,
            ..id
        },
        ExitStyle::DriftAway => {
            let e = out_cubic(p);
            WordTransform {
                offset_x: e * 90.0 * i,
                offset_y: -e * 30.0 * i,
                alpha: 1.0 - e,
                blur: e * 5.0 * i,
                ..id
            }
        }
        ExitStyle::Shrink => {
            let e = in_cubic(p);
            WordTransform {
                scale_x: 1.0 - e,
                scale_y: 1.0 - e,
                alpha: 1.0 - e,
                ..id
            }
        }
        ExitStyle::BounceOut => {
            let hop = (p * PI).sin();
            WordTransform {
                offset_y: -hop * 40.0 * i,
                scale_x: 1.0 + hop * (1.0 - p) * 0.25 * i,
                scale_y: 1.0 + hop * (1.0 - p) * 0.25 * i,
                alpha: 1.0 - in_cubic(p),
                ..id
            }
        }
        ExitStyle::Evaporate => {
            let e = out_cubic(p);
            WordTransform {
                offset_y: -e * 40.0 * i,
                alpha: 1.0 - e,
                glow_mult: 1.0 + e * 0.8 * i,
                blur: e * 14.0 * i,
                ..id
            }
        }
        ExitStyle::Linger => {
            let e = out_cubic(p);
            WordTransform {
                alpha: LINGER_ALPHA + (1.0 - LINGER_ALPHA) * (1.0 - e),
                blur: e * 3.0 * i,
                ..id
            }
        }
        ExitStyle::GlitchOut => {
            let k = (p * 20.0).floor() as i64;
            let lit = if pseudo_sign(k + 5) > 0.0 { 1.0 } else { 0.4 };
            WordTransform {
                offset_x: pseudo_sign(k) * p * 30.0 * i,
                skew_x: pseudo_sign(k + 3) * p * 0.5 * i,
                alpha: (1.0 - p) * lit,
                ..id
            }
        }
        ExitStyle::ScatterLetters => {
            let e = out_cubic(p);
            let angle = letter.map_or(-FRAC_PI_2, |l| l.phase() * TAU + 0.3);
            let distance = e * 180.0 * i;
            WordTransform {
                offset_x: angle.cos() * distance,
                offset_y: angle.sin() * distance,
                rotation: angle.sin() * e * 0.8 * i,
                alpha: 1.0 - e,
                ..id
            }
        }
        ExitStyle::Static => {
            let k = (p * 24.0).floor() as i64;
            let lit = if pseudo_sign(k + 1) > 0.0 { 1.0 } else { 0.5 };
            WordTransform {
                offset_x: pseudo_sign(k) * p * 4.0 * i,
                alpha: (1.0 - p) * lit,
                blur: p * 2.0 * i,
                ..id
            }
        }
        ExitStyle::FreezeCrack => {
            if p < FREEZE_CRACK_HOLD {
                id
            } else {
                let q = ((p - FREEZE_CRACK_HOLD) / (1.0 - FREEZE_CRACK_HOLD)).clamp(0.0, 1.0);
                let e = in_cubic(q);
                let dir = pseudo_sign(letter_seed);
                WordTransform {
                    offset_x: dir * e * 50.0 * i,
                    offset_y: e * 140.0 * i,
                    rotation: dir * e * 0.3 * i,
                    alpha: 1.0 - q,
                    ..id
                }
            }
        }
        ExitStyle::SlideOutLeft => WordTransform {
            offset_x: -in_cubic(p) * 260.0 * i,
            alpha: 1.0 - p,
            ..id
        },
        ExitStyle::SlideOutRight => WordTransform {
            offset_x: in_cubic(p) * 260.0 * i,
            alpha: 1.0 - p,
            ..id
        },
        ExitStyle::ZoomOut => {
            let e = in_cubic(p);
            WordTransform {
                scale_x: 1.0 + e * 1.5 * i,
                scale_y: 1.0 + e * 1.5 * i,
                alpha: 1.0 - e,
                blur: e * 8.0 * i,
                ..id
            }
        }
        ExitStyle::Explode => {
            let e = out_cubic(p);
            WordTransform {
                scale_x: 1.0 + e * 2.0 * i,
                scale_y: 1.0 + e * 2.0 * i,
                alpha: 1.0 - e,
                glow_mult: 1.0 + e * 2.0 * i,
                blur: e * 12.0 * i,
                ..id
            }
        }
        ExitStyle::BurnOut => WordTransform {
            scale_y: 1.0 - p * 0.1 * i,
            alpha: 1.0 - in_cubic(p),
            glow_mult: 1.0 + (p * PI).sin() * 2.5 * i,
            ..id
        },
        ExitStyle::BlurOut => {
            let e = out_cubic(p);
            WordTransform {
                alpha: 1.0 - e,
                blur: e * 18.0 * i,
                ..id
            }
        }
        ExitStyle::SpinOut => {
            let e = in_cubic(p);
            WordTransform {
                rotation: e * PI * i,
                scale_x: 1.0 - 0.5 * e,
                scale_y: 1.0 - 0.5 * e,
                alpha: 1.0 - e,
                ..id
            }
        }
        ExitStyle::Fold => {
            let e = in_cubic(p);
            WordTransform {
                scale_y: 1.0 - e,
                alpha: 1.0 - e,
                ..id
            }
        }
        ExitStyle::CutOut => WordTransform {
            alpha: if p < 1.0 { 1.0 } else { 0.0 },
            ..id
        },
        ExitStyle::Melt => {
            let e = in_cubic(p);
            WordTransform {
                offset_y: e * 70.0 * i,
                scale_x: 1.0 - e * 0.3 * i,
                scale_y: 1.0 + e * 0.8 * i,
                alpha: 1.0 - e,
                blur: e * 6.0 * i,
                ..id
            }
        }
        ExitStyle::Implode => {
            let e = in_cubic(p);
            WordTransform {
                rotation: -e * 0.5 * i,
                scale_x: 1.0 - e,
                scale_y: 1.0 - e,
                alpha: 1.0 - e,
                glow_mult: 1.0 + e * 1.5 * i,
                ..id
            }
        }
    };
    t.sanitized()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/exit.rs"]
mod tests;
