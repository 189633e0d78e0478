use std::f64::consts::TAU;

use crate::{
    animation::transform::WordTransform, foundation::math::pseudo_sign, style::tags::BehaviorStyle,
};

const VIBRATE_HZ_X: f64 = 18.0;
const VIBRATE_HZ_Y: f64 = 23.0;
const FLOAT_HZ: f64 = 0.35;
const FLOAT_AMPLITUDE: f64 = 6.0;
const FLICKER_HZ: f64 = 24.0;
const ORBIT_HZ: f64 = 0.25;
const TILT_HZ: f64 = 0.2;
const PENDULUM_HZ: f64 = 0.6;
const GROW_CAP: f64 = 0.12;
const CONTRACT_CAP: f64 = 0.1;
const LEAN_CAP: f64 = 0.18;

/// Idle behavior layered while a word holds on screen.
///
/// `beat_phase` is the position inside the current beat in `[0, 1)`, zero on the beat.
/// Without a beat phase the beat-driven styles rest at identity. Local time is measured from `word_start` and never runs negative.
pub fn behavior(
    style: BehaviorStyle,
    time: f64,
    word_start: f64,
    beat_phase: Option<f64>,
    intensity: f64,
) -> WordTransform {
    let local = if time.is_finite() && word_start.is_finite() {
        (time - word_start).max(0.0)
    } else {
        0.0
    };
    let phase = beat_phase
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 1.0));
    let i = intensity.max(0.0);
    let id = WordTransform::IDENTITY;

    let t = match style {
        BehaviorStyle::Pulse => {
            let Some(phase) = phase else {
                return id;
            };
            let kick = (1.0 - phase).powi(3);
            WordTransform {
                scale_x: 1.0 + kick * 0.08 * i,
                scale_y: 1.0 + kick * 0.08 * i,
                glow_mult: 1.0 + kick * 0.5 * i,
                ..id
            }
        }
        BehaviorStyle::Vibrate => WordTransform {
            offset_x: (local * TAU * VIBRATE_HZ_X).sin() * 1.5 * i,
            offset_y: (local * TAU * VIBRATE_HZ_Y).sin() * 1.0 * i,
            ..id
        },
        BehaviorStyle::Float => WordTransform {
            offset_y: (local * TAU * FLOAT_HZ).sin() * FLOAT_AMPLITUDE * i,
            ..id
        },
        BehaviorStyle::Grow => {
            let s = 1.0 + (local * 0.04).min(GROW_CAP) * i;
            WordTransform {
                scale_x: s,
                scale_y: s,
                ..id
            }
        }
        BehaviorStyle::Contract => {
            let s = 1.0 - (local * 0.03).min(CONTRACT_CAP) * i;
            WordTransform {
                scale_x: s,
                scale_y: s,
                ..id
            }
        }
        BehaviorStyle::Flicker => {
            let k = (local * FLICKER_HZ).floor() as i64;
            let alpha = if pseudo_sign(k) > 0.0 {
                1.0
            } else {
                1.0 - (0.35 * i).min(1.0)
            };
            WordTransform { alpha, ..id }
        }
        BehaviorStyle::Orbit => {
            let w = local * TAU * ORBIT_HZ;
            WordTransform {
                offset_x: w.sin() * 8.0 * i,
                offset_y: (1.0 - w.cos()) * 4.0 * i,
                ..id
            }
        }
        BehaviorStyle::Lean => WordTransform {
            skew_x: -(local * 0.05).min(LEAN_CAP) * i,
            ..id
        },
        BehaviorStyle::Freeze => id,
        BehaviorStyle::Tilt => WordTransform {
            rotation: (local * TAU * TILT_HZ).sin() * 0.05 * i,
            ..id
        },
        BehaviorStyle::Pendulum => WordTransform {
            rotation: (local * TAU * PENDULUM_HZ).sin() * 0.08 * i,
            ..id
        },
        BehaviorStyle::FocusPulse => {
            let Some(phase) = phase else {
                return id;
            };
            let kick = (1.0 - phase).powi(2);
            WordTransform {
                scale_x: 1.0 + kick * 0.04 * i,
                scale_y: 1.0 + kick * 0.04 * i,
                blur: phase * 2.5 * i,
                ..id
            }
        }
    };
    t.sanitized()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/behavior.rs"]
mod tests;
