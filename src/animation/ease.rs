use std::f64::consts::PI;

/// Overshoot constant for [`Ease::OutBack`].
const BACK_C1: f64 = 1.701_58;
const BACK_C3: f64 = BACK_C1 + 1.0;
/// Angular frequency for [`Ease::OutElastic`].
const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    Linear,
    InCubic,
    OutCubic,
    OutBack,
    OutElastic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::OutBack => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
                }
            }
            Self::OutElastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
        }
    }
}

pub fn out_cubic(t: f64) -> f64 {
    Ease::OutCubic.apply(t)
}

pub fn in_cubic(t: f64) -> f64 {
    Ease::InCubic.apply(t)
}

pub fn out_back(t: f64) -> f64 {
    Ease::OutBack.apply(t)
}

pub fn out_elastic(t: f64) -> f64 {
    Ease::OutElastic.apply(t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
