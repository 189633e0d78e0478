use crate::{payload::model::BeatGrid, payload::model::PhysicsProfile, style::tags::PhysicsKind};

pub const SLAM_IMPULSE: f64 = 2.4;
pub const PULSE_IMPULSE: f64 = 1.0;
pub const SLAM_GLOW_CEILING: f64 = 1.0;
pub const PULSE_GLOW_CEILING: f64 = 0.55;
pub const DOWNBEAT_EVERY: usize = 4;
pub const DOWNBEAT_BOOST: f64 = 1.35;
pub const MIN_CONFIDENCE: f64 = 0.25;
/// Heat assumed when the physics profile omits it.
pub const DEFAULT_HEAT: f64 = 0.5;
/// Above this heat an untagged physics profile behaves like a slam.
const SLAM_HEAT_THRESHOLD: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BeatEvent {
    pub time: f64,
    /// Spring impulse handed to the physics integrator.
    pub magnitude: f64,
    pub is_downbeat: bool,
    pub glow_ceiling: f64,
}

pub fn resolve_physics_kind(profile: &PhysicsProfile) -> PhysicsKind {
    profile.kind.unwrap_or_else(|| {
        if profile.heat_clamped().unwrap_or(DEFAULT_HEAT) > SLAM_HEAT_THRESHOLD {
            PhysicsKind::Slam
        } else {
            PhysicsKind::Pulse
        }
    })
}

/// One event per finite beat timestamp, ascending by time.
pub fn synthesize_beats(grid: &BeatGrid, profile: &PhysicsProfile) -> Vec<BeatEvent> {
    let kind = resolve_physics_kind(profile);
    let heat = profile.heat_clamped().unwrap_or(DEFAULT_HEAT);
    let (base, glow) = match kind {
        PhysicsKind::Slam => (SLAM_IMPULSE, SLAM_GLOW_CEILING),
        PhysicsKind::Pulse => (PULSE_IMPULSE, PULSE_GLOW_CEILING),
    };
    let confidence = if grid.confidence.is_finite() {
        grid.confidence.clamp(MIN_CONFIDENCE, 1.0)
    } else {
        1.0
    };

    let mut times: Vec<f64> = grid
        .beats
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .collect();
    times.sort_by(f64::total_cmp);

    let scaled = base * (0.4 + 0.6 * heat) * confidence;
    times
        .into_iter()
        .enumerate()
        .map(|(i, time)| {
            let is_downbeat = i % DOWNBEAT_EVERY == 0;
            BeatEvent {
                time,
                magnitude: if is_downbeat {
                    scaled * DOWNBEAT_BOOST
                } else {
                    scaled
                },
                is_downbeat,
                glow_ceiling: glow * (0.5 + 0.5 * heat),
            }
        })
        .collect()
}

/// Position inside the beat containing `t`, in `[0, 1)`, zero on the beat.
///
/// Before the first beat and after the last one the nearest beat interval keeps repeating.
/// `None` when fewer than two beats leave no tempo to follow.
pub fn beat_phase(beats: &[BeatEvent], t: f64) -> Option<f64> {
    let n = beats.len();
    if n < 2 || !t.is_finite() {
        return None;
    }
    let idx = beats.partition_point(|b| b.time <= t).clamp(1, n - 1);
    let prev = beats[idx - 1].time;
    let span = beats[idx].time - prev;
    if span <= 0.0 {
        return Some(0.0);
    }
    let phase = ((t - prev) / span).rem_euclid(1.0);
    Some(if phase < 1.0 { phase } else { 0.0 })
}

#[cfg(test)]
#[path = "../../tests/unit/beat/events.rs"]
mod tests;
