use crate::style::tags::{BehaviorStyle, EntryStyle, ExitStyle, MotionProfile};

/// Timing constants shared by every word in a phrase group, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationTiming {
    pub stagger: f64,
    pub entry_duration: f64,
    pub exit_duration: f64,
    pub linger_duration: f64,
}

/// Default style rotation and timing of a motion profile.
#[derive(Clone, Copy, Debug)]
pub struct MotionBundle {
    pub entries: &'static [EntryStyle],
    pub exits: &'static [ExitStyle],
    pub behaviors: &'static [BehaviorStyle],
    pub timing: AnimationTiming,
    pub behavior_intensity: f64,
}

impl MotionBundle {
    /// Position-derived pick, so output is reproducible without any per-word direction.
    pub fn entry_at(&self, line_index: usize, word_index: usize) -> EntryStyle {
        self.entries[(line_index + word_index) % self.entries.len()]
    }

    pub fn exit_at(&self, line_index: usize, word_index: usize) -> ExitStyle {
        self.exits[(line_index + word_index) % self.exits.len()]
    }

    pub fn behavior_at(&self, line_index: usize, word_index: usize) -> BehaviorStyle {
        self.behaviors[(line_index + word_index) % self.behaviors.len()]
    }
}

pub const fn motion_bundle(profile: MotionProfile) -> MotionBundle {
    match profile {
        MotionProfile::Weighted => MotionBundle {
            entries: &[EntryStyle::SlamDown, EntryStyle::Stomp, EntryStyle::DropIn],
            exits: &[ExitStyle::GravityFall, ExitStyle::Crumble, ExitStyle::SinkDown],
            behaviors: &[BehaviorStyle::Pulse, BehaviorStyle::Vibrate],
            timing: AnimationTiming {
                stagger: 0.05,
                entry_duration: 0.18,
                exit_duration: 0.35,
                linger_duration: 0.25,
            },
            behavior_intensity: 1.0,
        },
        MotionProfile::Fluid => MotionBundle {
            entries: &[EntryStyle::RiseUp, EntryStyle::Materialize, EntryStyle::FadeIn],
            exits: &[ExitStyle::FadeUp, ExitStyle::Dissolve, ExitStyle::DriftAway],
            behaviors: &[BehaviorStyle::Float, BehaviorStyle::Grow],
            timing: AnimationTiming {
                stagger: 0.08,
                entry_duration: 0.35,
                exit_duration: 0.45,
                linger_duration: 0.4,
            },
            behavior_intensity: 0.6,
        },
        MotionProfile::Elastic => MotionBundle {
            entries: &[EntryStyle::BounceIn, EntryStyle::SpringUp, EntryStyle::PopIn],
            exits: &[ExitStyle::BounceOut, ExitStyle::Shrink, ExitStyle::ZoomOut],
            behaviors: &[BehaviorStyle::Pulse, BehaviorStyle::Pendulum],
            timing: AnimationTiming {
                stagger: 0.06,
                entry_duration: 0.3,
                exit_duration: 0.3,
                linger_duration: 0.3,
            },
            behavior_intensity: 0.8,
        },
        MotionProfile::Drift => MotionBundle {
            entries: &[EntryStyle::Whisper, EntryStyle::Bloom, EntryStyle::BlurIn],
            exits: &[ExitStyle::Evaporate, ExitStyle::Linger, ExitStyle::Dissolve],
            behaviors: &[BehaviorStyle::Float, BehaviorStyle::Orbit],
            timing: AnimationTiming {
                stagger: 0.12,
                entry_duration: 0.6,
                exit_duration: 0.7,
                linger_duration: 0.6,
            },
            behavior_intensity: 0.4,
        },
        MotionProfile::Glitch => MotionBundle {
            entries: &[EntryStyle::GlitchIn, EntryStyle::ShatterIn, EntryStyle::FlickerIn],
            exits: &[ExitStyle::GlitchOut, ExitStyle::ScatterLetters, ExitStyle::Static],
            behaviors: &[BehaviorStyle::Flicker, BehaviorStyle::Vibrate],
            timing: AnimationTiming {
                stagger: 0.03,
                entry_duration: 0.12,
                exit_duration: 0.2,
                linger_duration: 0.15,
            },
            behavior_intensity: 1.0,
        },
    }
}
