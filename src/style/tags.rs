//! Closed vocabularies for every style category a direction can name.
//!
//! Tags travel as kebab-case strings. Each enum carries an `ALL` table so resolver tables
//! and tests can walk every variant.

use serde::{Deserialize, Serialize};

macro_rules! closed_tag {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }
    };
}

closed_tag! {
    /// Transition played while a word appears.
    EntryStyle {
        SlamDown,
        Stomp,
        DropIn,
        RiseUp,
        Materialize,
        SlideLeft,
        SlideRight,
        ZoomIn,
        ExplodeIn,
        BounceIn,
        SpringUp,
        PopIn,
        FadeIn,
        Bloom,
        Whisper,
        Typewriter,
        ShatterIn,
        GlitchIn,
        FlickerIn,
        BlurIn,
        Unfold,
        SpinIn,
        Ignite,
        Surge,
        Cut,
    }
}

closed_tag! {
    /// Transition played while a word leaves.
    ExitStyle {
        GravityFall,
        Crumble,
        SinkDown,
        FadeUp,
        Dissolve,
        DriftAway,
        Shrink,
        BounceOut,
        Evaporate,
        Linger,
        GlitchOut,
        ScatterLetters,
        Static,
        FreezeCrack,
        SlideOutLeft,
        SlideOutRight,
        ZoomOut,
        Explode,
        BurnOut,
        BlurOut,
        SpinOut,
        Fold,
        CutOut,
        Melt,
        Implode,
    }
}

closed_tag! {
    /// Idle motion layered while a word is fully visible.
    BehaviorStyle {
        Pulse,
        Vibrate,
        Float,
        Grow,
        Contract,
        Flicker,
        Orbit,
        Lean,
        Freeze,
        Tilt,
        Pendulum,
        FocusPulse,
    }
}

closed_tag! {
    /// Meaning-driven override bundle selector.
    VisualMetaphor {
        EmberBurst,
        FrostForm,
        GravityDrop,
        Fracture,
        Shockwave,
        VoidAbsorb,
        Heartbeat,
        Echo,
        SmokeDrift,
        ElectricArc,
        LiquidFlow,
        Hush,
        Ascend,
        Collapse,
        Blaze,
        Tremor,
        DreamHaze,
        StaticNoise,
        Radiance,
    }
}

closed_tag! {
    /// Default entry/exit/behavior bundle plus timing constants.
    MotionProfile {
        Weighted,
        Fluid,
        Elastic,
        Drift,
        Glitch,
    }
}

closed_tag! {
    /// Named font family/weight/case preset.
    TypographyPreset {
        CleanModern,
        BoldImpact,
        ElegantSerif,
        RawHandwritten,
        TechMono,
        CondensedDisplay,
    }
}

closed_tag! {
    /// Background surface treatment hint.
    Texture {
        Clean,
        Grain,
        Haze,
        Film,
        Glitch,
        Fire,
        Storm,
        Neon,
    }
}

closed_tag! {
    /// Per-chapter ambience tag handed through to the renderer.
    Atmosphere {
        Clean,
        Haze,
        Neon,
        Golden,
        Storm,
        Frost,
        Smoke,
        Cosmic,
    }
}

closed_tag! {
    /// Camera framing; selects a chapter's target zoom.
    ShotType {
        ExtremeCloseUp,
        CloseUp,
        Medium,
        Wide,
        ExtremeWide,
    }
}

closed_tag! {
    /// Motion character of a word's meaning.
    KineticClass {
        Impact,
        Rising,
        Falling,
        Floating,
        Sustained,
        Neutral,
    }
}

closed_tag! {
    /// Shape of intensity over the song.
    EmotionalArc {
        Steady,
        Rising,
        Falling,
        Peak,
        Wave,
    }
}

closed_tag! {
    /// Beat-impulse character of the physics profile.
    PhysicsKind {
        Slam,
        Pulse,
    }
}

closed_tag! {
    /// Anchor-slot table and layout spread.
    VisualMode {
        Intimate,
        Cinematic,
        Explosive,
    }
}

closed_tag! {
    /// Particle emitter hint handed to the renderer.
    EmitterKind {
        Embers,
        Frost,
        Dust,
        Sparks,
        Smoke,
        Shards,
        Ripple,
        Void,
        Light,
    }
}

closed_tag! {
    /// Named palette used when no explicit palette list is supplied.
    PalettePreset {
        Noir,
        Ember,
        Ocean,
        Neon,
        Dawn,
        Forest,
    }
}

closed_tag! {
    /// Case transform applied to displayed word text.
    CaseTransform {
        AsWritten,
        Upper,
        Lower,
    }
}

impl CaseTransform {
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::AsWritten => text.to_string(),
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
        }
    }
}

/// Normalize an incoming tag spelling to the kebab-case wire form.
pub(crate) fn normalize_tag(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_dash = true;
    let mut prev_lower = false;
    for c in raw.trim().chars() {
        if c == '_' || c == ' ' || c == '-' {
            if !prev_dash {
                out.push('-');
                prev_dash = true;
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !prev_dash {
            out.push('-');
        }
        out.push(c.to_ascii_lowercase());
        prev_dash = false;
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/style/tags.rs"]
mod tests;
