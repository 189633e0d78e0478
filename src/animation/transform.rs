use crate::foundation::core::{Affine, Point, Vec2};

/// Per-word transform produced by the curve library.
///
/// Offsets are in canvas pixels relative to the word's placed center, `rotation` is radians,
/// `skew_x` is a horizontal shear factor, and `blur` is a radius in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub alpha: f64,
    pub skew_x: f64,
    pub glow_mult: f64,
    pub blur: f64,
    pub rotation: f64,
}

impl Default for WordTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl WordTransform {
    pub const IDENTITY: Self = Self {
        offset_x: 0.0,
        offset_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        alpha: 1.0,
        skew_x: 0.0,
        glow_mult: 1.0,
        blur: 0.0,
        rotation: 0.0,
    };

    /// Fully transparent, otherwise neutral.
    pub const HIDDEN: Self = Self {
        alpha: 0.0,
        ..Self::IDENTITY
    };

    /// Layer `other` on top of `self`: additive channels add, multiplicative channels multiply.
    pub fn compose(self, other: Self) -> Self {
        Self {
            offset_x: self.offset_x + other.offset_x,
            offset_y: self.offset_y + other.offset_y,
            scale_x: self.scale_x * other.scale_x,
            scale_y: self.scale_y * other.scale_y,
            alpha: self.alpha * other.alpha,
            skew_x: self.skew_x + other.skew_x,
            glow_mult: self.glow_mult * other.glow_mult,
            blur: self.blur + other.blur,
            rotation: self.rotation + other.rotation,
        }
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }

    /// Clamp alpha to `[0, 1]` and keep scales and blur non-negative.
    pub(crate) fn sanitized(mut self) -> Self {
        self.alpha = self.alpha.clamp(0.0, 1.0);
        self.scale_x = self.scale_x.max(0.0);
        self.scale_y = self.scale_y.max(0.0);
        self.blur = self.blur.max(0.0);
        self.glow_mult = self.glow_mult.max(0.0);
        self
    }

    /// Affine placing a glyph run whose local origin is its center at `anchor`.
    pub fn to_affine(&self, anchor: Point) -> Affine {
        Affine::translate(anchor.to_vec2() + self.offset())
            * Affine::rotate(self.rotation)
            * Affine::skew(self.skew_x, 0.0)
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}
