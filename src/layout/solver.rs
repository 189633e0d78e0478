use crate::{
    foundation::core::{Canvas, Rect, Vec2},
    foundation::math::hash_unit,
    layout::measure::{FontSpec, TextMeasurer},
    phrase::grouper::PhraseGroup,
    style::tags::VisualMode,
};

pub const SLOT_COUNT: usize = 10;

/// Normalized anchor positions per visual mode.
const INTIMATE_SLOTS: [(f64, f64); SLOT_COUNT] = [
    (0.50, 0.50),
    (0.45, 0.48),
    (0.55, 0.48),
    (0.50, 0.44),
    (0.47, 0.54),
    (0.53, 0.54),
    (0.42, 0.50),
    (0.58, 0.50),
    (0.50, 0.56),
    (0.50, 0.42),
];

const CINEMATIC_SLOTS: [(f64, f64); SLOT_COUNT] = [
    (0.50, 0.45),
    (0.35, 0.40),
    (0.65, 0.40),
    (0.50, 0.35),
    (0.40, 0.55),
    (0.60, 0.55),
    (0.30, 0.50),
    (0.70, 0.50),
    (0.50, 0.60),
    (0.45, 0.30),
];

const EXPLOSIVE_SLOTS: [(f64, f64); SLOT_COUNT] = [
    (0.50, 0.40),
    (0.25, 0.30),
    (0.75, 0.30),
    (0.30, 0.65),
    (0.70, 0.65),
    (0.50, 0.70),
    (0.20, 0.50),
    (0.80, 0.50),
    (0.40, 0.25),
    (0.60, 0.25),
];

const EXPLOSIVE_SPREAD_X: f64 = 0.06;
const EXPLOSIVE_SPREAD_Y: f64 = 0.05;

const SINGLE_WORD_SCALE: f64 = 1.3;
const ANCHOR_SCALE: f64 = 1.15;
const SUPPORT_SCALE: f64 = 0.6;
/// Gap between the anchor row and the support row, as a fraction of the support font size.
const ROW_GAP: f64 = 0.25;

const fn slot_table(mode: VisualMode) -> &'static [(f64, f64); SLOT_COUNT] {
    match mode {
        VisualMode::Intimate => &INTIMATE_SLOTS,
        VisualMode::Cinematic => &CINEMATIC_SLOTS,
        VisualMode::Explosive => &EXPLOSIVE_SLOTS,
    }
}

/// Drawable area: the canvas minus a uniform padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBounds {
    pub canvas: Canvas,
    pub padding: f64,
}

impl LayoutBounds {
    /// Clamp a box center so the whole `w × h` box stays inside the padded canvas. A box
    /// larger than the drawable span is centered on that axis.
    pub fn clamp_center(&self, center: Vec2, w: f64, h: f64) -> Vec2 {
        let size = self.canvas.size();
        Vec2::new(
            clamp_axis(center.x, w, self.padding, size.x),
            clamp_axis(center.y, h, self.padding, size.y),
        )
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        let size = self.canvas.size();
        p.x >= self.padding
            && p.x <= size.x - self.padding
            && p.y >= self.padding
            && p.y <= size.y - self.padding
    }
}

fn clamp_axis(c: f64, extent: f64, padding: f64, dim: f64) -> f64 {
    let lo = padding + extent * 0.5;
    let hi = dim - padding - extent * 0.5;
    if lo > hi { dim * 0.5 } else { c.clamp(lo, hi) }
}

/// One word's resolved placement. `position` is the center of its box.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub position: Vec2,
    pub font: FontSpec,
    pub width: f64,
    pub height: f64,
}

impl PlacedWord {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position.to_point(), (self.width, self.height))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupLayout {
    /// Same order as the group's words.
    pub words: Vec<PlacedWord>,
    /// Anchor box handed to collision resolution; follows `translate` without re-clamping.
    pub(crate) anchor_box: Rect,
}

impl GroupLayout {
    /// Translate every word rigidly, then re-clamp each to the drawable area.
    pub fn translate(&mut self, shift: Vec2, bounds: &LayoutBounds) {
        for w in &mut self.words {
            w.position = bounds.clamp_center(w.position + shift, w.width, w.height);
        }
        self.anchor_box = self.anchor_box + shift;
    }
}

pub fn anchor_slot(line_index: usize, group_index: usize) -> usize {
    (line_index * 3 + group_index * 5) % SLOT_COUNT
}

/// Emphasis 1..=5 maps to a 1.0..=1.48 font multiplier.
pub fn emphasis_font_scale(emphasis: u8) -> f64 {
    1.0 + f64::from(emphasis.saturating_sub(1)) * 0.12
}

/// Deterministic per-line offset used by explosive mode.
fn explosive_spread(line_index: usize, canvas: Canvas) -> Vec2 {
    let size = canvas.size();
    let ux = hash_unit(line_index as u64) * 2.0 - 1.0;
    let uy = hash_unit((line_index as u64) ^ 0x9E37_79B9) * 2.0 - 1.0;
    Vec2::new(
        ux * EXPLOSIVE_SPREAD_X * size.x,
        uy * EXPLOSIVE_SPREAD_Y * size.y,
    )
}

/// Place every word of `group`.
///
/// `base_font` carries the chapter's family, body weight, and base size; `hero_weight` is
/// used for the anchor word.
pub fn layout_group(
    group: &PhraseGroup,
    mode: VisualMode,
    bounds: &LayoutBounds,
    base_font: &FontSpec,
    hero_weight: u16,
    measurer: &mut dyn TextMeasurer,
) -> GroupLayout {
    let slot = anchor_slot(group.line_index, group.group_index);
    let (nx, ny) = slot_table(mode)[slot];
    let size = bounds.canvas.size();
    let mut anchor_center = Vec2::new(nx * size.x, ny * size.y);
    if mode == VisualMode::Explosive {
        anchor_center += explosive_spread(group.line_index, bounds.canvas);
    }

    let anchor = group.anchor();
    let row_scale = if group.words.len() == 1 {
        SINGLE_WORD_SCALE
    } else {
        ANCHOR_SCALE
    };
    let anchor_font = FontSpec {
        family: base_font.family.clone(),
        weight: hero_weight,
        size: base_font.size * emphasis_font_scale(anchor.emphasis()) * row_scale,
    };
    let anchor_w = measurer.measure(&anchor_font, &anchor.text);
    let anchor_h = measurer.line_height(&anchor_font);
    let anchor_center = bounds.clamp_center(anchor_center, anchor_w, anchor_h);
    let anchor_placed = PlacedWord {
        position: anchor_center,
        font: anchor_font,
        width: anchor_w,
        height: anchor_h,
    };

    let mut support_placed: Vec<PlacedWord> = Vec::new();
    if group.words.len() > 1 {
        let support_font = FontSpec {
            family: base_font.family.clone(),
            weight: base_font.weight,
            size: base_font.size * SUPPORT_SCALE,
        };
        let support_h = measurer.line_height(&support_font);
        let space = measurer.measure(&support_font, " ");
        let row_y = anchor_center.y
            + anchor_h * 0.5
            + support_font.size * ROW_GAP
            + support_h * 0.5;

        let widths: Vec<f64> = group
            .words
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != group.anchor_word_idx)
            .map(|(_, w)| measurer.measure(&support_font, &w.text))
            .collect();
        let total = widths.iter().sum::<f64>()
            + space * (widths.len().saturating_sub(1) as f64);

        let lo = bounds.padding;
        let hi = size.x - bounds.padding - total;
        let centered = anchor_center.x - total * 0.5;
        let mut x = if hi < lo { lo } else { centered.clamp(lo, hi) };

        for w in widths {
            let center = Vec2::new(x + w * 0.5, row_y);
            support_placed.push(PlacedWord {
                position: bounds.clamp_center(center, w, support_h),
                font: support_font.clone(),
                width: w,
                height: support_h,
            });
            x += w + space;
        }
    }

    let anchor_box = anchor_placed.bounds();
    let mut support_iter = support_placed.into_iter();
    let mut words = Vec::with_capacity(group.words.len());
    for i in 0..group.words.len() {
        if i == group.anchor_word_idx {
            words.push(anchor_placed.clone());
        } else if let Some(p) = support_iter.next() {
            words.push(p);
        }
    }

    GroupLayout {
        words,
        anchor_box,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
