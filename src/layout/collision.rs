use crate::{
    foundation::core::{Rect, Vec2},
    layout::solver::LayoutBounds,
};

pub const DEFAULT_MAX_PASSES: usize = 6;
pub const DEFAULT_BOX_PADDING: f64 = 12.0;
/// Share of each push taken by the higher-emphasis group; the other group takes the rest.
/// Equal emphasis favors the earlier group.
pub const FAVORED_SHARE: f64 = 0.3;
/// Overlaps at or below this depth count as touching, not colliding.
const PENETRATION_EPSILON: f64 = 1e-6;

/// One group as seen by the resolver: its extended visible window and its anchor box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionItem {
    pub window_start: f64,
    pub window_end: f64,
    pub anchor_box: Rect,
    pub emphasis: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CollisionOutcome {
    /// Net translation per item, same order as the input.
    pub shifts: Vec<Vec2>,
    /// Passes executed, including the final clean pass when converged.
    pub passes: usize,
    pub converged: bool,
    /// Pairs whose time windows overlap.
    pub candidate_pairs: usize,
}

fn windows_overlap(a: &CollisionItem, b: &CollisionItem) -> bool {
    a.window_start < b.window_end && b.window_start < a.window_end
}

/// Index pairs `(i, j)`, `i < j`, whose visible windows overlap, in ascending order.
pub fn time_overlapping_pairs(items: &[CollisionItem]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[a]
            .window_start
            .total_cmp(&items[b].window_start)
            .then(a.cmp(&b))
    });

    let mut pairs = Vec::new();
    for (k, &a) in order.iter().enumerate() {
        for &b in &order[k + 1..] {
            if items[b].window_start >= items[a].window_end {
                break;
            }
            if windows_overlap(&items[a], &items[b]) {
                pairs.push((a.min(b), a.max(b)));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

fn keep_inside(raw: Rect, shift: Vec2, bounds: &LayoutBounds) -> Vec2 {
    let center = raw.center().to_vec2();
    bounds.clamp_center(center + shift, raw.width(), raw.height()) - center
}

fn penetration(a: Rect, b: Rect) -> Option<(f64, f64)> {
    let ox = a.x1.min(b.x1) - a.x0.max(b.x0);
    let oy = a.y1.min(b.y1) - a.y0.max(b.y0);
    (ox > PENETRATION_EPSILON && oy > PENETRATION_EPSILON).then_some((ox, oy))
}

/// Multi-pass pairwise separation of anchor boxes that are on screen at the same time.
///
/// Each colliding pair is pushed apart along the axis of least penetration. The loop stops
/// after the first pass that finds no collision, or after `max_passes`.
#[tracing::instrument(skip(items, bounds), fields(items = items.len()))]
pub fn resolve_collisions(
    items: &[CollisionItem],
    bounds: &LayoutBounds,
    box_padding: f64,
    max_passes: usize,
) -> CollisionOutcome {
    let pairs = time_overlapping_pairs(items);
    let padded: Vec<Rect> = items
        .iter()
        .map(|it| it.anchor_box.inflate(box_padding, box_padding))
        .collect();
    let mut shifts = vec![Vec2::ZERO; items.len()];

    let mut passes = 0usize;
    let mut converged = pairs.is_empty();
    while !converged && passes < max_passes {
        passes += 1;
        let mut collided = false;
        for &(i, j) in &pairs {
            let ri = padded[i] + shifts[i];
            let rj = padded[j] + shifts[j];
            let Some((ox, oy)) = penetration(ri, rj) else {
                continue;
            };
            collided = true;

            let (share_i, share_j) = if items[j].emphasis > items[i].emphasis {
                (1.0 - FAVORED_SHARE, FAVORED_SHARE)
            } else {
                (FAVORED_SHARE, 1.0 - FAVORED_SHARE)
            };

            let (ci, cj) = (ri.center(), rj.center());
            if ox < oy {
                let dir = if ci.x <= cj.x { -1.0 } else { 1.0 };
                shifts[i].x += dir * ox * share_i;
                shifts[j].x -= dir * ox * share_j;
            } else {
                let dir = if ci.y <= cj.y { -1.0 } else { 1.0 };
                shifts[i].y += dir * oy * share_i;
                shifts[j].y -= dir * oy * share_j;
            }
            shifts[i] = keep_inside(items[i].anchor_box, shifts[i], bounds);
            shifts[j] = keep_inside(items[j].anchor_box, shifts[j], bounds);
        }
        converged = !collided;
    }

    if !converged {
        converged = pairs
            .iter()
            .all(|&(i, j)| penetration(padded[i] + shifts[i], padded[j] + shifts[j]).is_none());
    }
    if converged {
        tracing::debug!(passes, pairs = pairs.len(), "collision resolution converged");
    } else {
        tracing::warn!(
            passes,
            pairs = pairs.len(),
            "collision pass budget exhausted; positions clamped but may still overlap"
        );
    }

    CollisionOutcome {
        shifts,
        passes,
        converged,
        candidate_pairs: pairs.len(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/collision.rs"]
mod tests;
