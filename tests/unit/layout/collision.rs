use super::*;
use crate::foundation::core::Canvas;

fn bounds() -> LayoutBounds {
    LayoutBounds {
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        padding: 48.0,
    }
}

fn item(start: f64, end: f64, center: (f64, f64), emphasis: u8) -> CollisionItem {
    CollisionItem {
        window_start: start,
        window_end: end,
        anchor_box: Rect::from_center_size(center, (200.0, 60.0)),
        emphasis,
    }
}

#[test]
fn time_disjoint_groups_are_never_compared() {
    let items = [
        item(0.0, 2.0, (960.0, 540.0), 1),
        item(2.0, 4.0, (960.0, 540.0), 1),
    ];
    assert!(time_overlapping_pairs(&items).is_empty());
    let out = resolve_collisions(&items, &bounds(), DEFAULT_BOX_PADDING, DEFAULT_MAX_PASSES);
    assert_eq!(out.shifts, vec![Vec2::ZERO, Vec2::ZERO]);
    assert_eq!(out.passes, 0);
    assert!(out.converged);
}

#[test]
fn overlapping_pairs_are_found_through_sorted_windows() {
    let items = [
        item(5.0, 6.0, (0.0, 0.0), 1),
        item(0.0, 10.0, (0.0, 0.0), 1),
        item(11.0, 12.0, (0.0, 0.0), 1),
        item(9.5, 11.5, (0.0, 0.0), 1),
    ];
    assert_eq!(time_overlapping_pairs(&items), vec![(0, 1), (1, 3), (2, 3)]);
}

#[test]
fn overlapping_boxes_separate_along_least_penetration() {
    // Offset horizontally by 150: x-overlap (74) is smaller than y-overlap (84).
    let items = [
        item(0.0, 3.0, (900.0, 540.0), 1),
        item(1.0, 4.0, (1050.0, 540.0), 1),
    ];
    let out = resolve_collisions(&items, &bounds(), DEFAULT_BOX_PADDING, DEFAULT_MAX_PASSES);
    assert!(out.converged);
    assert_eq!(out.passes, 2);
    assert_eq!(out.shifts[0].y, 0.0);
    assert_eq!(out.shifts[1].y, 0.0);
    assert!((out.shifts[0].x + 74.0 * 0.3).abs() < 1e-9);
    assert!((out.shifts[1].x - 74.0 * 0.7).abs() < 1e-9);
}

#[test]
fn higher_emphasis_group_moves_less() {
    let items = [
        item(0.0, 3.0, (960.0, 520.0), 1),
        item(0.0, 3.0, (960.0, 560.0), 5),
    ];
    let out = resolve_collisions(&items, &bounds(), DEFAULT_BOX_PADDING, DEFAULT_MAX_PASSES);
    assert!(out.converged);
    // Vertical push: boxes are stacked with identical x.
    assert!(out.shifts[0].y < 0.0);
    assert!(out.shifts[1].y > 0.0);
    assert!(out.shifts[1].y.abs() < out.shifts[0].y.abs());
}

#[test]
fn shifts_keep_anchor_boxes_on_canvas() {
    let b = bounds();
    let items = [
        item(0.0, 3.0, (160.0, 540.0), 1),
        item(0.0, 3.0, (170.0, 540.0), 1),
        item(0.0, 3.0, (180.0, 545.0), 1),
    ];
    let out = resolve_collisions(&items, &b, DEFAULT_BOX_PADDING, DEFAULT_MAX_PASSES);
    for (it, s) in items.iter().zip(&out.shifts) {
        let moved = it.anchor_box + *s;
        assert!(moved.x0 >= b.padding - 1e-9);
        assert!(moved.y0 >= b.padding - 1e-9);
    }
}

#[test]
fn exhausted_budget_reports_non_convergence() {
    let items = [
        item(0.0, 3.0, (960.0, 540.0), 1),
        item(0.0, 3.0, (960.0, 540.0), 1),
        item(0.0, 3.0, (960.0, 540.0), 1),
        item(0.0, 3.0, (960.0, 540.0), 1),
    ];
    let out = resolve_collisions(&items, &bounds(), DEFAULT_BOX_PADDING, 1);
    assert_eq!(out.passes, 1);
    assert!(!out.converged);
    assert_eq!(out.candidate_pairs, 6);
}
