use super::*;

fn grid(beats: &[f64]) -> BeatGrid {
    BeatGrid {
        bpm: 120.0,
        beats: beats.to_vec(),
        confidence: 1.0,
    }
}

fn profile(kind: Option<PhysicsKind>, heat: Option<f64>) -> PhysicsProfile {
    PhysicsProfile { kind, heat }
}

#[test]
fn slam_hits_harder_than_pulse() {
    let g = grid(&[0.5, 1.0]);
    let slam = synthesize_beats(&g, &profile(Some(PhysicsKind::Slam), Some(0.5)));
    let pulse = synthesize_beats(&g, &profile(Some(PhysicsKind::Pulse), Some(0.5)));
    for (s, p) in slam.iter().zip(&pulse) {
        assert!(s.magnitude > p.magnitude);
        assert!(s.glow_ceiling > p.glow_ceiling);
    }
}

#[test]
fn heat_scales_impulse() {
    let g = grid(&[0.0]);
    let cold = synthesize_beats(&g, &profile(Some(PhysicsKind::Pulse), Some(0.0)));
    let hot = synthesize_beats(&g, &profile(Some(PhysicsKind::Pulse), Some(1.0)));
    assert!((cold[0].magnitude - PULSE_IMPULSE * 0.4 * DOWNBEAT_BOOST).abs() < 1e-12);
    assert!((hot[0].magnitude - PULSE_IMPULSE * DOWNBEAT_BOOST).abs() < 1e-12);
}

#[test]
fn every_fourth_beat_is_a_downbeat() {
    let g = grid(&[0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);
    let ev = synthesize_beats(&g, &profile(Some(PhysicsKind::Pulse), Some(1.0)));
    let flags: Vec<bool> = ev.iter().map(|e| e.is_downbeat).collect();
    assert_eq!(flags, vec![true, false, false, false, true, false]);
    assert!((ev[0].magnitude / ev[1].magnitude - DOWNBEAT_BOOST).abs() < 1e-12);
}

#[test]
fn non_finite_beats_are_dropped_and_sorted() {
    let g = grid(&[2.0, f64::NAN, 1.0, f64::INFINITY]);
    let ev = synthesize_beats(&g, &PhysicsProfile::default());
    let times: Vec<f64> = ev.iter().map(|e| e.time).collect();
    assert_eq!(times, vec![1.0, 2.0]);
}

#[test]
fn low_confidence_is_floored() {
    let mut g = grid(&[0.0]);
    g.confidence = 0.0;
    let p = profile(Some(PhysicsKind::Pulse), Some(1.0));
    let ev = synthesize_beats(&g, &p);
    assert!((ev[0].magnitude - PULSE_IMPULSE * DOWNBEAT_BOOST * MIN_CONFIDENCE).abs() < 1e-12);
}

#[test]
fn untagged_profile_infers_kind_from_heat() {
    assert_eq!(
        resolve_physics_kind(&profile(None, Some(0.9))),
        PhysicsKind::Slam
    );
    assert_eq!(
        resolve_physics_kind(&profile(None, Some(0.2))),
        PhysicsKind::Pulse
    );
    assert_eq!(resolve_physics_kind(&profile(None, None)), PhysicsKind::Pulse);
}

#[test]
fn beat_phase_tracks_position_between_beats() {
    let ev = synthesize_beats(&grid(&[1.0, 2.0, 3.0]), &PhysicsProfile::default());
    assert!((beat_phase(&ev, 1.25).unwrap() - 0.25).abs() < 1e-12);
    assert_eq!(beat_phase(&ev, 2.0), Some(0.0));
}

#[test]
fn beat_phase_repeats_the_nearest_interval_outside_the_grid() {
    let ev = synthesize_beats(&grid(&[1.0, 1.5, 2.0]), &PhysicsProfile::default());
    assert!((beat_phase(&ev, 0.875).unwrap() - 0.75).abs() < 1e-12);
    assert!((beat_phase(&ev, 0.0).unwrap()).abs() < 1e-12);
    assert!((beat_phase(&ev, 2.125).unwrap() - 0.25).abs() < 1e-12);
    assert!((beat_phase(&ev, 9.0).unwrap()).abs() < 1e-12);
    for t in [-3.3, 0.1, 1.7, 4.44] {
        let p = beat_phase(&ev, t).unwrap();
        assert!((0.0..1.0).contains(&p), "{t} -> {p}");
    }
}

#[test]
fn beat_phase_needs_two_beats() {
    let one = synthesize_beats(&grid(&[1.0]), &PhysicsProfile::default());
    assert_eq!(beat_phase(&one, 1.2), None);
    assert_eq!(beat_phase(&[], 0.0), None);
}

#[test]
fn empty_grid_yields_no_events() {
    assert!(synthesize_beats(&grid(&[]), &PhysicsProfile::default()).is_empty());
}
