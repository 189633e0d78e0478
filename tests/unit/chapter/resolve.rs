use super::*;
use crate::payload::model::{PhysicsProfile, Section};

fn section(start: f64, end: f64) -> Section {
    Section {
        start_ratio: start,
        end_ratio: end,
        motion: None,
        texture: None,
        typography: None,
        atmosphere: None,
        shot: None,
    }
}

#[test]
fn no_sections_yield_one_full_chapter() {
    let ch = resolve_chapters(&Direction::default(), &[], MotionProfile::Fluid);
    assert_eq!(ch.len(), 1);
    assert_eq!((ch[0].start_ratio, ch[0].end_ratio), (0.0, 1.0));
    assert_eq!(ch[0].zoom, 1.0);
    assert_eq!(ch[0].typography.preset, TypographyPreset::CleanModern);
    assert_eq!(ch[0].palette, ResolvedPalette::FALLBACK);
}

#[test]
fn shot_types_map_to_zoom() {
    assert_eq!(shot_zoom(ShotType::ExtremeCloseUp), 1.6);
    assert_eq!(shot_zoom(ShotType::CloseUp), 1.3);
    assert_eq!(shot_zoom(ShotType::Wide), 0.85);
    assert_eq!(shot_zoom(ShotType::ExtremeWide), 0.7);
}

#[test]
fn sections_are_sorted_clamped_and_capped() {
    let mut d = Direction::default();
    d.sections.push(section(0.5, 2.0));
    d.sections.push(section(-1.0, 0.5));
    d.sections.push(section(f64::NAN, 0.2));
    let ch = resolve_chapters(&d, &[], MotionProfile::Fluid);
    assert_eq!(ch.len(), 2);
    assert_eq!((ch[0].start_ratio, ch[0].end_ratio), (0.0, 0.5));
    assert_eq!((ch[1].start_ratio, ch[1].end_ratio), (0.5, 1.0));
    assert_eq!(ch[1].index, 1);

    let mut many = Direction::default();
    for i in 0..20 {
        let s = f64::from(i) / 20.0;
        many.sections.push(section(s, s + 0.05));
    }
    assert_eq!(
        resolve_chapters(&many, &[], MotionProfile::Fluid).len(),
        MAX_SECTIONS
    );
}

#[test]
fn section_overrides_win_over_globals() {
    let mut d = Direction {
        typography: Some(TypographyPreset::ElegantSerif),
        texture: Some(Texture::Haze),
        ..Direction::default()
    };
    let mut s = section(0.0, 1.0);
    s.motion = Some(MotionProfile::Glitch);
    s.typography = Some(TypographyPreset::TechMono);
    s.shot = Some(ShotType::CloseUp);
    d.sections.push(s);
    d.sections.push(section(0.5, 1.0));
    let ch = resolve_chapters(&d, &[], MotionProfile::Drift);
    assert_eq!(ch[0].motion, MotionProfile::Glitch);
    assert_eq!(ch[0].typography.family, "JetBrains Mono");
    assert_eq!(ch[0].zoom, 1.3);
    assert_eq!(ch[1].motion, MotionProfile::Drift);
    assert_eq!(ch[1].typography.preset, TypographyPreset::ElegantSerif);
    assert_eq!(ch[1].atmosphere, Atmosphere::Haze);
}

#[test]
fn multiple_palettes_rotate_per_chapter() {
    let mut d = Direction::default();
    d.sections.push(section(0.0, 0.3));
    d.sections.push(section(0.3, 0.6));
    d.sections.push(section(0.6, 1.0));
    let palettes = vec![
        Palette {
            background: Some("#000000".into()),
            text: Some("#ffffff".into()),
            accent: Some("#ff0000".into()),
        },
        Palette {
            background: Some("#111111".into()),
            text: None,
            accent: Some("bogus".into()),
        },
    ];
    let ch = resolve_chapters(&d, &palettes, MotionProfile::Fluid);
    assert_eq!(ch[0].palette.accent, Rgb8::new(0xff, 0, 0));
    assert_eq!(ch[1].palette.background, Rgb8::new(0x11, 0x11, 0x11));
    assert_eq!(ch[1].palette.text, ResolvedPalette::FALLBACK.text);
    assert_eq!(ch[1].palette.accent, ResolvedPalette::FALLBACK.accent);
    assert_eq!(ch[2].palette, ch[0].palette);
}

#[test]
fn single_palette_is_global() {
    let mut d = Direction::default();
    d.sections.push(section(0.0, 0.5));
    d.sections.push(section(0.5, 1.0));
    let palettes = vec![Palette {
        background: Some("#102030".into()),
        text: None,
        accent: None,
    }];
    let ch = resolve_chapters(&d, &palettes, MotionProfile::Fluid);
    assert_eq!(ch[0].palette, ch[1].palette);
    assert_eq!(ch[0].palette.background, Rgb8::new(0x10, 0x20, 0x30));
}

#[test]
fn named_palette_preset_is_used_without_payload_palettes() {
    let d = Direction {
        palette: Some(PalettePreset::Ocean),
        ..Direction::default()
    };
    let ch = resolve_chapters(&d, &[], MotionProfile::Fluid);
    assert_eq!(ch[0].palette, ResolvedPalette::from_preset(PalettePreset::Ocean));
}

#[test]
fn motion_defaults_follow_heat() {
    let mut d = Direction::default();
    assert_eq!(default_motion(&d), MotionProfile::Fluid);
    d.physics = PhysicsProfile {
        kind: None,
        heat: Some(0.9),
    };
    assert_eq!(default_motion(&d), MotionProfile::Weighted);
    d.physics.heat = Some(0.1);
    assert_eq!(default_motion(&d), MotionProfile::Drift);
    d.motion = Some(MotionProfile::Elastic);
    assert_eq!(default_motion(&d), MotionProfile::Elastic);
}

#[test]
fn visual_mode_defaults_from_hints() {
    let mut d = Direction::default();
    assert_eq!(
        default_visual_mode(&d, MotionProfile::Fluid),
        VisualMode::Cinematic
    );
    assert_eq!(
        default_visual_mode(&d, MotionProfile::Weighted),
        VisualMode::Explosive
    );
    assert_eq!(
        default_visual_mode(&d, MotionProfile::Drift),
        VisualMode::Intimate
    );
    d.texture = Some(Texture::Film);
    assert_eq!(
        default_visual_mode(&d, MotionProfile::Weighted),
        VisualMode::Intimate
    );
    d.visual_mode = Some(VisualMode::Cinematic);
    assert_eq!(
        default_visual_mode(&d, MotionProfile::Weighted),
        VisualMode::Cinematic
    );
}

#[test]
fn chapter_lookup_by_ratio() {
    let mut d = Direction::default();
    d.sections.push(section(0.0, 0.4));
    d.sections.push(section(0.4, 1.0));
    let ch = resolve_chapters(&d, &[], MotionProfile::Fluid);
    assert_eq!(chapter_at(&ch, 0.1), 0);
    assert_eq!(chapter_at(&ch, 0.4), 1);
    assert_eq!(chapter_at(&ch, 1.0), 1);
    assert_eq!(chapter_at(&ch, -0.5), 0);
}
