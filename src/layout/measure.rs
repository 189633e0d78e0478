use crate::foundation::error::{LyricError, LyricResult};

/// Font request used for measurement and carried into the compiled output.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub weight: u16,
    pub size: f64,
}

/// Text width capability injected into compilation.
///
/// Implementations may keep shaping caches, so measurement takes `&mut self`: a measurer has
/// exactly one owner and is used from one thread at a time.
pub trait TextMeasurer {
    /// Rendered advance width of `text` in layout units.
    fn measure(&mut self, font: &FontSpec, text: &str) -> f64;

    /// Vertical extent used for bounding boxes.
    fn line_height(&mut self, font: &FontSpec) -> f64 {
        font.size * 1.2
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(&mut self, font: &FontSpec, text: &str) -> f64 {
        (**self).measure(font, text)
    }

    fn line_height(&mut self, font: &FontSpec) -> f64 {
        (**self).line_height(font)
    }
}

/// Deterministic estimate: a fixed em-fraction per glyph, widened for heavy weights.
#[derive(Clone, Copy, Debug)]
pub struct ApproxMeasurer {
    pub em_per_glyph: f64,
}

impl Default for ApproxMeasurer {
    fn default() -> Self {
        Self { em_per_glyph: 0.55 }
    }
}

impl TextMeasurer for ApproxMeasurer {
    fn measure(&mut self, font: &FontSpec, text: &str) -> f64 {
        let weight_factor = 1.0 + (f64::from(font.weight) - 400.0) / 1000.0 * 0.15;
        let glyphs = text.chars().count() as f64;
        glyphs * font.size * self.em_per_glyph * weight_factor
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeasureBrush;

/// Parley-backed measurement against explicitly registered font bytes.
///
/// Family names in a [`FontSpec`] that were not registered fall back to the first registered
/// family.
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
    families: Vec<String>,
}

impl ParleyMeasurer {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: Vec::new(),
        }
    }

    /// Register one font file; returns the family name it exposes.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> LyricResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            LyricError::measurement("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LyricError::measurement("registered font family has no name"))?
            .to_string();
        if !self.families.contains(&family_name) {
            self.families.push(family_name.clone());
        }
        Ok(family_name)
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    fn resolve_family(&self, requested: &str) -> Option<String> {
        self.families
            .iter()
            .find(|f| f.eq_ignore_ascii_case(requested))
            .or_else(|| self.families.first())
            .cloned()
    }
}

impl Default for ParleyMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, font: &FontSpec, text: &str) -> f64 {
        let Some(family) = self.resolve_family(&font.family) else {
            return ApproxMeasurer::default().measure(font, text);
        };
        let size_px = font.size.max(1.0) as f32;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(font.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(MeasureBrush));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut w = 0.0f64;
        for line in layout.lines() {
            w = w.max(f64::from(line.metrics().advance));
        }
        w
    }
}
