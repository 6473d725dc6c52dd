use glyphpack_atlas::{Bitmap, FontMetrics, GlyphMetrics, GlyphRaster, Rasterizer};
use swash::{
    scale::{Render, ScaleContext, Source, image::Content},
    zeno::{Format, Placement},
};

use crate::Font;

/// Typographic points per inch.
const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RasterizationParam {
    /// Font size in points.
    pub size: f32,
    /// Resolution in dots per inch.
    pub dpi: u32,
    pub hinted: bool,
}

impl RasterizationParam {
    pub fn pixels_per_em(&self) -> f32 {
        self.size * self.dpi as f32 / POINTS_PER_INCH
    }
}

/// Renders single channel glyph masks of one font at a fixed size.
pub struct FontRasterizer {
    font: Font,
    param: RasterizationParam,
    context: ScaleContext,
}

impl std::fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRasterizer")
            .field("font", &self.font)
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}

impl FontRasterizer {
    pub fn new(font: Font, param: RasterizationParam) -> Self {
        Self {
            font,
            param,
            context: ScaleContext::new(),
        }
    }
}

impl Rasterizer for FontRasterizer {
    fn rasterize(&mut self, character: char) -> Option<GlyphRaster> {
        let font = self.font.as_swash();
        let glyph_id = font.charmap().map(character);
        if glyph_id == 0 {
            return None;
        }

        let size = self.param.pixels_per_em();
        let advance = font
            .glyph_metrics(&[])
            .scale(size)
            .advance_width(glyph_id);

        let mut scaler = self
            .context
            .builder(font)
            .size(size)
            .hint(self.param.hinted)
            .build();

        let Some(image) = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id)
        else {
            // Outline-less glyphs like the space still advance the pen.
            log::debug!("No outline for {character:?}, keeping its advance only");
            return Some(GlyphRaster::blank(advance.round() as i32));
        };

        if image.content != Content::Mask {
            log::warn!("Skipping {character:?}, it does not render to an intensity mask");
            return None;
        }

        Some(raster_from_mask(image.placement, &image.data, advance))
    }

    fn font_metrics(&self) -> FontMetrics {
        let metrics = self
            .font
            .as_swash()
            .metrics(&[])
            .scale(self.param.pixels_per_em());
        FontMetrics {
            ascent: metrics.ascent.round() as i32,
            descent: metrics.descent.abs().round() as i32,
        }
    }
}

/// Converts a top-down alpha mask positioned relative to the baseline into a [`GlyphRaster`].
fn raster_from_mask(placement: Placement, data: &[u8], advance: f32) -> GlyphRaster {
    let (width, height) = (placement.width, placement.height);
    let metrics = GlyphMetrics {
        width,
        height,
        x_offset: placement.left,
        // `top` is the distance from the baseline up to the first row.
        y_offset: placement.top - height as i32,
        advance: advance.round() as i32,
    };

    let bitmap = (width > 0 && height > 0)
        .then(|| Bitmap::from_top_down(width as usize, height as usize, data));

    GlyphRaster::new(metrics, bitmap)
}
