//! Test helpers.

use std::collections::HashMap;

use crate::{Bitmap, FontMetrics, Glyph, GlyphMetrics, GlyphRaster, Rasterizer};

/// A rasterizer that renders every known character as a rectangle filled with the low byte of
/// its code point.
#[derive(Debug, Default)]
pub struct BoxRasterizer {
    boxes: HashMap<char, (u32, u32)>,
    requests: Vec<char>,
}

impl BoxRasterizer {
    pub fn with(mut self, character: char, width: u32, height: u32) -> Self {
        self.boxes.insert(character, (width, height));
        self
    }

    pub fn requests(&self) -> &[char] {
        &self.requests
    }
}

impl Rasterizer for BoxRasterizer {
    fn rasterize(&mut self, character: char) -> Option<GlyphRaster> {
        self.requests.push(character);
        let (width, height) = *self.boxes.get(&character)?;
        Some(box_raster(character, width, height))
    }

    fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: 10,
            descent: 3,
        }
    }
}

pub fn box_raster(character: char, width: u32, height: u32) -> GlyphRaster {
    let metrics = GlyphMetrics {
        width,
        height,
        x_offset: 0,
        y_offset: -1,
        advance: width as i32 + 1,
    };
    let fill = (u32::from(character) & 0xff) as u8;
    let bitmap = (width > 0 && height > 0).then(|| {
        Bitmap::from_bottom_up(
            width as usize,
            height as usize,
            vec![fill; (width * height) as usize],
        )
    });
    GlyphRaster::new(metrics, bitmap)
}

pub fn box_glyph(character: char, width: u32, height: u32) -> Glyph {
    Glyph::new(character, box_raster(character, width, height))
}

/// A glyph whose bitmap rows are filled with their bottom-up row index + 1.
pub fn striped_glyph(character: char, width: u32, height: u32) -> Glyph {
    let data = (0..height)
        .flat_map(|row| std::iter::repeat_n(row as u8 + 1, width as usize))
        .collect();
    let metrics = GlyphMetrics {
        width,
        height,
        ..GlyphMetrics::default()
    };
    Glyph::new(
        character,
        GlyphRaster::new(
            metrics,
            Some(Bitmap::from_bottom_up(width as usize, height as usize, data)),
        ),
    )
}
