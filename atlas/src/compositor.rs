//! Renders packed rows into the atlas pixel matrix.

use derive_more::Deref;
use glyphpack_geometry::SizePx;

use crate::{AtlasError, PackConfig, Result, Row};

pub const BACKGROUND: u8 = 0;

/// Row-major single channel pixels, top line first.
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct Canvas {
    size: SizePx,
    #[deref]
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn from_pixels(size: SizePx, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            size.width as usize * size.height as usize,
            "Pixels do not match the canvas size"
        );
        Self { size, pixels }
    }

    pub fn size(&self) -> SizePx {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The pixel line at `y`, counted from the top.
    pub fn line(&self, y: u32) -> &[u8] {
        let width = self.size.width as usize;
        let start = y as usize * width;
        &self.pixels[start..start + width]
    }
}

#[derive(Debug)]
pub struct Compositor {
    config: PackConfig,
}

impl Compositor {
    pub fn new(config: PackConfig) -> Self {
        Self { config }
    }

    /// Composites the rows into a canvas of the configured size.
    ///
    /// The layout follows the packing: `gap` background lines on top, then every row followed by
    /// `gap` background lines, then background lines up to the canvas height.
    pub fn composite(&self, rows: &[Row]) -> Result<Canvas> {
        self.config.validate()?;
        let PackConfig { width, height, gap } = self.config;
        let gap = gap as usize;
        let mut lines = Lines::new(width, height);
        let mut line = Vec::with_capacity(width as usize);

        lines.blank(gap)?;

        for row in rows {
            for p in 0..row.height as usize {
                line.clear();
                line.resize(gap, BACKGROUND);

                for glyph in &row.glyphs {
                    let glyph_width = glyph.metrics.width as usize;
                    let glyph_height = glyph.metrics.height as usize;
                    match &glyph.bitmap {
                        // Bitmaps are stored bottom to top.
                        Some(bitmap) if p < glyph_height => {
                            line.extend_from_slice(bitmap.row(glyph_height - 1 - p))
                        }
                        _ => line.resize(line.len() + glyph_width, BACKGROUND),
                    }
                    line.resize(line.len() + gap, BACKGROUND);
                }

                lines.push(&line)?;
            }

            lines.blank(gap)?;
        }

        lines.finish()
    }
}

/// Collects full-width lines and guards the canvas bounds.
struct Lines {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    count: usize,
}

impl Lines {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: Vec::with_capacity(width as usize * height as usize),
            count: 0,
        }
    }

    /// Appends a line, padded with background to the canvas width.
    fn push(&mut self, line: &[u8]) -> Result<()> {
        let width = self.width as usize;
        if line.len() > width || self.count >= self.height as usize {
            return Err(AtlasError::CompositionOverflow {
                line: self.count,
                len: line.len(),
                width: self.width,
                height: self.height,
            });
        }
        self.pixels.extend_from_slice(line);
        self.pixels
            .resize(self.pixels.len() + width - line.len(), BACKGROUND);
        self.count += 1;
        Ok(())
    }

    fn blank(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.push(&[])?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Canvas> {
        let remaining = self.height as usize - self.count;
        self.blank(remaining)?;
        Ok(Canvas::from_pixels(
            SizePx::new(self.width, self.height),
            self.pixels,
        ))
    }
}
