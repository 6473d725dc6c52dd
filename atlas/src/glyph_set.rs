use std::collections::HashSet;

use crate::{AtlasError, FontMetrics, Glyph, GlyphRaster};

/// Renders characters into glyph bitmaps.
pub trait Rasterizer {
    /// Renders a single character. `None` if the font has no glyph for it.
    fn rasterize(&mut self, character: char) -> Option<GlyphRaster>;

    fn font_metrics(&self) -> FontMetrics;
}

/// The unique glyphs of an input character stream, in order of their first occurrence.
#[derive(Debug, Default)]
pub struct GlyphSet {
    glyphs: Vec<Glyph>,
    duplicates: usize,
    missing: Vec<char>,
}

impl GlyphSet {
    /// Rasterizes every distinct character of `characters`.
    ///
    /// Duplicates are skipped (the first occurrence wins), as are characters the rasterizer
    /// has no glyph for.
    pub fn collect(
        characters: impl IntoIterator<Item = char>,
        rasterizer: &mut impl Rasterizer,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut set = Self::default();

        for character in characters {
            if !seen.insert(character) {
                log::debug!("{}", AtlasError::DuplicateCharacter(character));
                set.duplicates += 1;
                continue;
            }

            match rasterizer.rasterize(character) {
                Some(raster) => set.glyphs.push(Glyph::new(character, raster)),
                None => {
                    log::warn!("{}", AtlasError::MissingGlyph(character));
                    set.missing.push(character);
                }
            }
        }

        set
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn into_glyphs(self) -> Vec<Glyph> {
        self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Number of skipped repeated characters.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Characters the rasterizer had no glyph for.
    pub fn missing(&self) -> &[char] {
        &self.missing
    }
}
