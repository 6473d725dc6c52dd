use glyphpack_geometry::{BoxPx, PointPx, SizePx, box_at};

/// Pixel metrics of a rendered glyph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct GlyphMetrics {
    pub width: u32,
    pub height: u32,
    /// Offset from the logical origin to the left edge of the bitmap.
    pub x_offset: i32,
    /// Offset from the logical origin (baseline) to the bottom edge of the bitmap.
    pub y_offset: i32,
    pub advance: i32,
}

impl GlyphMetrics {
    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Font wide vertical metrics in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FontMetrics {
    pub ascent: i32,
    /// Positive magnitude of the descender.
    pub descent: i32,
}

/// A single channel intensity bitmap.
///
/// Rows are stored bottom to top: row `0` is the bottom line of the glyph.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// Creates a bitmap from rows that are already ordered bottom to top.
    pub fn from_bottom_up(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "Bitmap data does not match its dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Creates a bitmap from rows ordered top to bottom, as most rasterizers produce them.
    pub fn from_top_down(width: usize, height: usize, data: &[u8]) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "Bitmap data does not match its dimensions"
        );
        let mut flipped = Vec::with_capacity(data.len());
        if width > 0 {
            for row in data.chunks_exact(width).rev() {
                flipped.extend_from_slice(row);
            }
        }
        Self::from_bottom_up(width, height, flipped)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel row at `index`, counted from the bottom.
    pub fn row(&self, index: usize) -> &[u8] {
        let start = index * self.width;
        &self.data[start..start + self.width]
    }
}

/// What a rasterizer produces for a single character.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRaster {
    pub metrics: GlyphMetrics,
    /// `None` for glyphs without visible pixels.
    pub bitmap: Option<Bitmap>,
}

impl GlyphRaster {
    pub fn new(metrics: GlyphMetrics, bitmap: Option<Bitmap>) -> Self {
        Self { metrics, bitmap }
    }

    /// A raster without visible pixels that only advances the pen, like a space.
    pub fn blank(advance: i32) -> Self {
        Self::new(
            GlyphMetrics {
                advance,
                ..GlyphMetrics::default()
            },
            None,
        )
    }
}

/// Where a glyph ended up in the canvas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Placement {
    /// Top-left corner of the glyph's bitmap inside the canvas.
    Placed(PointPx),
    /// The glyph has no pixels and occupies no canvas area.
    #[default]
    Unplaced,
}

impl Placement {
    pub fn position(&self) -> Option<PointPx> {
        match self {
            Placement::Placed(position) => Some(*position),
            Placement::Unplaced => None,
        }
    }
}

/// One entry of the atlas: a unique character, its metrics, its pixels and its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub character: char,
    pub metrics: GlyphMetrics,
    pub bitmap: Option<Bitmap>,
    pub placement: Placement,
}

impl Glyph {
    /// Creates an unplaced glyph.
    ///
    /// A raster whose bitmap is missing or disagrees with a non-empty size in its metrics keeps
    /// only its advance and offsets, the size is zeroed so that no pixels are claimed.
    pub fn new(character: char, raster: GlyphRaster) -> Self {
        let GlyphRaster {
            mut metrics,
            bitmap,
        } = raster;
        let bitmap = bitmap.filter(|bitmap| {
            !metrics.is_empty()
                && bitmap.width() == metrics.width as usize
                && bitmap.height() == metrics.height as usize
        });
        if bitmap.is_none() && !metrics.is_empty() {
            log::warn!(
                "Dropping the pixels of {character:?}, its {}x{} metrics have no matching bitmap",
                metrics.width,
                metrics.height
            );
            metrics.width = 0;
            metrics.height = 0;
        }
        Self {
            character,
            metrics,
            bitmap,
            placement: Placement::Unplaced,
        }
    }

    /// Glyphs with pixels take part in packing, all others stay [`Placement::Unplaced`].
    pub fn is_visible(&self) -> bool {
        self.bitmap.is_some()
    }

    /// The canvas area the glyph covers, if it was placed.
    pub fn bounds(&self) -> Option<BoxPx> {
        self.placement
            .position()
            .map(|origin| box_at(origin, self.metrics.size()))
    }
}
