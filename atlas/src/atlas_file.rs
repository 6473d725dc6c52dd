//! The binary font atlas file.
//!
//! Layout, all integers little endian:
//!
//! | Offset | Field         | Type                       |
//! |--------|---------------|----------------------------|
//! | 0      | signature     | `b"GPAF"`                  |
//! | 4      | endian mark   | i32, `0x12345678`          |
//! | 8      | format        | i32, `0` (8 bit intensity) |
//! | 12     | width         | i32                        |
//! | 16     | height        | i32                        |
//! | 20     | ascent        | i32                        |
//! | 24     | descent       | i32, positive              |
//! | 28     | glyph count   | i32                        |
//! | 32     | glyph records | 16 bytes each              |
//! | ...    | pixels        | `width * height` bytes     |
//!
//! A glyph record is `code: u16, width: u8, height: u8, x_offset: i8, y_offset: i8,
//! advance: i8, reserved: u8, px: i16, py: i16` followed by four reserved bytes. Glyphs without
//! pixels are stored with `px = py = -1`.

use std::{
    io::{self, Write},
    mem::size_of,
};

use glyphpack_geometry::PointPx;

use crate::{
    AtlasError, Canvas, Compositor, FontMetrics, Glyph, PackConfig, Placement, Result,
    ShelfPacker,
    pods::{RawGlyphRecord, RawHeader},
};

pub const SIGNATURE: [u8; 4] = *b"GPAF";
pub const ENDIAN_MARK: i32 = 0x1234_5678;
/// Uncompressed, one byte of intensity per pixel.
pub const FORMAT_INTENSITY: i32 = 0;
pub const HEADER_LEN: usize = size_of::<RawHeader>();
pub const RECORD_LEN: usize = size_of::<RawGlyphRecord>();

const UNPLACED: i16 = -1;

/// A glyph's entry in the atlas file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlyphRecord {
    pub code: u16,
    pub width: u8,
    pub height: u8,
    pub x_offset: i8,
    pub y_offset: i8,
    pub advance: i8,
    pub placement: Placement,
}

impl GlyphRecord {
    /// Converts a glyph, failing if any of its values is not representable in a record.
    pub fn from_glyph(glyph: &Glyph) -> Result<Self> {
        let character = glyph.character;
        let metrics = &glyph.metrics;

        let placement = match glyph.placement {
            Placement::Placed(position) => {
                narrow::<i16>(character, "px", position.x.into())?;
                narrow::<i16>(character, "py", position.y.into())?;
                Placement::Placed(position)
            }
            Placement::Unplaced => Placement::Unplaced,
        };

        Ok(Self {
            code: narrow(character, "code", u32::from(character).into())?,
            width: narrow(character, "width", metrics.width.into())?,
            height: narrow(character, "height", metrics.height.into())?,
            x_offset: narrow(character, "x_offset", metrics.x_offset.into())?,
            y_offset: narrow(character, "y_offset", metrics.y_offset.into())?,
            advance: narrow(character, "advance", metrics.advance.into())?,
            placement,
        })
    }

    pub fn character(&self) -> Option<char> {
        char::from_u32(self.code.into())
    }

    /// The placement as stored in the file, `(-1, -1)` for unplaced glyphs.
    pub fn wire_position(&self) -> (i16, i16) {
        match self.placement {
            // Range checked on construction.
            Placement::Placed(position) => (position.x as i16, position.y as i16),
            Placement::Unplaced => (UNPLACED, UNPLACED),
        }
    }

    pub(crate) fn from_raw(raw: RawGlyphRecord) -> Result<Self> {
        let placement = match (raw.px, raw.py) {
            (UNPLACED, UNPLACED) => Placement::Unplaced,
            (px, py) if px >= 0 && py >= 0 => {
                Placement::Placed(PointPx::new(px as u32, py as u32))
            }
            (px, py) => {
                return Err(AtlasError::Malformed(format!(
                    "invalid placement ({px}, {py}) of glyph {}",
                    raw.code
                )));
            }
        };
        Ok(Self {
            code: raw.code,
            width: raw.width,
            height: raw.height,
            x_offset: raw.x_offset,
            y_offset: raw.y_offset,
            advance: raw.advance,
            placement,
        })
    }

    fn to_raw(self) -> RawGlyphRecord {
        let (px, py) = self.wire_position();
        RawGlyphRecord {
            code: self.code,
            width: self.width,
            height: self.height,
            x_offset: self.x_offset,
            y_offset: self.y_offset,
            advance: self.advance,
            reserved: 0,
            px,
            py,
            reserved_tail: [0; 4],
        }
    }
}

fn narrow<T: TryFrom<i64>>(character: char, field: &'static str, value: i64) -> Result<T> {
    T::try_from(value).map_err(|_| AtlasError::GlyphFieldOutOfRange {
        character,
        field,
        value,
    })
}

/// A complete font atlas: header values, glyph records in packed order and the pixels.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasFile {
    font: FontMetrics,
    records: Vec<GlyphRecord>,
    canvas: Canvas,
}

impl AtlasFile {
    /// Packs and composites the glyphs and validates every value against the file format.
    ///
    /// Nothing is written here, so a failing build never leaves partial output behind.
    pub fn build(glyphs: Vec<Glyph>, font: FontMetrics, config: PackConfig) -> Result<Self> {
        let packed = ShelfPacker::new(config).pack(glyphs)?;
        let canvas = Compositor::new(config).composite(&packed.rows)?;
        let records = packed
            .glyphs()
            .map(GlyphRecord::from_glyph)
            .collect::<Result<Vec<_>>>()?;

        Self::new(font, records, canvas)
    }

    pub(crate) fn new(font: FontMetrics, records: Vec<GlyphRecord>, canvas: Canvas) -> Result<Self> {
        header_field("width", canvas.width().into())?;
        header_field("height", canvas.height().into())?;
        header_field("glyph count", records.len() as i64)?;

        Ok(Self {
            font,
            records,
            canvas,
        })
    }

    pub fn font_metrics(&self) -> FontMetrics {
        self.font
    }

    pub fn records(&self) -> &[GlyphRecord] {
        &self.records
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Size of the serialized file in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + RECORD_LEN * self.records.len() + self.canvas.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let header = RawHeader {
            signature: SIGNATURE,
            endian_mark: ENDIAN_MARK,
            format: FORMAT_INTENSITY,
            // Range checked on construction.
            width: self.canvas.width() as i32,
            height: self.canvas.height() as i32,
            ascent: self.font.ascent,
            descent: self.font.descent,
            glyph_count: self.records.len() as i32,
        };
        let records: Vec<RawGlyphRecord> = self
            .records
            .iter()
            .map(|record| record.to_raw().to_le())
            .collect();

        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(bytemuck::bytes_of(&header.to_le()));
        out.extend_from_slice(bytemuck::cast_slice(&records));
        out.extend_from_slice(self.canvas.pixels());
        debug_assert_eq!(out.len(), self.encoded_len());
        out
    }

    /// Writes the complete file to `sink`.
    pub fn write_to(&self, sink: &mut impl Write) -> io::Result<()> {
        sink.write_all(&self.to_bytes())?;
        sink.flush()
    }
}

fn header_field(field: &'static str, value: i64) -> Result<()> {
    i32::try_from(value)
        .map(|_| ())
        .map_err(|_| AtlasError::HeaderFieldOutOfRange { field, value })
}
