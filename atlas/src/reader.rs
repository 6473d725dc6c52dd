//! Parsing of atlas files.
//!
//! The writer always produces little endian files, the reader accepts both byte orders and
//! detects them with the endian mark.

use std::io::Read;

use bytemuck::pod_read_unaligned;
use glyphpack_geometry::SizePx;

use crate::{
    AtlasError, AtlasFile, Canvas, ENDIAN_MARK, FORMAT_INTENSITY, FontMetrics, GlyphRecord,
    HEADER_LEN, RECORD_LEN, Result, SIGNATURE,
    pods::{RawGlyphRecord, RawHeader},
};

impl AtlasFile {
    pub fn read(reader: &mut impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::read_from(&bytes)
    }

    /// Parses a complete atlas file.
    ///
    /// Records read back carry metrics and placement, the pixels are available through
    /// [`AtlasFile::canvas`].
    pub fn read_from(bytes: &[u8]) -> Result<Self> {
        let Some(header) = bytes.get(..HEADER_LEN) else {
            return malformed(format!(
                "unexpected end of file, {} bytes are shorter than the header",
                bytes.len()
            ));
        };
        let header: RawHeader = pod_read_unaligned(header);

        if header.signature != SIGNATURE {
            return malformed(format!("unknown signature {:02x?}", header.signature));
        }

        let big_endian = if i32::from_le(header.endian_mark) == ENDIAN_MARK {
            false
        } else if i32::from_be(header.endian_mark) == ENDIAN_MARK {
            true
        } else {
            return malformed(format!(
                "unknown endian mark {:02x?}",
                header.endian_mark.to_ne_bytes()
            ));
        };
        let header = header.to_native(big_endian);

        if header.format != FORMAT_INTENSITY {
            return malformed(format!("unsupported pixel format {}", header.format));
        }

        let width = dimension("width", header.width)?;
        let height = dimension("height", header.height)?;
        let glyph_count = dimension("glyph count", header.glyph_count)?;
        let font = FontMetrics {
            ascent: header.ascent,
            descent: header.descent,
        };

        let records_end = HEADER_LEN + glyph_count * RECORD_LEN;
        let expected = records_end + width * height;
        if bytes.len() != expected {
            return malformed(format!(
                "expected {expected} bytes for {glyph_count} glyphs and a {width}x{height} \
                 canvas, got {}",
                bytes.len()
            ));
        }

        let records = bytes[HEADER_LEN..records_end]
            .chunks_exact(RECORD_LEN)
            .map(|chunk| {
                let raw: RawGlyphRecord = pod_read_unaligned(chunk);
                GlyphRecord::from_raw(raw.to_native(big_endian))
            })
            .collect::<Result<Vec<_>>>()?;

        let pixels = bytes[records_end..].to_vec();
        let canvas = Canvas::from_pixels(SizePx::new(width as u32, height as u32), pixels);

        AtlasFile::new(font, records, canvas)
    }
}

fn malformed<T>(message: String) -> Result<T> {
    Err(AtlasError::Malformed(message))
}

/// A non-negative header value.
fn dimension(field: &str, value: i32) -> Result<usize> {
    usize::try_from(value).or_else(|_| malformed(format!("negative {field}: {value}")))
}
