//! Fixed layout structs of the atlas file.
//!
//! Field values are kept in file byte order: convert with `to_le` before writing and with
//! `to_native` after reading.

use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct RawHeader {
    pub signature: [u8; 4],
    pub endian_mark: i32,
    pub format: i32,
    pub width: i32,
    pub height: i32,
    pub ascent: i32,
    pub descent: i32,
    pub glyph_count: i32,
}

const_assert_eq!(size_of::<RawHeader>(), 32);

impl RawHeader {
    pub fn to_le(self) -> Self {
        self.map_integers(i32::to_le)
    }

    pub fn to_native(self, big_endian: bool) -> Self {
        if big_endian {
            self.map_integers(i32::from_be)
        } else {
            self.map_integers(i32::from_le)
        }
    }

    fn map_integers(self, f: fn(i32) -> i32) -> Self {
        Self {
            signature: self.signature,
            endian_mark: f(self.endian_mark),
            format: f(self.format),
            width: f(self.width),
            height: f(self.height),
            ascent: f(self.ascent),
            descent: f(self.descent),
            glyph_count: f(self.glyph_count),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct RawGlyphRecord {
    pub code: u16,
    pub width: u8,
    pub height: u8,
    pub x_offset: i8,
    pub y_offset: i8,
    pub advance: i8,
    pub reserved: u8,
    pub px: i16,
    pub py: i16,
    pub reserved_tail: [u8; 4],
}

const_assert_eq!(size_of::<RawGlyphRecord>(), 16);

impl RawGlyphRecord {
    pub fn to_le(self) -> Self {
        self.map_integers(u16::to_le, i16::to_le)
    }

    pub fn to_native(self, big_endian: bool) -> Self {
        if big_endian {
            self.map_integers(u16::from_be, i16::from_be)
        } else {
            self.map_integers(u16::from_le, i16::from_le)
        }
    }

    fn map_integers(self, unsigned: fn(u16) -> u16, signed: fn(i16) -> i16) -> Self {
        Self {
            code: unsigned(self.code),
            px: signed(self.px),
            py: signed(self.py),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bytes_are_little_endian() {
        let header = RawHeader {
            signature: *b"ABCD",
            endian_mark: 0x1234_5678,
            format: 0,
            width: 1,
            height: 2,
            ascent: 3,
            descent: 4,
            glyph_count: 5,
        };
        let bytes = bytemuck::bytes_of(&header.to_le()).to_vec();
        assert_eq!(&bytes[..8], b"ABCD\x78\x56\x34\x12");
        assert_eq!(&bytes[28..], &[5, 0, 0, 0]);
    }

    #[test]
    fn big_endian_records_are_swapped() {
        let mut bytes = [0u8; 16];
        bytes[..2].copy_from_slice(&0x0041u16.to_be_bytes());
        bytes[8..10].copy_from_slice(&(-1i16).to_be_bytes());
        bytes[10..12].copy_from_slice(&300i16.to_be_bytes());

        let record = bytemuck::pod_read_unaligned::<RawGlyphRecord>(&bytes).to_native(true);
        assert_eq!(record.code, 0x41);
        assert_eq!((record.px, record.py), (-1, 300));
    }
}
