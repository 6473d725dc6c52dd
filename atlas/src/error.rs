use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AtlasError>;

#[derive(Debug, Error)]
pub enum AtlasError {
    /// The rasterizer has no glyph for the character. The character is skipped.
    #[error("no glyph for character {0:?} (U+{code:04X})", code = code_point(.0))]
    MissingGlyph(char),

    /// A character that was already collected. The later occurrence is skipped.
    #[error("duplicate character {0:?} (U+{code:04X})", code = code_point(.0))]
    DuplicateCharacter(char),

    #[error(
        "{unplaced} of {total} glyphs do not fit into a {width}x{height} canvas; \
         increase the canvas size or reduce the render size"
    )]
    CapacityExceeded {
        unplaced: usize,
        total: usize,
        width: u32,
        height: u32,
    },

    /// A composited line does not match the canvas. This is an internal defect.
    #[error("composited line {line} with {len} bytes exceeds the {width}x{height} canvas")]
    CompositionOverflow {
        line: usize,
        len: usize,
        width: u32,
        height: u32,
    },

    #[error("{field} of {character:?} (U+{code:04X}) is out of range: {value}", code = code_point(.character))]
    GlyphFieldOutOfRange {
        character: char,
        field: &'static str,
        value: i64,
    },

    /// Canvas size or gap that cannot produce an atlas.
    #[error("invalid pack configuration: {0}")]
    InvalidConfig(String),

    #[error("header field {field} is out of range: {value}")]
    HeaderFieldOutOfRange { field: &'static str, value: i64 },

    #[error("malformed atlas file: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn code_point(character: &char) -> u32 {
    u32::from(*character)
}
