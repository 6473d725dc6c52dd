//! Packs rasterized glyphs into a single-channel texture and serializes the binary font atlas.

mod atlas_file;
mod compositor;
mod error;
mod glyph;
mod glyph_set;
mod packer;
mod pods;
mod reader;

#[cfg(test)]
mod testing;

pub use atlas_file::*;
pub use compositor::*;
pub use error::*;
pub use glyph::*;
pub use glyph_set::*;
pub use packer::*;
