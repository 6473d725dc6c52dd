//! Font loading and glyph rasterization with swash.

mod font;
mod font_rasterizer;

pub use font::*;
pub use font_rasterizer::*;
