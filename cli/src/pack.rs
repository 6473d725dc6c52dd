use anyhow::{Context, Result};
use glyphpack_atlas::{AtlasFile, GlyphSet, Rasterizer};
use glyphpack_rasterizer::{Font, FontRasterizer};

use crate::{args::BuildArgs, config::Config, streams};

pub fn run(args: &BuildArgs) -> Result<()> {
    let config = Config::resolve(args)?;
    let font_path = config
        .font
        .as_deref()
        .context("No font given, use `--font` or set `font` in the configuration")?;

    let font = Font::open(font_path, config.face)?;
    let mut rasterizer = FontRasterizer::new(font, config.rasterization_param());

    let text = streams::read_text(&args.input)?;
    let atlas = build_atlas(streams::characters(&text), &mut rasterizer, &config)?;

    if let Some(preview) = &args.preview {
        streams::write_preview(&atlas, preview)?;
    }
    streams::write_atlas(&atlas, &args.output)
}

/// Collects, packs and composites the glyphs of `characters` into an atlas in memory.
pub fn build_atlas(
    characters: impl IntoIterator<Item = char>,
    rasterizer: &mut impl Rasterizer,
    config: &Config,
) -> Result<AtlasFile> {
    let glyphs = GlyphSet::collect(characters, rasterizer);
    log::info!(
        "Collected {} glyphs ({} duplicates, {} missing)",
        glyphs.len(),
        glyphs.duplicates(),
        glyphs.missing().len()
    );

    AtlasFile::build(glyphs.into_glyphs(), rasterizer.font_metrics(), config.pack_config())
        .with_context(|| {
            format!(
                "Failed to build a {}x{} atlas at {}pt and {} dpi",
                config.width, config.height, config.size, config.dpi
            )
        })
}
