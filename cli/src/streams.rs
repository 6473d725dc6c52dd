//! Input and output streams of the command line tool. The path `-` stands for stdin or stdout.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Read},
    path::Path,
};

use anyhow::{Context, Result};
use glyphpack_atlas::AtlasFile;
use image::GrayImage;

const STANDARD_STREAM: &str = "-";

fn is_standard_stream(path: &Path) -> bool {
    path.as_os_str() == STANDARD_STREAM
}

/// Reads the complete input as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    if is_standard_stream(path) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read characters from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read characters from {path:?}"))
    }
}

/// The characters to put into the atlas, in input order.
///
/// Control characters, line breaks included, never become glyphs.
pub fn characters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| !c.is_control())
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if is_standard_stream(path) {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read from stdin")?;
        Ok(bytes)
    } else {
        fs::read(path).with_context(|| format!("Failed to read {path:?}"))
    }
}

/// Writes a completely built atlas. The file is created only here, after all fallible steps
/// of building have succeeded.
pub fn write_atlas(atlas: &AtlasFile, path: &Path) -> Result<()> {
    if is_standard_stream(path) {
        let mut stdout = io::stdout().lock();
        atlas
            .write_to(&mut stdout)
            .context("Failed to write the atlas to stdout")?;
        return Ok(());
    }

    let file = File::create(path).with_context(|| format!("Failed to create {path:?}"))?;
    let mut writer = BufWriter::new(file);
    atlas
        .write_to(&mut writer)
        .with_context(|| format!("Failed to write the atlas to {path:?}"))?;
    log::info!("Wrote {} bytes to {path:?}", atlas.encoded_len());
    Ok(())
}

/// Saves the canvas as a grayscale PNG.
pub fn write_preview(atlas: &AtlasFile, path: &Path) -> Result<()> {
    let canvas = atlas.canvas();
    let image = GrayImage::from_raw(canvas.width(), canvas.height(), canvas.pixels().to_vec())
        .context("Canvas pixels do not match its size")?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write preview {path:?}"))?;
    log::info!("Wrote preview to {path:?}");
    Ok(())
}
