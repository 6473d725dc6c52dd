use std::io::{self, Write};

use anyhow::{Context, Result};
use glyphpack_atlas::{AtlasFile, Placement};

use crate::{args::InspectArgs, streams};

pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes = streams::read_bytes(&args.file)?;
    let atlas = AtlasFile::read_from(&bytes)
        .with_context(|| format!("Failed to read atlas {:?}", args.file))?;

    let mut stdout = io::stdout().lock();
    describe(&atlas, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Prints the header values followed by one line per glyph record.
pub fn describe(atlas: &AtlasFile, out: &mut impl Write) -> io::Result<()> {
    let canvas = atlas.canvas();
    let font = atlas.font_metrics();
    writeln!(out, "canvas:  {}x{}", canvas.width(), canvas.height())?;
    writeln!(out, "ascent:  {}", font.ascent)?;
    writeln!(out, "descent: {}", font.descent)?;
    writeln!(out, "glyphs:  {}", atlas.records().len())?;
    writeln!(out)?;
    writeln!(out, "code    char  size    offset   advance  position")?;

    for record in atlas.records() {
        let character = match record.character() {
            Some(c) if !c.is_control() => format!("{c:?}"),
            _ => "?".into(),
        };
        let size = format!("{}x{}", record.width, record.height);
        let offset = format!("{},{}", record.x_offset, record.y_offset);
        let position = match record.placement {
            Placement::Placed(p) => format!("{},{}", p.x, p.y),
            Placement::Unplaced => "-".into(),
        };
        writeln!(
            out,
            "U+{:04X}  {character:<5} {size:<7} {offset:<8} {:<8} {position}",
            record.code, record.advance
        )?;
    }
    Ok(())
}
