use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Packs font glyphs into a single channel texture atlas.
#[derive(Debug, Parser)]
#[command(name = "glyphpack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rasterize the input characters and write the binary atlas.
    Build(BuildArgs),
    /// Print the header and glyph table of an atlas file.
    Inspect(InspectArgs),
}

#[derive(Debug, Default, Args)]
pub struct BuildArgs {
    /// TrueType / OpenType font to rasterize.
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// UTF-8 text file with the characters to include, `-` for stdin.
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Atlas file to write, `-` for stdout.
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// TOML configuration file. Command line options take precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Padding between glyphs, rows and the canvas border in pixels.
    #[arg(long)]
    pub gap: Option<u32>,

    /// Font size in points.
    #[arg(short, long)]
    pub size: Option<f32>,

    /// Render resolution in dots per inch.
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Also write the canvas as a grayscale PNG.
    #[arg(long)]
    pub preview: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// The atlas file, `-` for stdin.
    pub file: PathBuf,
}
