use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glyphpack_atlas::PackConfig;
use glyphpack_rasterizer::RasterizationParam;
use serde::Deserialize;

use crate::args::BuildArgs;

/// Intermediate representation of the TOML configuration file.
///
/// Every value is optional, missing ones fall back to the command line or the defaults.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub font: Option<PathBuf>,
    /// Face index inside a font collection.
    pub face: Option<usize>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub gap: Option<u32>,
    pub size: Option<f32>,
    pub dpi: Option<u32>,
    pub hinted: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {path:?}"))?;
        Self::parse(&text).with_context(|| format!("Invalid configuration {path:?}"))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// The resolved build configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub font: Option<PathBuf>,
    pub face: usize,
    pub width: u32,
    pub height: u32,
    pub gap: u32,
    pub size: f32,
    pub dpi: u32,
    pub hinted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: None,
            face: 0,
            width: 256,
            height: 256,
            gap: 1,
            size: 12.0,
            dpi: 72,
            hinted: true,
        }
    }
}

impl Config {
    /// Command line arguments take precedence over the configuration file, which takes
    /// precedence over the defaults.
    pub fn resolve(args: &BuildArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        let config = Self::default().merge(file).merge(ConfigFile::from(args));
        config.validate()?;
        Ok(config)
    }

    fn merge(self, file: ConfigFile) -> Self {
        Self {
            font: file.font.or(self.font),
            face: file.face.unwrap_or(self.face),
            width: file.width.unwrap_or(self.width),
            height: file.height.unwrap_or(self.height),
            gap: file.gap.unwrap_or(self.gap),
            size: file.size.unwrap_or(self.size),
            dpi: file.dpi.unwrap_or(self.dpi),
            hinted: file.hinted.unwrap_or(self.hinted),
        }
    }

    fn validate(&self) -> Result<()> {
        self.pack_config().validate()?;
        if !(self.size.is_finite() && self.size > 0.0) {
            bail!("Font size must be positive: {}", self.size);
        }
        if self.dpi == 0 {
            bail!("DPI must be positive");
        }
        Ok(())
    }

    pub fn pack_config(&self) -> PackConfig {
        PackConfig::new(self.width, self.height, self.gap)
    }

    pub fn rasterization_param(&self) -> RasterizationParam {
        RasterizationParam {
            size: self.size,
            dpi: self.dpi,
            hinted: self.hinted,
        }
    }
}

impl From<&BuildArgs> for ConfigFile {
    fn from(args: &BuildArgs) -> Self {
        Self {
            font: args.font.clone(),
            face: None,
            width: args.width,
            height: args.height,
            gap: args.gap,
            size: args.size,
            dpi: args.dpi,
            hinted: None,
        }
    }
}
