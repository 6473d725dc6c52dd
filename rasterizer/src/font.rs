use std::{fmt, fs, path::Path, sync::Arc};

use anyhow::{Context, Result, anyhow};
use swash::{CacheKey, FontRef};

/// An owned font face.
///
/// Keeps the font data alive and hands out borrowed [`FontRef`]s for scaling.
#[derive(Clone)]
pub struct Font {
    data: Arc<Vec<u8>>,
    offset: u32,
    key: CacheKey,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("len", &self.data.len())
            .field("offset", &self.offset)
            .finish()
    }
}

impl Font {
    /// Loads the face at `index` of a TrueType / OpenType font or collection.
    pub fn from_bytes(data: Vec<u8>, index: usize) -> Result<Self> {
        let font = FontRef::from_index(&data, index)
            .ok_or_else(|| anyhow!("No usable font face at index {index}"))?;
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data: Arc::new(data),
            offset,
            key,
        })
    }

    pub fn open(path: &Path, index: usize) -> Result<Self> {
        let data =
            fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
        Self::from_bytes(data, index)
            .with_context(|| format!("Failed to load font {}", path.display()))
    }

    pub fn as_swash(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }
}
