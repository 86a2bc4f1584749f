use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::{CardError, CardResult};

const ASSET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Resolved image files for one theme: the card background and the
/// frame overlay composited above it.
#[derive(Clone, Debug)]
pub struct AssetSet {
    pub background: PathBuf,
    pub frame: PathBuf,
}

impl AssetSet {
    /// Look up `<dir>/<theme>/background.*` and `<dir>/<theme>/frame.*`.
    pub fn resolve(dir: &Path, theme: &str) -> CardResult<Self> {
        Ok(Self {
            background: find_asset(dir, theme, "background")?,
            frame: find_asset(dir, theme, "frame")?,
        })
    }
}

fn find_asset(dir: &Path, theme: &str, role: &str) -> CardResult<PathBuf> {
    for ext in ASSET_EXTENSIONS {
        let candidate = dir.join(theme).join(format!("{role}.{ext}"));
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(CardError::asset_not_found(format!(
        "theme '{theme}' has no {role} asset under '{}'",
        dir.display()
    )))
}

/// A decoded image, premultiplied and ready to composite.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Vec<u8>,
}

pub fn load_image(path: &Path) -> CardResult<PreparedImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        CardError::asset_not_found(format!("cannot read image '{}': {e}", path.display()))
    })?;
    let dyn_img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul,
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
