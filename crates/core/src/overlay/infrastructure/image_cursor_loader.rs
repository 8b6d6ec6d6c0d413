use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use thiserror::Error;

use crate::overlay::domain::cursor_sprite::CursorSprite;

#[derive(Error, Debug)]
pub enum CursorLoadError {
    #[error("failed to load {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{path} has no alpha channel")]
    NoAlpha { path: PathBuf },
}

/// Loads a cursor image and resizes it to `size x size`.
///
/// The image must decode to a format with an alpha channel. Resampling is
/// `FilterType::Triangle` (bilinear), which is deterministic: the same
/// file always yields the same sprite and the same alpha mask.
pub fn load_cursor(path: &Path, size: u32) -> Result<CursorSprite, CursorLoadError> {
    let img = image::open(path).map_err(|e| CursorLoadError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !img.color().has_alpha() {
        return Err(CursorLoadError::NoAlpha {
            path: path.to_path_buf(),
        });
    }

    let resized = image::imageops::resize(&img.to_rgba8(), size, size, FilterType::Triangle);
    Ok(CursorSprite::from_rgba(resized.as_raw(), size))
}
