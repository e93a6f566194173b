use std::path::Path;

use image::DynamicImage;

use crate::error::{Result, SceneError};

/**
 * This module contains everything that is loaded once at scene setup and read
 * while rendering: image files, the tagged texture slots, the material table
 * and the primitive mesh buffers.
 */
pub mod material;
pub mod mesh;
pub mod texture;

pub fn load_binary(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an image file and flip it so that row 0 is the bottom of the
/// picture, which is what the primitive texture coordinates expect.
///
/// Only 3-channel and 4-channel images are accepted.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let data = load_binary(path)?;
    let img = image::load_from_memory(&data).map_err(|source| SceneError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    check_channels(&img)?;
    Ok(img.flipv())
}

pub fn check_channels(img: &DynamicImage) -> Result<()> {
    match img.color().channel_count() {
        3 | 4 => Ok(()),
        channels => Err(SceneError::UnsupportedChannels { channels }),
    }
}
