//! Error types for asset loading.
//!
//! GPU setup and frame rendering report through `anyhow`; the registries
//! return [`SceneError`] so callers can tell a missing file from an image the
//! renderer cannot use.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Only 3-channel RGB and 4-channel RGBA images can become textures.
    #[error("images with {channels} channels are not supported (expected 3 or 4)")]
    UnsupportedChannels { channels: u8 },
    #[error("all {capacity} texture slots are in use")]
    CapacityExceeded { capacity: usize },
    #[error("texture upload failed: {0}")]
    Upload(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
