use crate::config::ConfigError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The surface has nowhere to draw; aborts this render only
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("unknown export format `{0}` (expected svg or png)")]
    UnknownFormat(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
