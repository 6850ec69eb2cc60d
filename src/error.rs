use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid canvas size {width}x{height}: all dimensions must be positive")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("road generation requires a sized terrain raster; enable terrain or disable roads")]
    MissingTerrain,

    #[error("failed to parse config: {0}")]
    Config(#[from] ron::error::SpannedError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
