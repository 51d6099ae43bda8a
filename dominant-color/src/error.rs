use thiserror::Error;

/// Failure to reduce a single image to its dominant color.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has no pixels")]
    Empty,
}

/// Failure to write an image or its info line to disk.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
