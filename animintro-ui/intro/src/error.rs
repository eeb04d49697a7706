use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntroError>;

/// Errors produced while preparing the intro screen.
#[derive(Debug, Error)]
pub enum IntroError {
    #[error("image request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("image decoding failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image preparation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("asset not found: {0}")]
    AssetNotFound(String),
}
