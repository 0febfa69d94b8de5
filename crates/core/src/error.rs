use thiserror::Error;

pub type PixelResult<T> = Result<T, PixelError>;

#[derive(Error, Debug)]
pub enum PixelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Vendor pixel unavailable: {0}")]
    VendorUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
