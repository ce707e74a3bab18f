use thiserror::Error;

/// Error type returned by facecrop operations.
#[derive(Debug, Error)]
pub enum FaceCropError {
    /// The input image is unusable: zero dimensions, undecodable bytes,
    /// or a pixel layout the normalizer cannot convert.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The external face detector rejected the normalized image.
    #[error("face detection failed: {0}")]
    DetectionFailed(String),
}
