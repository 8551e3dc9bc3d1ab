//! Error handling and custom error types
//!
//! Provides unified error handling across the uploaders using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3/R2 error: {0}")]
    S3(String),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_lists_every_variable() {
        let err = Error::MissingEnv(vec![
            "R2_ACCOUNT_ID".to_string(),
            "R2_PUBLIC_URL".to_string(),
        ]);

        assert_eq!(
            err.to_string(),
            "Missing required environment variables: R2_ACCOUNT_ID, R2_PUBLIC_URL"
        );
    }
}
