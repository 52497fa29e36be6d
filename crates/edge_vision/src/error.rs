use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("Not found or not a directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No images found in: {}", .0.display())]
    NoImages(PathBuf),

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("Invalid {detector} parameter: {reason}")]
    InvalidParameter {
        detector: &'static str,
        reason: String,
    },

    #[error("Unsupported method: {name}. Available: {available}")]
    UnsupportedMethod { name: String, available: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EdgeError {
    pub(crate) fn invalid(detector: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            detector,
            reason: reason.into(),
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Encode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EdgeError>;
