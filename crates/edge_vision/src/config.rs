//! Default directories, extension allow-list and per-detector parameters.
//!
//! [`EdgeConfig`] is built once at startup (from [`Default`] or a config file)
//! and passed by reference into the batch builder; nothing reads it globally.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::algorithms::{CannyParams, LaplacianParams, SobelParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EdgeConfig {
    /// Directory scanned for images when no input is given
    pub input_dir: PathBuf,
    /// Directory that receives edge maps when no output is given
    pub output_dir: PathBuf,
    /// Directory for side-by-side previews written while visualizing
    pub preview_dir: PathBuf,
    /// Allowed input extensions, matched case-insensitively
    pub extensions: Vec<String>,
    /// Format every edge map is written in
    pub output_extension: String,
    pub recursive: bool,
    pub follow_links: bool,
    /// Decode inputs straight to grayscale
    pub load_as_gray: bool,
    pub canny: CannyParams,
    pub sobel: SobelParams,
    pub laplacian: LaplacianParams,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            input_dir: data_dir.join("raw"),
            output_dir: data_dir.join("edges"),
            preview_dir: data_dir.join("preview"),
            extensions: ["png", "jpg", "jpeg", "bmp", "tif", "tiff"]
                .into_iter()
                .map(String::from)
                .collect(),
            output_extension: "png".to_string(),
            recursive: false,
            follow_links: false,
            load_as_gray: false,
            canny: CannyParams::default(),
            sobel: SobelParams::default(),
            laplacian: LaplacianParams::default(),
        }
    }
}

impl EdgeConfig {
    /// Get the JSON schema for the configuration file
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(EdgeConfig)
    }

    /// Allow-list normalized to lowercase without a leading dot
    pub fn normalized_extensions(&self) -> Vec<String> {
        normalize_extensions(&self.extensions)
    }

    /// Whether `path` carries one of the allowed extensions
    pub fn is_allowed(&self, path: &Path) -> bool {
        has_extension(path, &self.normalized_extensions())
    }
}

pub(crate) fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

pub(crate) fn has_extension(path: &Path, normalized: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| normalized.iter().any(|allowed| *allowed == ext))
}
