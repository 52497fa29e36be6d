use clap::Args;
use edge_vision::{EdgeConfig, ParamOverrides};
use std::fs;
use std::path::Path;
use thiserror::Error;


#[derive(Error, Debug)]
pub enum EdgeCliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}


/// Detector-specific overrides layered on top of the configured defaults
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct DetectorArgs {
    /// Override Canny lower threshold
    #[arg(long)]
    pub canny_low: Option<f32>,
    /// Override Canny upper threshold
    #[arg(long)]
    pub canny_high: Option<f32>,
    /// Override Sobel kernel size (positive odd integer)
    #[arg(long)]
    pub sobel_ksize: Option<u32>,
    /// Override Laplacian kernel size (positive odd integer)
    #[arg(long)]
    pub laplacian_ksize: Option<u32>,
    /// Override Laplacian response scale
    #[arg(long)]
    pub laplacian_scale: Option<f64>,
    /// Override Laplacian response offset
    #[arg(long, allow_hyphen_values = true)]
    pub laplacian_delta: Option<f64>,
}

impl DetectorArgs {
    pub fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            canny_low: self.canny_low,
            canny_high: self.canny_high,
            sobel_kernel_size: self.sobel_ksize,
            laplacian_kernel_size: self.laplacian_ksize,
            laplacian_scale: self.laplacian_scale,
            laplacian_delta: self.laplacian_delta,
        }
    }
}


/// Reading and writing [`EdgeConfig`] files
pub trait ConfigFile: Sized {
    /// Load configuration from a TOML string
    fn from_toml(content: &str) -> Result<Self, EdgeCliError>;

    /// Load configuration from a JSON string
    fn from_json(content: &str) -> Result<Self, EdgeCliError>;

    /// Convert configuration to a TOML string
    fn to_toml(&self) -> Result<String, EdgeCliError>;

    /// Convert configuration to a JSON string
    fn to_json(&self) -> Result<String, EdgeCliError>;

    /// Auto-detect file format and load configuration
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EdgeCliError> {
        let path_ref = path.as_ref();
        match extension(path_ref).as_deref() {
            Some("toml") => Self::from_toml(&fs::read_to_string(path_ref)?),
            Some("json") => Self::from_json(&fs::read_to_string(path_ref)?),
            _ => Err(EdgeCliError::UnsupportedFileFormat),
        }
    }

    /// Save configuration, choosing the format from the file extension
    fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EdgeCliError> {
        let path_ref = path.as_ref();
        let content = match extension(path_ref).as_deref() {
            Some("toml") => self.to_toml()?,
            Some("json") => self.to_json()?,
            _ => return Err(EdgeCliError::UnsupportedFileFormat),
        };
        fs::write(path_ref, content)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

impl ConfigFile for EdgeConfig {
    fn from_toml(content: &str) -> Result<Self, EdgeCliError> {
        Ok(toml::from_str(content)?)
    }

    fn from_json(content: &str) -> Result<Self, EdgeCliError> {
        Ok(serde_json::from_str(content)?)
    }

    fn to_toml(&self) -> Result<String, EdgeCliError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn to_json(&self) -> Result<String, EdgeCliError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EdgeConfig::from_toml(
            r#"
            input_dir = "photos"
            recursive = true

            [canny]
            low_threshold = 50.0
            "#,
        )
        .expect("Should parse TOML");

        assert_eq!(config.input_dir, PathBuf::from("photos"));
        assert!(config.recursive);
        assert_eq!(config.canny.low_threshold, 50.0);
        assert_eq!(config.canny.high_threshold, 200.0);
        assert_eq!(config.output_dir, EdgeConfig::default().output_dir);
    }

    #[test]
    fn test_file_roundtrip_by_extension() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut config = EdgeConfig::default();
        config.sobel.kernel_size = 7;

        for name in ["edges.toml", "edges.json"] {
            let path = dir.path().join(name);
            config.to_file(&path).expect("Should write config");
            let loaded = EdgeConfig::from_file(&path).expect("Should read config");
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(matches!(
            EdgeConfig::from_file("edges.yaml"),
            Err(EdgeCliError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn test_detector_args_map_to_overrides() {
        let args = DetectorArgs {
            canny_high: Some(150.0),
            sobel_ksize: Some(5),
            ..Default::default()
        };
        let overrides = args.overrides();
        assert_eq!(overrides.canny_high, Some(150.0));
        assert_eq!(overrides.sobel_kernel_size, Some(5));
        assert_eq!(overrides.canny_low, None);
    }
}
