//! Resolution of a detector name plus parameter overrides into a closed
//! [`Detector`] variant, and the single `detect` entry point.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::{
    algorithms::{CannyParams, LaplacianParams, SobelParams},
    config::EdgeConfig,
    error::{EdgeError, Result},
    traits::EdgeDetector,
    types::{EdgeMap, PixelBuffer},
};

#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames,
    PartialEq, Eq, Hash
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EdgeMethod {
    /// Gradient + non-maximum suppression + hysteresis, binary output
    #[default]
    Canny,
    /// L2 norm of horizontal and vertical first derivatives
    Sobel,
    /// Absolute second-derivative response
    Laplacian,
}

impl EdgeMethod {
    /// Parse a method name, rejecting anything outside the known set
    pub fn parse(name: &str) -> Result<Self> {
        name.trim()
            .parse()
            .map_err(|_| EdgeError::UnsupportedMethod {
                name: name.to_string(),
                available: available_methods().join(", "),
            })
    }

    /// Capitalized name used in titles
    pub fn title(&self) -> &'static str {
        match self {
            Self::Canny => "Canny",
            Self::Sobel => "Sobel",
            Self::Laplacian => "Laplacian",
        }
    }
}

/// Sorted names of the available edge detection methods
pub fn available_methods() -> Vec<&'static str> {
    let mut names = EdgeMethod::VARIANTS.to_vec();
    names.sort_unstable();
    names
}

/// Command-line overrides layered over the configured defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamOverrides {
    pub canny_low: Option<f32>,
    pub canny_high: Option<f32>,
    pub sobel_kernel_size: Option<u32>,
    pub laplacian_kernel_size: Option<u32>,
    pub laplacian_scale: Option<f64>,
    pub laplacian_delta: Option<f64>,
}

/// A detector together with its frozen parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum Detector {
    Canny(CannyParams),
    Sobel(SobelParams),
    Laplacian(LaplacianParams),
}

impl Detector {
    /// Merge `overrides` over the defaults in `config` for `method`
    pub fn resolve(method: EdgeMethod, config: &EdgeConfig, overrides: &ParamOverrides) -> Self {
        match method {
            EdgeMethod::Canny => Self::Canny(CannyParams {
                low_threshold: overrides.canny_low.unwrap_or(config.canny.low_threshold),
                high_threshold: overrides.canny_high.unwrap_or(config.canny.high_threshold),
            }),
            EdgeMethod::Sobel => Self::Sobel(SobelParams {
                kernel_size: overrides.sobel_kernel_size.unwrap_or(config.sobel.kernel_size),
            }),
            EdgeMethod::Laplacian => Self::Laplacian(LaplacianParams {
                kernel_size: overrides
                    .laplacian_kernel_size
                    .unwrap_or(config.laplacian.kernel_size),
                scale: overrides.laplacian_scale.unwrap_or(config.laplacian.scale),
                delta: overrides.laplacian_delta.unwrap_or(config.laplacian.delta),
            }),
        }
    }

    /// Resolve from a method name; unknown names fail with `UnsupportedMethod`
    pub fn from_name(name: &str, config: &EdgeConfig, overrides: &ParamOverrides) -> Result<Self> {
        Ok(Self::resolve(EdgeMethod::parse(name)?, config, overrides))
    }

    /// Detector for `method` with the configured defaults
    pub fn with_defaults(method: EdgeMethod, config: &EdgeConfig) -> Self {
        Self::resolve(method, config, &ParamOverrides::default())
    }

    pub fn method(&self) -> EdgeMethod {
        match self {
            Self::Canny(_) => EdgeMethod::Canny,
            Self::Sobel(_) => EdgeMethod::Sobel,
            Self::Laplacian(_) => EdgeMethod::Laplacian,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.as_edge_detector().validate()
    }

    fn as_edge_detector(&self) -> &dyn EdgeDetector {
        match self {
            Self::Canny(params) => params,
            Self::Sobel(params) => params,
            Self::Laplacian(params) => params,
        }
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::with_defaults(EdgeMethod::default(), &EdgeConfig::default())
    }
}

/// Compute the edge map of `image`; color input is converted to luma first
pub fn detect(image: &PixelBuffer, detector: &Detector) -> Result<EdgeMap> {
    let gray = image.to_gray();
    detector.as_edge_detector().detect_gray(&gray)
}

/// Like [`detect`], resolving `method` by name against the configured defaults
pub fn detect_by_name(image: &PixelBuffer, method: &str, config: &EdgeConfig) -> Result<EdgeMap> {
    let detector = Detector::from_name(method, config, &ParamOverrides::default())?;
    detect(image, &detector)
}
