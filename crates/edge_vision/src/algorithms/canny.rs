use image::GrayImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{EdgeError, Result},
    traits::EdgeDetector,
    types::EdgeMap,
};

/// Hysteresis thresholds for the Canny detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CannyParams {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: 100.0,
            high_threshold: 200.0,
        }
    }
}

impl EdgeDetector for CannyParams {
    fn name(&self) -> &'static str {
        "canny"
    }

    fn validate(&self) -> Result<()> {
        let (low, high) = (self.low_threshold, self.high_threshold);
        if !low.is_finite() || !high.is_finite() {
            return Err(EdgeError::invalid(self.name(), "thresholds must be finite"));
        }
        if low < 0.0 || high < 0.0 {
            return Err(EdgeError::invalid(
                self.name(),
                format!("thresholds must be non-negative, got ({low}, {high})"),
            ));
        }
        if low >= high {
            return Err(EdgeError::invalid(
                self.name(),
                format!("low threshold {low} must be below high threshold {high}"),
            ));
        }
        Ok(())
    }

    /// Binary edge map, 0 or 255 per pixel
    fn detect_gray(&self, image: &GrayImage) -> Result<EdgeMap> {
        self.validate()?;
        Ok(imageproc::edges::canny(image, self.low_threshold, self.high_threshold))
    }
}
