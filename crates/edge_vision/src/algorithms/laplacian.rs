use image::{GrayImage, Luma};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use imageproc::filter::separable_filter;

use super::kernel::{sobel_taps, to_response};
use crate::{
    error::{EdgeError, Result},
    traits::EdgeDetector,
    types::EdgeMap,
};

/// Absolute Laplacian response `|scale * (d2/dx2 + d2/dy2) + delta|`, saturated to 8 bits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LaplacianParams {
    /// Aperture of the second-derivative kernels; positive and odd
    pub kernel_size: u32,
    pub scale: f64,
    pub delta: f64,
}

impl Default for LaplacianParams {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            scale: 1.0,
            delta: 0.0,
        }
    }
}

impl EdgeDetector for LaplacianParams {
    fn name(&self) -> &'static str {
        "laplacian"
    }

    fn validate(&self) -> Result<()> {
        super::validate_kernel_size(self.name(), self.kernel_size)?;
        if !self.scale.is_finite() || !self.delta.is_finite() {
            return Err(EdgeError::invalid(self.name(), "scale and delta must be finite"));
        }
        Ok(())
    }

    fn detect_gray(&self, image: &GrayImage) -> Result<EdgeMap> {
        self.validate()?;

        // Aperture 1 reduces to the 4-neighbour kernel [0 1 0; 1 -4 1; 0 1 0]
        let second = sobel_taps(2, self.kernel_size);
        let smoothing = sobel_taps(0, self.kernel_size);
        let plane = to_response(image);
        let d2x = separable_filter(&plane, &second, &smoothing);
        let d2y = separable_filter(&plane, &smoothing, &second);

        Ok(GrayImage::from_fn(image.width(), image.height(), |x, y| {
            let lap = f64::from(d2x.get_pixel(x, y)[0] + d2y.get_pixel(x, y)[0]);
            let value = (self.scale * lap + self.delta).abs().round().min(255.0);
            Luma([value as u8])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot() -> GrayImage {
        let mut image = GrayImage::new(9, 9);
        image.put_pixel(4, 4, Luma([10]));
        image
    }

    #[test]
    fn test_unit_aperture_matches_four_neighbour_kernel() {
        let edges = LaplacianParams {
            kernel_size: 1,
            ..Default::default()
        }
        .detect_gray(&dot())
        .expect("Should compute laplacian");
        assert_eq!(edges.get_pixel(4, 4)[0], 40);
        assert_eq!(edges.get_pixel(3, 4)[0], 10);
        assert_eq!(edges.get_pixel(3, 3)[0], 0);
    }

    #[test]
    fn test_three_aperture_response() {
        // [2 0 2; 0 -8 0; 2 0 2]
        let edges = LaplacianParams::default()
            .detect_gray(&dot())
            .expect("Should compute laplacian");
        assert_eq!(edges.get_pixel(4, 4)[0], 80);
        assert_eq!(edges.get_pixel(3, 3)[0], 20);
        assert_eq!(edges.get_pixel(3, 4)[0], 0);
    }

    #[test]
    fn test_response_saturates() {
        let mut image = GrayImage::new(5, 5);
        image.put_pixel(2, 2, Luma([255]));
        let edges = LaplacianParams::default()
            .detect_gray(&image)
            .expect("Should compute laplacian");
        assert_eq!(edges.get_pixel(2, 2)[0], 255);
    }

    #[test]
    fn test_scale_and_delta_are_applied() {
        let params = LaplacianParams {
            kernel_size: 1,
            scale: 2.0,
            delta: 5.0,
        };
        let edges = params.detect_gray(&dot()).expect("Should compute laplacian");
        // |2 * -40 + 5| = 75, |2 * 10 + 5| = 25, flat area = 5
        assert_eq!(edges.get_pixel(4, 4)[0], 75);
        assert_eq!(edges.get_pixel(4, 3)[0], 25);
        assert_eq!(edges.get_pixel(0, 0)[0], 5);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let even = LaplacianParams {
            kernel_size: 4,
            ..Default::default()
        };
        let nan = LaplacianParams {
            scale: f64::NAN,
            ..Default::default()
        };
        assert!(even.validate().is_err());
        assert!(nan.validate().is_err());
    }
}
