use image::{GrayImage, Luma};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use imageproc::filter::separable_filter;

use super::kernel::{sobel_taps, to_response};
use crate::{error::Result, traits::EdgeDetector, types::EdgeMap};

/// Sobel gradient magnitude, normalized so the strongest response is 255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SobelParams {
    /// Aperture of the derivative kernels; positive and odd
    pub kernel_size: u32,
}

impl Default for SobelParams {
    fn default() -> Self {
        Self { kernel_size: 3 }
    }
}

impl EdgeDetector for SobelParams {
    fn name(&self) -> &'static str {
        "sobel"
    }

    fn validate(&self) -> Result<()> {
        super::validate_kernel_size(self.name(), self.kernel_size)
    }

    fn detect_gray(&self, image: &GrayImage) -> Result<EdgeMap> {
        self.validate()?;

        let derivative = sobel_taps(1, self.kernel_size);
        let smoothing = sobel_taps(0, self.kernel_size);
        let plane = to_response(image);
        let grad_x = separable_filter(&plane, &derivative, &smoothing);
        let grad_y = separable_filter(&plane, &smoothing, &derivative);

        let magnitude: Vec<f32> = grad_x
            .pixels()
            .zip(grad_y.pixels())
            .map(|(gx, gy)| gx[0].hypot(gy[0]))
            .collect();
        let max = magnitude.iter().copied().fold(0.0f32, f32::max);

        let width = image.width() as usize;
        Ok(GrayImage::from_fn(image.width(), image.height(), |x, y| {
            if max > 0.0 {
                let m = magnitude[y as usize * width + x as usize];
                Luma([(255.0 * m / max) as u8])
            } else {
                Luma([0])
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdgeError;

    fn vertical_step() -> GrayImage {
        GrayImage::from_fn(32, 16, |x, _| if x < 16 { Luma([20]) } else { Luma([220]) })
    }

    #[test]
    fn test_step_edge_peaks_at_boundary() {
        let edges = SobelParams::default()
            .detect_gray(&vertical_step())
            .expect("Should compute gradients");
        assert_eq!(edges.dimensions(), (32, 16));
        assert_eq!(edges.get_pixel(15, 8)[0], 255);
        assert_eq!(edges.get_pixel(16, 8)[0], 255);
        assert_eq!(edges.get_pixel(4, 8)[0], 0);
        assert_eq!(edges.get_pixel(28, 8)[0], 0);
    }

    #[test]
    fn test_flat_image_yields_zeros() {
        let flat = GrayImage::from_pixel(10, 10, Luma([128]));
        let edges = SobelParams::default().detect_gray(&flat).expect("Should compute gradients");
        assert!(edges.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_larger_apertures_keep_dimensions() {
        for kernel_size in [1, 5, 7] {
            let edges = SobelParams { kernel_size }
                .detect_gray(&vertical_step())
                .expect("Should compute gradients");
            assert_eq!(edges.dimensions(), (32, 16));
            assert!(edges.pixels().any(|p| p[0] == 255));
        }
    }

    #[test]
    fn test_even_or_zero_aperture_rejected() {
        for kernel_size in [0, 2, 4, 33] {
            let result = SobelParams { kernel_size }.detect_gray(&vertical_step());
            assert!(
                matches!(result, Err(EdgeError::InvalidParameter { detector: "sobel", .. })),
                "kernel size {kernel_size} should be rejected"
            );
        }
    }
}
