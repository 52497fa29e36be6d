//! Separable derivative kernels for the gradient detectors.
//!
//! Tap generation follows the extended Sobel construction: a binomial
//! smoothing polynomial `(1 + x)^(n - 1 - order)` multiplied by the finite
//! difference `(x - 1)^order`. An aperture of 1 means "no smoothing", which
//! still needs three taps for any non-zero derivative order.
//!
//! The taps are applied with `imageproc::filter::separable_filter`, which
//! pads by continuity (the border pixel is repeated).

use image::{GrayImage, ImageBuffer, Luma};

/// Largest aperture accepted by the gradient detectors
pub const MAX_KERNEL_SIZE: u32 = 31;

/// Floating point response plane produced by a correlation
pub type Response = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Taps of the 1-D kernel for derivative `order` at aperture `size`
pub fn sobel_taps(order: u32, size: u32) -> Vec<f32> {
    let len = if size == 1 && order > 0 { 3 } else { size.max(1) };
    let smoothing = len.saturating_sub(1).saturating_sub(order);

    let mut taps = vec![1.0f32];
    for _ in 0..smoothing {
        taps = poly_mul(&taps, &[1.0, 1.0]);
    }
    for _ in 0..order {
        taps = poly_mul(&taps, &[-1.0, 1.0]);
    }
    taps
}

fn poly_mul(a: &[f32], b: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Widen an 8-bit image to the float plane the derivative filters run on
pub fn to_response(image: &GrayImage) -> Response {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        Luma([f32::from(image.get_pixel(x, y)[0])])
    })
}
