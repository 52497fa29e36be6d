pub mod kernel;
pub mod canny;
pub mod sobel;
pub mod laplacian;

pub use canny::*;
pub use sobel::*;
pub use laplacian::*;

use crate::error::{EdgeError, Result};
use kernel::MAX_KERNEL_SIZE;

/// Apertures must be odd and within `1..=MAX_KERNEL_SIZE`
pub(crate) fn validate_kernel_size(detector: &'static str, kernel_size: u32) -> Result<()> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(EdgeError::invalid(
            detector,
            format!("kernel size must be a positive odd integer, got {kernel_size}"),
        ));
    }
    if kernel_size > MAX_KERNEL_SIZE {
        return Err(EdgeError::invalid(
            detector,
            format!("kernel size {kernel_size} exceeds the maximum of {MAX_KERNEL_SIZE}"),
        ));
    }
    Ok(())
}
