use image::GrayImage;

use crate::{
    error::Result,
    types::{EdgeMap, PixelBuffer},
};

/// Trait for edge detection algorithms operating on a single luma channel
pub trait EdgeDetector: Send + Sync {
    /// Short lowercase name of the detector
    fn name(&self) -> &'static str;

    /// Check the parameter set without touching any image
    fn validate(&self) -> Result<()>;

    /// Compute an edge map with the same dimensions as `image`
    fn detect_gray(&self, image: &GrayImage) -> Result<EdgeMap>;
}

/// Port for showing an original image next to its edge map.
///
/// Implementations may block until the user dismisses the view.
pub trait Visualizer: Send + Sync {
    fn show(&self, original: &PixelBuffer, processed: &EdgeMap, titles: (&str, &str)) -> Result<()>;
}
