use std::borrow::Cow;

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, imageops};

/// Single-channel 8-bit edge strength (or binary edge/no-edge) map.
pub type EdgeMap = GrayImage;

/// In-memory 8-bit image, either one channel or three.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    Gray(GrayImage),
    Color(RgbImage),
}

impl PixelBuffer {
    /// Wrap a decoded image, converting to grayscale or RGB as requested
    pub fn from_dynamic(image: DynamicImage, as_gray: bool) -> Self {
        match image {
            DynamicImage::ImageLuma8(gray) if as_gray => Self::Gray(gray),
            DynamicImage::ImageRgb8(rgb) if !as_gray => Self::Color(rgb),
            other if as_gray => Self::Gray(other.to_luma8()),
            other => Self::Color(other.to_rgb8()),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Gray(image) => image.width(),
            Self::Color(image) => image.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Gray(image) => image.height(),
            Self::Color(image) => image.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn channels(&self) -> u8 {
        match self {
            Self::Gray(_) => 1,
            Self::Color(_) => 3,
        }
    }

    /// Luminance-weighted single-channel view; borrows when already gray
    pub fn to_gray(&self) -> Cow<'_, GrayImage> {
        match self {
            Self::Gray(image) => Cow::Borrowed(image),
            Self::Color(image) => Cow::Owned(imageops::grayscale(image)),
        }
    }

    /// Three-channel copy, replicating the luma channel for gray buffers
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            Self::Gray(image) => gray_to_rgb(image),
            Self::Color(image) => image.clone(),
        }
    }
}

impl From<GrayImage> for PixelBuffer {
    fn from(image: GrayImage) -> Self {
        Self::Gray(image)
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(image: RgbImage) -> Self {
        Self::Color(image)
    }
}

impl From<PixelBuffer> for DynamicImage {
    fn from(buffer: PixelBuffer) -> Self {
        match buffer {
            PixelBuffer::Gray(image) => DynamicImage::ImageLuma8(image),
            PixelBuffer::Color(image) => DynamicImage::ImageRgb8(image),
        }
    }
}

pub(crate) fn gray_to_rgb(image: &GrayImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Luma([v]) = *image.get_pixel(x, y);
        Rgb([v, v, v])
    })
}
