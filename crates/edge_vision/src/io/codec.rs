//! Reading images into [`PixelBuffer`]s and writing them back atomically.

use std::{
    fs,
    io::{Cursor, Write},
    path::Path,
};

use image::{ColorType, GrayImage, ImageFormat};
use tracing::debug;

use crate::{
    error::{EdgeError, Result},
    types::PixelBuffer,
};

/// Load an image, converting it to grayscale or RGB
pub fn load(path: impl AsRef<Path>, as_gray: bool) -> Result<PixelBuffer> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(EdgeError::NotFound(path.to_path_buf()));
    }

    let image = image::open(path).map_err(|source| EdgeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PixelBuffer::from_dynamic(image, as_gray))
}

/// Save a buffer in the format implied by the extension of `path`.
///
/// Missing parent directories are created. The file only appears once the
/// whole image has been encoded and written.
pub fn save(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match buffer {
        PixelBuffer::Gray(image) => write_atomic(image.as_raw(), image.dimensions(), ColorType::L8, path),
        PixelBuffer::Color(image) => write_atomic(image.as_raw(), image.dimensions(), ColorType::Rgb8, path),
    }
}

/// Save a single-channel image (e.g. an edge map)
pub fn save_gray(image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    write_atomic(image.as_raw(), image.dimensions(), ColorType::L8, path.as_ref())
}

/// Resolve an output extension to a format able to encode 8-bit grayscale
pub fn gray_output_format(extension: &str) -> Result<ImageFormat> {
    let format = ImageFormat::from_extension(extension)
        .ok_or_else(|| EdgeError::Config(format!("`{extension}` is not a known image format")))?;

    let mut scratch = Cursor::new(Vec::new());
    image::write_buffer_with_format(&mut scratch, &[0], 1, 1, ColorType::L8, format).map_err(|e| {
        EdgeError::Config(format!("cannot write 8-bit grayscale as `{extension}`: {e}"))
    })?;
    Ok(format)
}

fn write_atomic(raw: &[u8], (width, height): (u32, u32), color: ColorType, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).map_err(|e| EdgeError::encode(path, e))?;

    let mut encoded = Cursor::new(Vec::new());
    image::write_buffer_with_format(&mut encoded, raw, width, height, color, format)
        .map_err(|e| EdgeError::encode(path, e))?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| EdgeError::encode(path, e))?;

    let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(|e| EdgeError::encode(path, e))?;
    staged
        .write_all(encoded.get_ref())
        .map_err(|e| EdgeError::encode(path, e))?;
    staged.persist(path).map_err(|e| EdgeError::encode(path, e.error))?;

    debug!("Wrote {}x{} {:?} image to {}", width, height, format, path.display());
    Ok(())
}
