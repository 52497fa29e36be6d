//! Side-by-side previews for manual inspection of batch results.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

use image::{Rgb, RgbImage, imageops};
use tracing::info;

use crate::{
    error::{EdgeError, Result},
    io::codec,
    pipeline::CancelToken,
    traits::Visualizer,
    types::{EdgeMap, PixelBuffer, gray_to_rgb},
};

const GUTTER: u32 = 8;
const GUTTER_COLOR: Rgb<u8> = Rgb([96, 96, 96]);

/// Visualizer that shows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisualizer;

impl Visualizer for NoopVisualizer {
    fn show(&self, _original: &PixelBuffer, _processed: &EdgeMap, _titles: (&str, &str)) -> Result<()> {
        Ok(())
    }
}

/// Writes a side-by-side preview per image and waits for Enter.
///
/// Answering `q` trips the attached [`CancelToken`], which stops the batch
/// before the next file.
#[derive(Debug)]
pub struct SideBySideViewer {
    preview_dir: PathBuf,
    cancel: Option<CancelToken>,
    shown: AtomicUsize,
}

impl SideBySideViewer {
    pub fn new(preview_dir: impl Into<PathBuf>) -> Self {
        Self {
            preview_dir: preview_dir.into(),
            cancel: None,
            shown: AtomicUsize::new(0),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl Visualizer for SideBySideViewer {
    fn show(&self, original: &PixelBuffer, processed: &EdgeMap, titles: (&str, &str)) -> Result<()> {
        let index = self.shown.fetch_add(1, Ordering::SeqCst);
        let canvas = compose_side_by_side(&original.to_rgb(), &gray_to_rgb(processed));
        let path = self.preview_dir.join(format!("preview_{index:04}.png"));
        codec::save(&PixelBuffer::Color(canvas), &path)?;

        info!("{} | {} -> {}", titles.0, titles.1, path.display());
        eprint!("Press Enter for the next image (q to stop): ");
        io::stderr().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if answer.trim().eq_ignore_ascii_case("q") {
            if let Some(cancel) = &self.cancel {
                cancel.cancel();
            }
        }
        Ok(())
    }
}

/// Place `left` and `right` next to each other, separated by a gutter
pub fn compose_side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + GUTTER + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::from_pixel(width, height, GUTTER_COLOR);
    imageops::replace(&mut canvas, left, 0, 0);
    imageops::replace(&mut canvas, right, i64::from(left.width() + GUTTER), 0);
    canvas
}

/// Lay `images` out row by row in `cols` columns of equal cell size
pub fn compose_grid(images: &[RgbImage], cols: usize) -> Result<RgbImage> {
    if images.is_empty() {
        return Err(EdgeError::Config("grid needs at least one image".to_string()));
    }
    let cols = cols.clamp(1, images.len());
    let rows = images.len().div_ceil(cols);

    let cell_w = images.iter().map(RgbImage::width).max().unwrap_or(0);
    let cell_h = images.iter().map(RgbImage::height).max().unwrap_or(0);
    let width = cols as u32 * cell_w + (cols as u32 - 1) * GUTTER;
    let height = rows as u32 * cell_h + (rows as u32 - 1) * GUTTER;

    let mut canvas = RgbImage::from_pixel(width, height, GUTTER_COLOR);
    for (i, image) in images.iter().enumerate() {
        let (col, row) = ((i % cols) as u32, (i / cols) as u32);
        let x = col * (cell_w + GUTTER);
        let y = row * (cell_h + GUTTER);
        imageops::replace(&mut canvas, image, i64::from(x), i64::from(y));
    }
    Ok(canvas)
}
