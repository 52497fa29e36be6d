//! Synthetic geometric test images used as fixtures.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::{
    drawing::{
        draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut,
        draw_hollow_ellipse_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    },
    rect::Rect,
};
use tracing::info;

use crate::{error::Result, io::codec, types::PixelBuffer};

pub const CANVAS_SIZE: u32 = 512;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

fn blank_canvas() -> RgbImage {
    RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, WHITE)
}

/// Rectangle outline between two inclusive corners, `thickness` pixels wide
fn thick_rect(canvas: &mut RgbImage, (x0, y0): (i32, i32), (x1, y1): (i32, i32), thickness: i32, color: Rgb<u8>) {
    let half = thickness / 2;
    for inset in -half..=half {
        let (w, h) = (x1 - x0 + 1 - 2 * inset, y1 - y0 + 1 - 2 * inset);
        if w > 0 && h > 0 {
            let rect = Rect::at(x0 + inset, y0 + inset).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(canvas, rect, color);
        }
    }
}

fn thick_circle(canvas: &mut RgbImage, center: (i32, i32), radius: i32, thickness: i32, color: Rgb<u8>) {
    let half = thickness / 2;
    for r in (radius - half)..=(radius + half) {
        draw_hollow_circle_mut(canvas, center, r, color);
    }
}

fn thick_polyline(canvas: &mut RgbImage, points: &[(f32, f32)], thickness: i32, color: Rgb<u8>) {
    let half = thickness / 2;
    for (i, &start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        for dx in -half..=half {
            for dy in -half..=half {
                let (dx, dy) = (dx as f32, dy as f32);
                draw_line_segment_mut(canvas, (start.0 + dx, start.1 + dy), (end.0 + dx, end.1 + dy), color);
            }
        }
    }
}

pub fn rectangles() -> RgbImage {
    let mut canvas = blank_canvas();
    thick_rect(&mut canvas, (50, 50), (450, 200), 3, BLACK);
    draw_filled_rect_mut(&mut canvas, Rect::at(100, 250).of_size(301, 201), RED);
    canvas
}

pub fn circles() -> RgbImage {
    let mut canvas = blank_canvas();
    thick_circle(&mut canvas, (256, 256), 150, 3, BLACK);
    draw_filled_circle_mut(&mut canvas, (256, 256), 75, BLUE);
    canvas
}

pub fn grid() -> RgbImage {
    let mut canvas = blank_canvas();
    for step in (50..CANVAS_SIZE).step_by(50) {
        let s = step as f32;
        draw_line_segment_mut(&mut canvas, (s, 50.0), (s, 462.0), BLACK);
        draw_line_segment_mut(&mut canvas, (50.0, s), (462.0, s), BLACK);
    }
    canvas
}

pub fn ellipses() -> RgbImage {
    let mut canvas = blank_canvas();
    draw_hollow_ellipse_mut(&mut canvas, (256, 160), 200, 80, BLACK);
    draw_hollow_ellipse_mut(&mut canvas, (256, 360), 120, 100, RED);
    draw_hollow_ellipse_mut(&mut canvas, (256, 360), 60, 30, BLUE);
    canvas
}

pub fn mixed() -> RgbImage {
    let mut canvas = blank_canvas();
    thick_rect(&mut canvas, (30, 30), (200, 200), 4, BLUE);
    draw_filled_circle_mut(&mut canvas, (350, 150), 80, GREEN);
    thick_polyline(&mut canvas, &[(100.0, 300.0), (200.0, 450.0), (50.0, 450.0)], 3, RED);
    canvas
}

/// Named sample images, in generation order
pub fn shapes() -> Vec<(&'static str, RgbImage)> {
    vec![
        ("rectangles", rectangles()),
        ("circles", circles()),
        ("grid", grid()),
        ("ellipses", ellipses()),
        ("mixed", mixed()),
    ]
}

/// Write every sample as PNG into `output_dir`, returning the written paths
pub fn generate_shapes_dataset(output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    info!("Generating synthetic dataset under: {}", output_dir.display());

    let mut written = Vec::new();
    for (name, image) in shapes() {
        let path = output_dir.join(format!("{name}.png"));
        codec::save(&PixelBuffer::Color(image), &path)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_files_written() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let written = generate_shapes_dataset(dir.path().join("raw")).expect("Should generate dataset");

        assert_eq!(written.len(), 5);
        for path in &written {
            let image = codec::load(path, false).expect("Should load sample");
            assert_eq!(image.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        }
        assert!(dir.path().join("raw").join("mixed.png").is_file());
    }

    #[test]
    fn test_samples_are_not_blank() {
        for (name, image) in shapes() {
            assert!(image.pixels().any(|p| *p != WHITE), "{name} is blank");
            assert_eq!(*image.get_pixel(0, 0), WHITE, "{name} corner should stay white");
        }
    }

    #[test]
    fn test_rectangles_geometry() {
        let image = rectangles();
        assert_eq!(*image.get_pixel(50, 120), BLACK);
        assert_eq!(*image.get_pixel(250, 350), RED);
        assert_eq!(*image.get_pixel(250, 120), WHITE);
    }
}
