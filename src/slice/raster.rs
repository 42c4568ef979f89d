//! Vector rasterization and cropping.
//!
//! The source is rendered once at the supersampling factor. Each slice is
//! cut from that canvas and resampled down to its exact pixel size.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use crate::error::{LayoutError, Result};

use super::PixelRect;

/// Largest image, in pixels, a single slice may allocate (1 GiB of RGBA).
pub const MAX_SLICE_PIXELS: u64 = 1 << 28;

/// A vector source rendered at a fixed supersampling factor.
pub struct Rasterizer {
    canvas: RgbaImage,
    factor: f32,
}

impl Rasterizer {
    /// Render `data` (SVG bytes) at `factor` times its natural size.
    pub fn render(data: &[u8], factor: f32) -> Result<Self> {
        let tree = usvg::Tree::from_data(data, &usvg::Options::default()).map_err(|e| {
            LayoutError::Parse {
                message: format!("Failed to parse vector source: {}", e),
                help: None,
            }
        })?;

        let size = tree.size();
        let width = (size.width() * factor).ceil().max(1.0) as u32;
        let height = (size.height() * factor).ceil().max(1.0) as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| LayoutError::Raster {
            message: format!("Cannot allocate a {}x{} canvas", width, height),
            help: Some("Lower `density` in gabarito.yaml".to_string()),
        })?;

        resvg::render(&tree, Transform::from_scale(factor, factor), &mut pixmap.as_mut());

        Ok(Self {
            canvas: pixmap_to_image(&pixmap),
            factor,
        })
    }

    /// Wrap an already rendered canvas.
    pub fn from_canvas(canvas: RgbaImage, factor: f32) -> Self {
        Self { canvas, factor }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Cut `rect` (source units) out of the canvas as a `rect.width` by
    /// `rect.height` image.
    ///
    /// Parts of `rect` outside the canvas stay transparent. A rectangle
    /// that misses the canvas entirely is an error.
    pub fn crop(&self, rect: &PixelRect) -> Result<RgbaImage> {
        let factor = f64::from(self.factor);
        let (canvas_w, canvas_h) = self.canvas.dimensions();

        let left = (rect.left as f64 * factor).round() as i64;
        let top = (rect.top as f64 * factor).round() as i64;
        let (Some(scaled_w), Some(scaled_h)) = (
            scaled_length(rect.width, factor),
            scaled_length(rect.height, factor),
        ) else {
            return Err(too_large(rect));
        };
        for (w, h) in [(rect.width, rect.height), (scaled_w, scaled_h)] {
            if u64::from(w) * u64::from(h) > MAX_SLICE_PIXELS {
                return Err(too_large(rect));
            }
        }

        let x0 = left.clamp(0, i64::from(canvas_w));
        let y0 = top.clamp(0, i64::from(canvas_h));
        let x1 = left.saturating_add(i64::from(scaled_w)).clamp(0, i64::from(canvas_w));
        let y1 = top.saturating_add(i64::from(scaled_h)).clamp(0, i64::from(canvas_h));
        if x1 <= x0 || y1 <= y0 {
            return Err(LayoutError::Raster {
                message: format!(
                    "{}x{} at ({}, {}) lies outside the {}x{} canvas",
                    rect.width,
                    rect.height,
                    rect.left,
                    rect.top,
                    canvas_w,
                    canvas_h
                ),
                help: None,
            });
        }

        let visible = imageops::crop_imm(
            &self.canvas,
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        )
        .to_image();

        let mut scaled = RgbaImage::from_pixel(scaled_w, scaled_h, Rgba([0, 0, 0, 0]));
        imageops::overlay(&mut scaled, &visible, x0 - left, y0 - top);

        if scaled.dimensions() == (rect.width, rect.height) {
            return Ok(scaled);
        }
        Ok(imageops::resize(&scaled, rect.width, rect.height, FilterType::Lanczos3))
    }
}

/// `length` source units at `factor`, at least one pixel.
fn scaled_length(length: u32, factor: f64) -> Option<u32> {
    let scaled = (f64::from(length) * factor).round().max(1.0);
    (scaled <= f64::from(u32::MAX)).then_some(scaled as u32)
}

fn too_large(rect: &PixelRect) -> LayoutError {
    LayoutError::Raster {
        message: format!(
            "{}x{} at ({}, {}) exceeds the {} pixel limit",
            rect.width, rect.height, rect.left, rect.top, MAX_SLICE_PIXELS
        ),
        help: Some("Check the frame in the baseline file".to_string()),
    }
}

/// Write `image` as PNG.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|e| LayoutError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (pixel, source) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = source.demultiply();
        *pixel = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}
