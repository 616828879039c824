use std::path::Path;

use anyhow::{Context, bail};
use image::{GrayImage, ImageFormat};
use sequencer::NormalizedCanvas;

/// Scales `[0, 1]` values back to 8-bit grayscale.
pub fn to_gray_image(canvas: &NormalizedCanvas) -> anyhow::Result<GrayImage> {
    if canvas.is_empty() {
        bail!(
            "canvas is empty ({} rows x {} columns), nothing to encode",
            canvas.rows(),
            canvas.cols()
        );
    }
    let pixels = canvas
        .values()
        .iter()
        .map(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect();
    GrayImage::from_raw(canvas.cols() as u32, canvas.rows() as u32, pixels)
        .context("canvas size does not match its pixel buffer")
}

pub fn save_png(canvas: &NormalizedCanvas, path: &Path) -> anyhow::Result<()> {
    to_gray_image(canvas)?
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}
