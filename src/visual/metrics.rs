//! Coverage metrics for read-back frames
//!
//! Measures how much of a frame was painted with a given fill colour and
//! where, so a drawn triangle or rectangle can be checked without comparing
//! images pixel for pixel.

use wasm_bindgen::prelude::*;

/// Axis-aligned pixel bounds, inclusive, in framebuffer orientation (row 0 at top)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBounds {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn area(&self) -> u32 {
        self.width() * self.height()
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// Coverage computed from one RGBA frame
#[derive(Debug, Clone, Default)]
pub struct CoverageMetrics {
    /// Pixels within tolerance of the fill colour
    pub filled_pixels: u32,
    /// Pixels with zero alpha (cleared and untouched)
    pub transparent_pixels: u32,
    /// Anything else (blended edges, stray colour)
    pub other_pixels: u32,
    /// filled / total (0-1)
    pub fill_coverage: f32,
    /// Bounding box of filled pixels, if any
    pub bounds: Option<PixelBounds>,
    /// filled / bounds area (0-1); 1.0 for a solid axis-aligned rectangle
    pub bounds_fill_ratio: f32,
}

/// Per-channel distance allowed when matching the fill colour
pub const COLOR_TOLERANCE: u8 = 2;

fn matches_color(pixel: &[u8], color: [u8; 4]) -> bool {
    pixel
        .iter()
        .zip(color.iter())
        .all(|(&p, &c)| p.abs_diff(c) <= COLOR_TOLERANCE)
}

/// Analyze raw RGBA pixels (4 bytes per pixel, row 0 at top) against `fill`
pub fn analyze_coverage(pixels: &[u8], width: u32, height: u32, fill: [u8; 4]) -> CoverageMetrics {
    let pixel_count = (width * height) as usize;
    if pixel_count == 0 || pixels.len() < pixel_count * 4 {
        return CoverageMetrics::default();
    }

    let mut filled = 0u32;
    let mut transparent = 0u32;
    let mut bounds: Option<PixelBounds> = None;

    for (i, pixel) in pixels.chunks_exact(4).take(pixel_count).enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;

        if matches_color(pixel, fill) {
            filled += 1;
            bounds
                .get_or_insert(PixelBounds { min_x: x, min_y: y, max_x: x, max_y: y })
                .include(x, y);
        } else if pixel[3] == 0 {
            transparent += 1;
        }
    }

    let other = pixel_count as u32 - filled - transparent;
    let bounds_fill_ratio = bounds
        .map(|b| filled as f32 / b.area() as f32)
        .unwrap_or(0.0);

    CoverageMetrics {
        filled_pixels: filled,
        transparent_pixels: transparent,
        other_pixels: other,
        fill_coverage: filled as f32 / pixel_count as f32,
        bounds,
        bounds_fill_ratio,
    }
}

/// Flip rows of an RGBA image; `readPixels` returns the bottom row first
pub fn flip_rows(pixels: &[u8], width: u32, height: u32) -> Vec<u8> {
    let row = (width * 4) as usize;
    let mut out = Vec::with_capacity(pixels.len());
    for y in (0..height as usize).rev() {
        if let Some(line) = pixels.get(y * row..(y + 1) * row) {
            out.extend_from_slice(line);
        }
    }
    out
}

/// WASM-bindgen wrapper for analyzing pixels from JavaScript
#[wasm_bindgen]
pub struct CoverageAnalyzer;

#[wasm_bindgen]
impl CoverageAnalyzer {
    /// Analyze pixel data against an RGBA fill colour and return JSON metrics
    #[wasm_bindgen]
    pub fn analyze(pixels: &[u8], width: u32, height: u32, r: u8, g: u8, b: u8, a: u8) -> String {
        coverage_json(&analyze_coverage(pixels, width, height, [r, g, b, a]))
    }
}

pub fn coverage_json(metrics: &CoverageMetrics) -> String {
    let bounds = match metrics.bounds {
        Some(b) => format!("[{}, {}, {}, {}]", b.min_x, b.min_y, b.max_x, b.max_y),
        None => "null".to_string(),
    };
    format!(
        r#"{{
  "filledPixels": {},
  "transparentPixels": {},
  "otherPixels": {},
  "fillCoverage": {:.4},
  "bounds": {},
  "boundsFillRatio": {:.4}
}}"#,
        metrics.filled_pixels,
        metrics.transparent_pixels,
        metrics.other_pixels,
        metrics.fill_coverage,
        bounds,
        metrics.bounds_fill_ratio
    )
}
