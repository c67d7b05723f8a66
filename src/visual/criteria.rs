//! Pass/fail checks for a drawn frame
//!
//! Expected coverage is predicted by rasterizing the variant's geometry in
//! software, then compared against what the GPU actually produced.

use super::metrics::{analyze_coverage, CoverageMetrics};
use super::raster::rasterize_triangles;
use crate::math::{pixel_to_clip, points_from_flat, Vec2};
use crate::render::pass::Variant;
use crate::render::shaders::SOLID_COLOR_RGBA;

/// Test thresholds for a frame
pub struct CoverageCriteria {
    /// Filled pixel count the frame should have
    pub expected_filled: u32,
    /// Allowed relative deviation from `expected_filled`
    pub filled_tolerance: f32,
    pub min_bounds_fill_ratio: f32,
    pub max_bounds_fill_ratio: f32,
    /// Pixels that are neither fill nor cleared, as a fraction of the total
    pub max_other_fraction: f32,
}

impl Default for CoverageCriteria {
    fn default() -> Self {
        Self {
            expected_filled: 0,
            filled_tolerance: 0.05,
            min_bounds_fill_ratio: 0.0,
            max_bounds_fill_ratio: 1.0,
            max_other_fraction: 0.01,
        }
    }
}

impl CoverageCriteria {
    /// Criteria for `variant` drawn at `width` x `height`
    pub fn for_variant(variant: Variant, width: u32, height: u32) -> Self {
        let resolution = Vec2::new(width as f32, height as f32);
        let clip: Vec<Vec2> = points_from_flat(variant.positions())
            .into_iter()
            .map(|p| match variant {
                Variant::ClipSpace => p,
                Variant::PixelSpace => pixel_to_clip(p, resolution),
            })
            .collect();

        let reference = rasterize_triangles(&clip, width, height, SOLID_COLOR_RGBA);
        let predicted = analyze_coverage(&reference, width, height, SOLID_COLOR_RGBA);

        let (min_ratio, max_ratio) = match variant {
            // one right triangle fills half its bounding box
            Variant::ClipSpace => (0.4, 0.6),
            // two triangles sharing a diagonal fill the rectangle
            Variant::PixelSpace => (0.95, 1.0),
        };

        Self {
            expected_filled: predicted.filled_pixels,
            min_bounds_fill_ratio: min_ratio,
            max_bounds_fill_ratio: max_ratio,
            ..Self::default()
        }
    }
}

/// Check if metrics meet the given criteria
pub fn check_coverage(metrics: &CoverageMetrics, criteria: &CoverageCriteria) -> Vec<String> {
    let mut failures = Vec::new();

    let expected = criteria.expected_filled as f32;
    let filled = metrics.filled_pixels as f32;
    let deviation = if expected > 0.0 {
        (filled - expected).abs() / expected
    } else if filled > 0.0 {
        1.0
    } else {
        0.0
    };
    if deviation > criteria.filled_tolerance {
        failures.push(format!(
            "Filled pixels {} deviate {:.2}% from expected {}",
            metrics.filled_pixels,
            deviation * 100.0,
            criteria.expected_filled
        ));
    }

    if metrics.bounds.is_some() {
        if metrics.bounds_fill_ratio < criteria.min_bounds_fill_ratio {
            failures.push(format!(
                "Bounds fill ratio {:.2} below minimum {:.2}",
                metrics.bounds_fill_ratio, criteria.min_bounds_fill_ratio
            ));
        }
        if metrics.bounds_fill_ratio > criteria.max_bounds_fill_ratio {
            failures.push(format!(
                "Bounds fill ratio {:.2} above maximum {:.2}",
                metrics.bounds_fill_ratio, criteria.max_bounds_fill_ratio
            ));
        }
    }

    let total = metrics.filled_pixels + metrics.transparent_pixels + metrics.other_pixels;
    if total > 0 {
        let other_fraction = metrics.other_pixels as f32 / total as f32;
        if other_fraction > criteria.max_other_fraction {
            failures.push(format!(
                "Stray pixels {:.2}% above maximum {:.2}%",
                other_fraction * 100.0,
                criteria.max_other_fraction * 100.0
            ));
        }
    }

    failures
}

/// Generate a report for coverage metrics
pub fn generate_coverage_report(metrics: &CoverageMetrics) -> String {
    let bounds = match metrics.bounds {
        Some(b) => format!(
            "({}, {}) .. ({}, {}) [{}x{}]",
            b.min_x,
            b.min_y,
            b.max_x,
            b.max_y,
            b.width(),
            b.height()
        ),
        None => "none".to_string(),
    };
    format!(
        r#"Coverage Report
===============
Filled:       {} px ({:.2}%)
Transparent:  {} px
Other:        {} px
Bounds:       {}
Bounds Fill:  {:.2}%
"#,
        metrics.filled_pixels,
        metrics.fill_coverage * 100.0,
        metrics.transparent_pixels,
        metrics.other_pixels,
        bounds,
        metrics.bounds_fill_ratio * 100.0
    )
}
