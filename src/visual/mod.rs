//! Frame coverage checks
//!
//! Tools for verifying what a draw put on screen: metrics over read-back
//! pixels, a reference rasterizer, and thresholds built from it.

pub mod criteria;
pub mod metrics;
pub mod raster;

pub use criteria::{check_coverage, generate_coverage_report, CoverageCriteria};
pub use metrics::{analyze_coverage, flip_rows, CoverageAnalyzer, CoverageMetrics, PixelBounds};
pub use raster::{rasterize_triangles, triangle_area};
