//! Reference software rasterizer for triangle lists.
//!
//! Samples pixel centres the way the GPU does, which is enough to predict
//! which pixels a small demo draw should cover.

use crate::math::{clip_to_pixel, Vec2};

/// Twice the signed area of `abc`; positive when counter-clockwise in a y-up frame
pub fn signed_area2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(&(c - a))
}

pub fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    signed_area2(a, b, c).abs() * 0.5
}

fn covers(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    let e0 = signed_area2(a, b, p);
    let e1 = signed_area2(b, c, p);
    let e2 = signed_area2(c, a, p);
    (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
}

/// Rasterize a triangle list given in clip space into a cleared RGBA image
/// (row 0 at top). Trailing vertices that do not form a triangle are ignored.
pub fn rasterize_triangles(clip_positions: &[Vec2], width: u32, height: u32, fill: [u8; 4]) -> Vec<u8> {
    let mut pixels = vec![0u8; (width * height * 4) as usize];
    let resolution = Vec2::new(width as f32, height as f32);

    for tri in clip_positions.chunks_exact(3) {
        let a = clip_to_pixel(tri[0], resolution);
        let b = clip_to_pixel(tri[1], resolution);
        let c = clip_to_pixel(tri[2], resolution);
        if signed_area2(a, b, c) == 0.0 {
            continue;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as u32).min(width);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as u32).min(height);

        for y in min_y..max_y {
            for x in min_x..max_x {
                let centre = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if covers(a, b, c, centre) {
                    let i = ((y * width + x) * 4) as usize;
                    pixels[i..i + 4].copy_from_slice(&fill);
                }
            }
        }
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{pixel_to_clip, points_from_flat};
    use crate::render::pass::{CLIP_SPACE_TRIANGLE, PIXEL_SPACE_RECTANGLE};
    use crate::render::shaders::SOLID_COLOR_RGBA;
    use crate::visual::metrics::{analyze_coverage, PixelBounds};

    #[test]
    fn test_triangle_area() {
        let area = triangle_area(Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(0.0, 3.0));
        assert!((area - 6.0).abs() < 0.0001);
    }

    #[test]
    fn test_pixel_rectangle_fills_its_bounds() {
        let res = Vec2::new(400.0, 300.0);
        let clip: Vec<Vec2> = points_from_flat(&PIXEL_SPACE_RECTANGLE)
            .into_iter()
            .map(|p| pixel_to_clip(p, res))
            .collect();
        assert_eq!(clip.len(), 6);

        let pixels = rasterize_triangles(&clip, 400, 300, SOLID_COLOR_RGBA);
        let metrics = analyze_coverage(&pixels, 400, 300, SOLID_COLOR_RGBA);

        assert_eq!(metrics.bounds, Some(PixelBounds { min_x: 10, min_y: 20, max_x: 79, max_y: 29 }));
        assert_eq!(metrics.filled_pixels, 700);
        assert!((metrics.bounds_fill_ratio - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_single_triangle_covers_half_its_bounds() {
        let clip = points_from_flat(&CLIP_SPACE_TRIANGLE);
        let pixels = rasterize_triangles(&clip, 400, 300, SOLID_COLOR_RGBA);
        let metrics = analyze_coverage(&pixels, 400, 300, SOLID_COLOR_RGBA);

        // (200,150), (200,37.5), (340,150) in pixels
        let expected = triangle_area(
            Vec2::new(200.0, 150.0),
            Vec2::new(200.0, 37.5),
            Vec2::new(340.0, 150.0),
        );
        let filled = metrics.filled_pixels as f32;
        assert!((filled - expected).abs() / expected < 0.03, "filled {} vs {}", filled, expected);
        assert!(metrics.bounds_fill_ratio > 0.45 && metrics.bounds_fill_ratio < 0.55);

        // right angle sits at the canvas centre, triangle extends up and right
        let bounds = metrics.bounds.unwrap();
        assert_eq!(bounds.min_x, 200);
        assert!(bounds.max_y <= 150);
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let clip = [Vec2::ZERO, Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.0)];
        let pixels = rasterize_triangles(&clip, 32, 32, SOLID_COLOR_RGBA);
        assert!(pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_partial_triangle_is_ignored() {
        let clip = [Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0)];
        let pixels = rasterize_triangles(&clip, 8, 8, SOLID_COLOR_RGBA);
        assert!(pixels.iter().all(|&b| b == 0));
    }
}
