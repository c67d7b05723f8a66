use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub mod config;
pub mod error;
pub mod logging;
pub mod math;
pub mod render;
pub mod visual;

// Re-export coverage analyzer for JavaScript
pub use visual::metrics::CoverageAnalyzer;

pub use config::DemoConfig;
pub use error::RenderError;

use math::Vec2;
use render::{render_once, DrawnPass, Surface, Variant, WebGLContext};
use visual::{analyze_coverage, check_coverage, flip_rows, generate_coverage_report, CoverageCriteria};
use render::shaders::SOLID_COLOR_RGBA;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(err: RenderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One drawn demo, owning its context and GPU objects until `release`
#[wasm_bindgen]
pub struct WebGlDemo {
    ctx: WebGLContext,
    canvas: HtmlCanvasElement,
    pass: DrawnPass<WebGLContext>,
}

#[wasm_bindgen]
impl WebGlDemo {
    /// Draw `variant` ("clip-space" or "pixel-space") on `canvas`.
    ///
    /// Call once the page has laid the canvas out.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, variant: &str) -> Result<WebGlDemo, JsValue> {
        logging::init(None);
        let variant: Variant = variant.parse().map_err(to_js)?;
        Self::start(canvas, variant).map_err(to_js)
    }

    /// Locate the canvas from a YAML `DemoConfig` and draw
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(yaml: &str) -> Result<WebGlDemo, JsValue> {
        let config = DemoConfig::from_yaml(yaml).map_err(to_js)?;
        logging::init(Some(config.level_filter().map_err(to_js)?));

        let canvas = find_canvas(&config.canvas_selector).map_err(to_js)?;
        Self::start(canvas, config.variant).map_err(to_js)
    }

    fn start(mut canvas: HtmlCanvasElement, variant: Variant) -> Result<WebGlDemo, RenderError> {
        let ctx = match WebGLContext::from_canvas(&canvas) {
            Ok(ctx) => ctx,
            Err(e) => {
                if e == RenderError::ContextUnavailable {
                    alert(&e.to_string());
                }
                log::error!("{}", e);
                return Err(e);
            }
        };

        let pass = render_once(&ctx, &mut canvas, variant)?;

        Ok(Self {
            ctx,
            canvas,
            pass,
        })
    }

    /// Name of the drawn variant
    #[wasm_bindgen]
    pub fn variant(&self) -> String {
        self.pass.summary().variant.to_string()
    }

    /// Number of triangles the draw call produced
    #[wasm_bindgen(js_name = triangleCount)]
    pub fn triangle_count(&self) -> i32 {
        self.pass.summary().primitive_count()
    }

    /// Read back the frame and describe its coverage.
    ///
    /// Must run in the same task as construction; the browser may discard
    /// the drawing buffer once the frame is presented.
    #[wasm_bindgen(js_name = coverageReport)]
    pub fn coverage_report(&self) -> Result<String, JsValue> {
        let (width, height) = self.canvas.backing_size();

        let raw = self.ctx.read_pixels_rgba(width, height).map_err(to_js)?;
        let pixels = flip_rows(&raw, width, height);
        let metrics = analyze_coverage(&pixels, width, height, SOLID_COLOR_RGBA);

        let criteria = CoverageCriteria::for_variant(self.pass.summary().variant, width, height);
        let mut report = generate_coverage_report(&metrics);
        for failure in check_coverage(&metrics, &criteria) {
            report.push_str("FAIL: ");
            report.push_str(&failure);
            report.push('\n');
        }
        Ok(report)
    }

    /// Delete the program, shaders and buffer
    #[wasm_bindgen]
    pub fn release(self) {
        let WebGlDemo { ctx, pass, .. } = self;
        pass.release(&ctx);
    }
}

/// Clip-space position the pixel-space shader computes for a pixel
#[wasm_bindgen(js_name = pixelToClip)]
pub fn pixel_to_clip(x: f32, y: f32, width: f32, height: f32) -> Vec<f32> {
    math::pixel_to_clip(Vec2::new(x, y), Vec2::new(width, height))
        .to_array()
        .to_vec()
}

fn find_canvas(selector: &str) -> Result<HtmlCanvasElement, RenderError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RenderError::Host("no document".to_string()))?;

    document
        .query_selector(selector)
        .map_err(|e| RenderError::Host(format!("{:?}", e)))?
        .ok_or_else(|| RenderError::CanvasNotFound(selector.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| RenderError::CanvasNotFound(format!("{} is not a canvas", selector)))
}

/// User-visible notice for fatal startup problems
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_clip_export() {
        let clip = pixel_to_clip(10.0, 20.0, 400.0, 300.0);
        assert_eq!(clip.len(), 2);
        assert!((clip[0] + 0.95).abs() < 0.0001);
        assert!((clip[1] - 0.866_666_7).abs() < 0.0001);
    }

    #[test]
    fn test_errors_convert_to_strings() {
        // JsValue is only usable on wasm; check the message it would carry
        let err = RenderError::CanvasNotFound("#c".to_string());
        assert_eq!(err.to_string(), "canvas not found: #c");
    }
}
