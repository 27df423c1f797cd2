//! Canvas drawing surface

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Window};

use crate::error::{describe_js, Result, ViewerError};
use crate::viewer::{DrawingSurface, SurfaceLayout};

pub struct CanvasSurface {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: Window,
}

impl CanvasSurface {
    pub fn new(container: HtmlElement, canvas: HtmlCanvasElement, window: Window) -> Result<Self> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| ViewerError::Js("2d canvas context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ViewerError::Js("unexpected canvas context type".to_string()))?;

        Ok(Self {
            container,
            canvas,
            context,
            window,
        })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }
}

impl DrawingSurface for CanvasSurface {
    fn container_width(&self) -> f64 {
        f64::from(self.container.client_width())
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn apply_layout(&self, layout: &SurfaceLayout) {
        self.canvas.set_width(layout.pixel_width);
        self.canvas.set_height(layout.pixel_height);

        let style = self.canvas.style();
        for (property, value) in [("width", layout.css_width), ("height", layout.css_height)] {
            if let Err(e) = style.set_property(property, &format!("{}px", value)) {
                tracing::warn!("Failed to set canvas {}: {}", property, describe_js(&e));
            }
        }
    }
}
