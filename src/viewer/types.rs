//! Viewer value types

/// Page size at a given scale, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Smallest display scale used when the container is too narrow to fit the page.
pub const MIN_DISPLAY_SCALE: f64 = 0.1;

/// Scale at which a page of `natural` size (scale 1.0) fits the container width.
pub fn fit_scale(natural: Viewport, container_width: f64, padding: f64) -> f64 {
    if natural.width <= 0.0 || !natural.width.is_finite() {
        return 1.0;
    }
    let scale = (container_width - padding) / natural.width;
    if scale.is_finite() && scale > MIN_DISPLAY_SCALE {
        scale
    } else {
        MIN_DISPLAY_SCALE
    }
}

/// Canvas geometry for one render pass.
///
/// The backing store is sized in device pixels while the element is styled in
/// CSS pixels, so the page is drawn at native sharpness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub display_scale: f64,
    /// Device pixel ratio
    pub output_scale: f64,
    /// Page viewport at `display_scale`
    pub viewport: Viewport,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub css_width: u32,
    pub css_height: u32,
}

impl SurfaceLayout {
    pub fn new(display_scale: f64, viewport: Viewport, device_pixel_ratio: f64) -> Self {
        let output_scale = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };

        Self {
            display_scale,
            output_scale,
            viewport,
            pixel_width: floor_px(viewport.width * output_scale),
            pixel_height: floor_px(viewport.height * output_scale),
            css_width: floor_px(viewport.width),
            css_height: floor_px(viewport.height),
        }
    }

    /// Context transform for the draw call; `None` when no scaling is needed.
    pub fn transform(&self) -> Option<[f64; 6]> {
        if self.output_scale == 1.0 {
            None
        } else {
            Some([self.output_scale, 0.0, 0.0, self.output_scale, 0.0, 0.0])
        }
    }
}

fn floor_px(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u32
    } else {
        0
    }
}
