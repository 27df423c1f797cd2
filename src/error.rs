//! Error types for the CV viewer

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Viewer-wide result type
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Viewer error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewerError {
    #[error("PDF library is not available")]
    LibraryUnavailable,

    #[error("Element not found: #{0}")]
    MissingElement(String),

    #[error("Failed to load document: {0}")]
    Load(String),

    #[error("Failed to fetch page {page}: {reason}")]
    PageFetch { page: u32, reason: String },

    #[error("Failed to draw page {page}: {reason}")]
    Draw { page: u32, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

impl ViewerError {
    /// Render failures leave the viewer interactive; the rest disable it.
    pub fn is_render_failure(&self) -> bool {
        matches!(self, Self::PageFetch { .. } | Self::Draw { .. })
    }
}

impl From<JsValue> for ViewerError {
    fn from(value: JsValue) -> Self {
        ViewerError::Js(describe_js(&value))
    }
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Human-readable text for a thrown JS value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}
