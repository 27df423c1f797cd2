//! Configuration for the CV viewer
//!
//! Every field has a default matching the portfolio page markup, so the
//! viewer can be mounted without passing anything from JavaScript.

use serde::Deserialize;
use std::time::Duration;
use wasm_bindgen::JsValue;

use crate::error::{Result, ViewerError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// URL of the PDF to display
    pub document_url: String,
    /// Horizontal space (CSS px) left free around the page inside the container
    pub container_padding: f64,
    /// Quiet window before a resize re-renders the current page
    pub resize_debounce_ms: u32,
    pub elements: ElementIds,
    pub fallback: FallbackText,
    /// `tracing` filter directives, e.g. `cv_viewer=debug`
    pub log_filter: String,
}

/// DOM element ids the viewer binds to
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub container: String,
    pub canvas: String,
    pub prev_button: String,
    pub next_button: String,
    pub page_number: String,
    pub page_count: String,
}

/// Text shown in place of the viewer when it cannot run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FallbackText {
    pub load_failed: String,
    pub library_missing: String,
    pub link_text: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            document_url: "documents/CV-RTPR-2026.pdf".to_string(),
            container_padding: 32.0,
            resize_debounce_ms: 100,
            elements: ElementIds::default(),
            fallback: FallbackText::default(),
            log_filter: crate::logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        ElementIds {
            container: "cv-viewer-container".to_string(),
            canvas: "pdf-render".to_string(),
            prev_button: "prev-page".to_string(),
            next_button: "next-page".to_string(),
            page_number: "page-num".to_string(),
            page_count: "page-count".to_string(),
        }
    }
}

impl Default for FallbackText {
    fn default() -> Self {
        FallbackText {
            load_failed: "Unable to load PDF viewer.".to_string(),
            library_missing: "PDF library failed to load.".to_string(),
            link_text: "Download CV".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Read a config object passed from JavaScript. `undefined` and `null`
    /// yield the defaults.
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| ViewerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.document_url.trim().is_empty() {
            return Err(ViewerError::InvalidConfig(
                "documentUrl must not be empty".to_string(),
            ));
        }
        if !self.container_padding.is_finite() || self.container_padding < 0.0 {
            return Err(ViewerError::InvalidConfig(format!(
                "containerPadding must be a non-negative number, got {}",
                self.container_padding
            )));
        }
        if self.resize_debounce_ms == 0 {
            return Err(ViewerError::InvalidConfig(
                "resizeDebounceMs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.resize_debounce_ms))
    }
}
