//! CV Viewer
//!
//! A WASM module that shows the portfolio CV inside the page using PDF.js:
//! - Fit-to-width page rendering at device pixel density
//! - Previous/next navigation with coalesced render requests
//! - Debounced re-rendering when the window is resized
//! - A direct download link when the document cannot be shown
//!
//! The render coordination itself lives in [`viewer`] and has no browser
//! dependency; [`pdfjs`] and [`dom`] plug it into the page.

use std::rc::Rc;

use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod pdfjs;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use viewer::{CoordinatorOptions, PageRenderCoordinator};

use dom::{
    show_fallback, BrowserSpawner, CanvasSurface, DomChrome, EventListener, FallbackKind,
    TimeoutSleeper, ViewerElements,
};
use pdfjs::PdfJsDocument;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in debug mode
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Bind the viewer to the page and load the CV.
///
/// `config` is an optional object overriding [`ViewerConfig`] fields
/// (camelCase keys). The returned viewer is inactive when the page lacks the
/// viewer elements or the document could not be loaded; in the latter cases
/// a download link has replaced the viewer.
#[wasm_bindgen(js_name = "mountCvViewer")]
pub async fn mount_cv_viewer(config: JsValue) -> std::result::Result<CvViewer, JsValue> {
    let config = ViewerConfig::from_js(config)?;
    logging::init(&config.log_filter);

    let window =
        web_sys::window().ok_or_else(|| ViewerError::Js("no global window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ViewerError::Js("window has no document".to_string()))?;

    let elements = ViewerElements::lookup(&document, &config.elements);
    Ok(CvViewer::mount(window, elements, &config).await)
}

/// Handle to a mounted CV viewer
#[wasm_bindgen]
pub struct CvViewer {
    coordinator: Option<PageRenderCoordinator<PdfJsDocument>>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl CvViewer {
    #[wasm_bindgen(js_name = "previousPage")]
    pub fn previous_page(&self) {
        if let Some(coordinator) = &self.coordinator {
            coordinator.go_to_previous();
        }
    }

    #[wasm_bindgen(js_name = "nextPage")]
    pub fn next_page(&self) {
        if let Some(coordinator) = &self.coordinator {
            coordinator.go_to_next();
        }
    }

    /// 1-based page shown, or 0 when inactive
    #[wasm_bindgen(getter, js_name = "currentPage")]
    pub fn current_page(&self) -> u32 {
        self.coordinator
            .as_ref()
            .map_or(0, PageRenderCoordinator::current_page)
    }

    #[wasm_bindgen(getter, js_name = "pageCount")]
    pub fn page_count(&self) -> u32 {
        self.coordinator
            .as_ref()
            .map_or(0, PageRenderCoordinator::page_count)
    }

    #[wasm_bindgen(getter, js_name = "isRendering")]
    pub fn is_rendering(&self) -> bool {
        self.coordinator
            .as_ref()
            .is_some_and(PageRenderCoordinator::is_rendering)
    }

    #[wasm_bindgen(getter, js_name = "isActive")]
    pub fn is_active(&self) -> bool {
        self.coordinator.is_some()
    }
}

impl CvViewer {
    /// Event listeners currently attached to the page. Not exported to JS.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn inactive() -> Self {
        Self {
            coordinator: None,
            listeners: Vec::new(),
        }
    }

    async fn mount(window: Window, elements: ViewerElements, config: &ViewerConfig) -> Self {
        let ViewerElements {
            container,
            canvas,
            prev_button,
            next_button,
            page_number,
            page_count,
        } = elements;
        let fallback = &config.fallback;

        if !pdfjs::is_available() {
            error!("{}; PDF.js may not have loaded", ViewerError::LibraryUnavailable);
            if let Some(container) = &container {
                show_fallback(
                    container,
                    FallbackKind::LibraryMissing,
                    &fallback.library_missing,
                    &config.document_url,
                    &fallback.link_text,
                );
            }
            return Self::inactive();
        }

        let Some(container) = container else {
            let missing = ViewerError::MissingElement(config.elements.container.clone());
            error!("CV viewer disabled: {}", missing);
            return Self::inactive();
        };
        let Some(canvas) = canvas else {
            let missing = ViewerError::MissingElement(config.elements.canvas.clone());
            error!("CV viewer disabled: {}", missing);
            return Self::inactive();
        };

        let surface = match CanvasSurface::new(container.clone(), canvas, window.clone()) {
            Ok(surface) => surface,
            Err(e) => {
                error!("CV viewer disabled: {}", e);
                return Self::inactive();
            }
        };

        let coordinator: PageRenderCoordinator<PdfJsDocument> = PageRenderCoordinator::new(
            surface,
            Rc::new(DomChrome::new(page_number, page_count)),
            Rc::new(BrowserSpawner),
            Rc::new(TimeoutSleeper::new(window.clone())),
            CoordinatorOptions::from(config),
        );

        let mut listeners = Vec::new();
        if let Some(button) = &prev_button {
            let viewer = coordinator.clone();
            listen(&mut listeners, button, "click", move |_| viewer.go_to_previous());
        }
        if let Some(button) = &next_button {
            let viewer = coordinator.clone();
            listen(&mut listeners, button, "click", move |_| viewer.go_to_next());
        }
        {
            let viewer = coordinator.clone();
            listen(&mut listeners, &window, "resize", move |_| viewer.on_resize());
        }

        match PdfJsDocument::load(&config.document_url).await {
            Ok(document) => {
                coordinator.on_document_loaded(document);
                Self {
                    coordinator: Some(coordinator),
                    listeners,
                }
            }
            Err(e) => {
                error!("Error loading PDF: {}", e);
                show_fallback(
                    &container,
                    FallbackKind::LoadFailed,
                    &fallback.load_failed,
                    &config.document_url,
                    &fallback.link_text,
                );
                Self::inactive()
            }
        }
    }
}

impl Drop for CvViewer {
    fn drop(&mut self) {
        if let Some(coordinator) = &self.coordinator {
            coordinator.cancel_pending_resize();
        }
    }
}

fn listen<F>(
    listeners: &mut Vec<EventListener>,
    target: &EventTarget,
    event: &'static str,
    handler: F,
) where
    F: FnMut(Event) + 'static,
{
    match EventListener::new(target, event, handler) {
        Ok(listener) => listeners.push(listener),
        Err(e) => warn!("Failed to listen for {} events: {}", event, e),
    }
}
