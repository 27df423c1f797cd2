//! DOM bindings for the viewer
//!
//! Element lookup, the canvas drawing surface, page indicators, the fallback
//! markup, event listeners and the browser task/timer glue.

mod chrome;
mod events;
mod runtime;
mod surface;

pub use chrome::{fallback_markup, show_fallback, DomChrome, FallbackKind};
pub use events::EventListener;
pub use runtime::{BrowserSpawner, TimeoutSleeper};
pub use surface::CanvasSurface;

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use crate::config::ElementIds;

/// Elements the viewer binds to. Any of them may be absent from the page.
#[derive(Debug, Clone, Default)]
pub struct ViewerElements {
    pub container: Option<HtmlElement>,
    pub canvas: Option<HtmlCanvasElement>,
    pub prev_button: Option<HtmlElement>,
    pub next_button: Option<HtmlElement>,
    pub page_number: Option<Element>,
    pub page_count: Option<Element>,
}

impl ViewerElements {
    pub fn lookup(document: &Document, ids: &ElementIds) -> Self {
        Self {
            container: find(document, &ids.container),
            canvas: find(document, &ids.canvas),
            prev_button: find(document, &ids.prev_button),
            next_button: find(document, &ids.next_button),
            page_number: find(document, &ids.page_number),
            page_count: find(document, &ids.page_count),
        }
    }
}

fn find<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let Some(element) = document.get_element_by_id(id) else {
        debug!("Element #{} not found", id);
        return None;
    };
    match element.dyn_into::<T>() {
        Ok(element) => Some(element),
        Err(_) => {
            warn!("Element #{} has an unexpected type", id);
            None
        }
    }
}
