//! JavaScript bindings for PDF.js
//!
//! Only the slice of the `pdfjsLib` API the viewer needs. The library is
//! expected as a global, loaded by a `<script>` tag before this module runs.

use js_sys::Promise;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `pdfjsLib.getDocument(src)`
    #[wasm_bindgen(catch, js_namespace = pdfjsLib, js_name = getDocument)]
    pub fn get_document(src: &str) -> Result<PdfLoadingTask, JsValue>;

    pub type PdfLoadingTask;

    /// Resolves to a [`PdfDocumentProxy`]
    #[wasm_bindgen(method, getter = promise)]
    pub fn loading_promise(this: &PdfLoadingTask) -> Promise;

    pub type PdfDocumentProxy;

    #[wasm_bindgen(method, getter = numPages)]
    pub fn num_pages(this: &PdfDocumentProxy) -> u32;

    /// Resolves to a [`PdfPageProxy`]
    #[wasm_bindgen(method, catch, js_name = getPage)]
    pub fn get_page(this: &PdfDocumentProxy, number: u32) -> Result<Promise, JsValue>;

    pub type PdfPageProxy;

    #[wasm_bindgen(method, js_name = getViewport)]
    pub fn get_viewport(this: &PdfPageProxy, params: &JsValue) -> PageViewport;

    #[wasm_bindgen(method, catch)]
    pub fn render(this: &PdfPageProxy, params: &JsValue) -> Result<RenderTask, JsValue>;

    pub type PageViewport;

    #[wasm_bindgen(method, getter)]
    pub fn width(this: &PageViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn height(this: &PageViewport) -> f64;

    pub type RenderTask;

    #[wasm_bindgen(method, getter = promise)]
    pub fn render_promise(this: &RenderTask) -> Promise;
}

/// Whether the `pdfjsLib` global has been defined.
pub fn is_available() -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("pdfjsLib"))
        .map(|lib| !lib.is_undefined() && !lib.is_null())
        .unwrap_or(false)
}
