//! PDF.js-backed document
//!
//! Adapts the PDF.js proxies to the viewer's [`PagedDocument`] and
//! [`DocumentPage`] traits, drawing onto a [`CanvasSurface`].

mod bindings;

pub use bindings::is_available;

use async_trait::async_trait;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::dom::CanvasSurface;
use crate::error::{describe_js, Result, ViewerError};
use crate::viewer::{DocumentPage, PagedDocument, SurfaceLayout, Viewport};
use bindings::{PageViewport, PdfDocumentProxy, PdfPageProxy};

pub struct PdfJsDocument {
    proxy: PdfDocumentProxy,
}

impl PdfJsDocument {
    /// Fetch and open the document at `url`
    pub async fn load(url: &str) -> Result<Self> {
        if !is_available() {
            return Err(ViewerError::LibraryUnavailable);
        }

        tracing::info!("Loading document from {}", url);
        let load_error = |e: JsValue| ViewerError::Load(describe_js(&e));

        let task = bindings::get_document(url).map_err(load_error)?;
        let proxy = JsFuture::from(task.loading_promise())
            .await
            .map_err(load_error)?;

        Ok(Self {
            proxy: proxy.unchecked_into(),
        })
    }
}

#[async_trait(?Send)]
impl PagedDocument for PdfJsDocument {
    type Page = PdfJsPage;

    fn page_count(&self) -> u32 {
        self.proxy.num_pages()
    }

    async fn page(&self, number: u32) -> Result<PdfJsPage> {
        let fetch_error = move |e: JsValue| ViewerError::PageFetch {
            page: number,
            reason: describe_js(&e),
        };

        let promise = self.proxy.get_page(number).map_err(fetch_error)?;
        let proxy = JsFuture::from(promise).await.map_err(fetch_error)?;

        Ok(PdfJsPage {
            number,
            proxy: proxy.unchecked_into(),
        })
    }
}

pub struct PdfJsPage {
    number: u32,
    proxy: PdfPageProxy,
}

impl PdfJsPage {
    fn js_viewport(&self, scale: f64) -> PageViewport {
        let params = Object::new();
        // Setting a data property on a fresh plain object cannot throw.
        let _ = Reflect::set(&params, &JsValue::from_str("scale"), &JsValue::from_f64(scale));
        self.proxy.get_viewport(&params)
    }

    fn render_params(&self, surface: &CanvasSurface, layout: &SurfaceLayout) -> Result<Object> {
        let transform: JsValue = match layout.transform() {
            Some(matrix) => matrix
                .iter()
                .map(|v| JsValue::from_f64(*v))
                .collect::<Array>()
                .into(),
            None => JsValue::NULL,
        };

        let params = Object::new();
        Reflect::set(&params, &JsValue::from_str("canvasContext"), surface.context())?;
        Reflect::set(&params, &JsValue::from_str("transform"), &transform)?;
        Reflect::set(
            &params,
            &JsValue::from_str("viewport"),
            &self.js_viewport(layout.display_scale),
        )?;
        Ok(params)
    }
}

#[async_trait(?Send)]
impl DocumentPage for PdfJsPage {
    type Surface = CanvasSurface;

    fn viewport(&self, scale: f64) -> Viewport {
        let viewport = self.js_viewport(scale);
        Viewport::new(viewport.width(), viewport.height())
    }

    async fn render(&self, surface: &CanvasSurface, layout: &SurfaceLayout) -> Result<()> {
        let page = self.number;
        let draw_error = move |e: JsValue| ViewerError::Draw {
            page,
            reason: describe_js(&e),
        };

        let params = self.render_params(surface, layout)?;
        let task = self.proxy.render(&params).map_err(draw_error)?;
        JsFuture::from(task.render_promise())
            .await
            .map_err(draw_error)?;
        Ok(())
    }
}
