//! Viewer traits
//!
//! Seams between the render coordinator and the outside world: the document
//! library, the drawing surface, the page chrome, and the timer.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

use super::types::{SurfaceLayout, Viewport};
use crate::error::{Result, ViewerError};

/// The element pages are drawn onto
pub trait DrawingSurface {
    /// Width available to the page, in CSS pixels
    fn container_width(&self) -> f64;

    fn device_pixel_ratio(&self) -> f64;

    /// Resize the backing store and the displayed size before a draw
    fn apply_layout(&self, layout: &SurfaceLayout);
}

/// One page fetched from a [`PagedDocument`]
#[async_trait(?Send)]
pub trait DocumentPage {
    type Surface: DrawingSurface;

    /// Page size at `scale`
    fn viewport(&self, scale: f64) -> Viewport;

    /// Draw the page; resolves when drawing has finished
    async fn render(&self, surface: &Self::Surface, layout: &SurfaceLayout) -> Result<()>;
}

/// A loaded multi-page document
#[async_trait(?Send)]
pub trait PagedDocument {
    type Page: DocumentPage;

    fn page_count(&self) -> u32;

    /// Fetch a page by 1-based number
    async fn page(&self, number: u32) -> Result<Self::Page>;
}

/// Surface type a document's pages draw onto
pub type SurfaceOf<D> = <<D as PagedDocument>::Page as DocumentPage>::Surface;

/// Page indicators and error reporting around the canvas
pub trait ViewerChrome {
    fn show_page_number(&self, _page: u32) {}

    fn show_page_count(&self, _count: u32) {}

    fn report_error(&self, _error: &ViewerError) {}
}

/// Delay source for debouncing
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
