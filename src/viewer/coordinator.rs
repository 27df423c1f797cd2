//! Page render coordinator
//!
//! Serializes page renders onto a single drawing surface. Navigation and
//! resize requests go through a [`RenderQueue`]; the page it hands back is
//! drawn by one local task that keeps going while the queue has a pending
//! page, so only one render is ever in flight.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::task::{LocalSpawn, LocalSpawnExt};
use tracing::{debug, info, warn};

use super::debounce::Debouncer;
use super::navigation::PageCursor;
use super::queue::RenderQueue;
use super::traits::{DocumentPage, DrawingSurface, PagedDocument, Sleeper, SurfaceOf, ViewerChrome};
use super::types::{fit_scale, SurfaceLayout};
use crate::config::ViewerConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatorOptions {
    pub container_padding: f64,
    pub resize_debounce: Duration,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        CoordinatorOptions::from(&ViewerConfig::default())
    }
}

impl From<&ViewerConfig> for CoordinatorOptions {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            container_padding: config.container_padding,
            resize_debounce: config.resize_debounce(),
        }
    }
}

/// Cheap to clone; clones share the same viewer state.
pub struct PageRenderCoordinator<D: PagedDocument> {
    inner: Rc<Inner<D>>,
}

impl<D: PagedDocument> Clone for PageRenderCoordinator<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct Inner<D: PagedDocument> {
    surface: SurfaceOf<D>,
    chrome: Rc<dyn ViewerChrome>,
    spawner: Rc<dyn LocalSpawn>,
    resize: Debouncer,
    container_padding: f64,
    state: RefCell<ViewerState<D>>,
}

struct ViewerState<D> {
    document: Option<Rc<D>>,
    cursor: PageCursor,
    queue: RenderQueue,
}

impl<D: PagedDocument + 'static> PageRenderCoordinator<D> {
    pub fn new(
        surface: SurfaceOf<D>,
        chrome: Rc<dyn ViewerChrome>,
        spawner: Rc<dyn LocalSpawn>,
        sleeper: Rc<dyn Sleeper>,
        options: CoordinatorOptions,
    ) -> Self {
        let resize = Debouncer::new(options.resize_debounce, sleeper, Rc::clone(&spawner));
        Self {
            inner: Rc::new(Inner {
                surface,
                chrome,
                spawner,
                resize,
                container_padding: options.container_padding,
                state: RefCell::new(ViewerState {
                    document: None,
                    cursor: PageCursor::default(),
                    queue: RenderQueue::new(),
                }),
            }),
        }
    }

    /// Take ownership of the loaded document and draw its first page.
    pub fn on_document_loaded(&self, document: D) {
        let page_count = document.page_count();
        {
            let mut state = self.inner.state.borrow_mut();
            state.document = Some(Rc::new(document));
            state.cursor = PageCursor::new(page_count);
        }

        info!("Document loaded with {} pages", page_count);
        self.inner.chrome.show_page_count(page_count);

        if page_count == 0 {
            warn!("Document has no pages; nothing to render");
            return;
        }
        self.request_render(1);
    }

    /// Draw `page` now if the surface is free, otherwise make it the pending page.
    pub fn request_render(&self, page: u32) {
        let start = {
            let mut state = self.inner.state.borrow_mut();
            let Some(document) = state.document.clone() else {
                debug!("Render of page {} requested before the document loaded", page);
                return;
            };
            let Some(page) = state.cursor.clamp(page) else {
                return;
            };
            state.queue.request(page).map(|page| (document, page))
        };

        match start {
            Some((document, page)) => self.spawn_render_loop(document, page),
            None => debug!("Render in flight; page {} queued", page),
        }
    }

    pub fn go_to_previous(&self) {
        let target = {
            let mut state = self.inner.state.borrow_mut();
            if state.document.is_none() {
                return;
            }
            state.cursor.retreat()
        };
        if let Some(page) = target {
            self.request_render(page);
        }
    }

    pub fn go_to_next(&self) {
        let target = {
            let mut state = self.inner.state.borrow_mut();
            if state.document.is_none() {
                return;
            }
            state.cursor.advance()
        };
        if let Some(page) = target {
            self.request_render(page);
        }
    }

    /// Re-render the current page once resizing has been quiet for the
    /// debounce window.
    pub fn on_resize(&self) {
        let weak: Weak<Inner<D>> = Rc::downgrade(&self.inner);
        self.inner.resize.trigger(move || {
            if let Some(inner) = weak.upgrade() {
                PageRenderCoordinator { inner }.rerender_current();
            }
        });
    }

    /// Drop a re-render still waiting out the resize debounce window.
    pub fn cancel_pending_resize(&self) {
        self.inner.resize.cancel();
    }

    pub fn current_page(&self) -> u32 {
        self.inner.state.borrow().cursor.current()
    }

    pub fn page_count(&self) -> u32 {
        self.inner.state.borrow().cursor.page_count()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.state.borrow().document.is_some()
    }

    pub fn is_rendering(&self) -> bool {
        self.inner.state.borrow().queue.is_in_flight()
    }

    pub fn pending_page(&self) -> Option<u32> {
        self.inner.state.borrow().queue.pending()
    }

    fn rerender_current(&self) {
        let page = {
            let state = self.inner.state.borrow();
            if state.document.is_none() {
                return;
            }
            state.cursor.current()
        };
        debug!("Resize settled; re-rendering page {}", page);
        self.request_render(page);
    }

    fn spawn_render_loop(&self, document: Rc<D>, page: u32) {
        let inner = Rc::clone(&self.inner);
        let task = async move { inner.render_loop(document, page).await };

        if let Err(e) = self.inner.spawner.spawn_local(task) {
            warn!("Failed to spawn render task: {}", e);
            self.inner.state.borrow_mut().queue.fail();
        }
    }
}

impl<D: PagedDocument> Inner<D> {
    async fn render_loop(&self, document: Rc<D>, first: u32) {
        let mut next = Some(first);

        while let Some(page) = next {
            self.chrome.show_page_number(page);

            match self.render_page(&document, page).await {
                Ok(()) => {
                    debug!("Rendered page {}", page);
                    next = self.state.borrow_mut().queue.complete();
                }
                Err(e) => {
                    self.state.borrow_mut().queue.fail();
                    warn!("Render of page {} failed: {}", page, e);
                    self.chrome.report_error(&e);
                    next = None;
                }
            }
        }
    }

    async fn render_page(&self, document: &D, number: u32) -> Result<()> {
        let page = document.page(number).await?;

        let natural = page.viewport(1.0);
        let scale = fit_scale(natural, self.surface.container_width(), self.container_padding);
        let layout = SurfaceLayout::new(scale, page.viewport(scale), self.surface.device_pixel_ratio());

        self.surface.apply_layout(&layout);
        page.render(&self.surface, &layout).await
    }
}
