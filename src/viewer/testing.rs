//! In-memory doubles for exercising the viewer without a browser

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};

use super::traits::{DocumentPage, DrawingSurface, PagedDocument, Sleeper, ViewerChrome};
use super::types::{SurfaceLayout, Viewport};
use crate::error::{Result, ViewerError};

/// US Letter at 72 dpi
const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;

/// Records fetches and draws, and optionally holds fetches until released.
#[derive(Default)]
pub struct RenderLog {
    fetches: RefCell<Vec<u32>>,
    draws: RefCell<Vec<u32>>,
    layouts: RefCell<Vec<SurfaceLayout>>,
    active: Cell<u32>,
    max_active: Cell<u32>,
    gated: Cell<bool>,
    gates: RefCell<VecDeque<oneshot::Sender<bool>>>,
    fail_next_fetch: Cell<bool>,
    fail_next_draw: Cell<bool>,
}

impl RenderLog {
    /// Hold every page fetch until [`RenderLog::release_fetch`] is called.
    pub fn gate_fetches(&self) {
        self.gated.set(true);
    }

    /// Resolve the oldest held fetch. Returns `false` if none was waiting.
    pub fn release_fetch(&self, ok: bool) -> bool {
        let gate = self.gates.borrow_mut().pop_front();
        match gate {
            Some(sender) => sender.send(ok).is_ok(),
            None => false,
        }
    }

    pub fn fail_next_fetch(&self) {
        self.fail_next_fetch.set(true);
    }

    pub fn fail_next_draw(&self) {
        self.fail_next_draw.set(true);
    }

    pub fn fetches(&self) -> Vec<u32> {
        self.fetches.borrow().clone()
    }

    pub fn draws(&self) -> Vec<u32> {
        self.draws.borrow().clone()
    }

    pub fn layouts(&self) -> Vec<SurfaceLayout> {
        self.layouts.borrow().clone()
    }

    pub fn active(&self) -> u32 {
        self.active.get()
    }

    pub fn max_active(&self) -> u32 {
        self.max_active.get()
    }

    fn begin(&self, page: u32) {
        self.fetches.borrow_mut().push(page);
        let active = self.active.get() + 1;
        self.active.set(active);
        self.max_active.set(self.max_active.get().max(active));
    }

    fn end(&self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}

pub struct MockDocument {
    pages: u32,
    log: Rc<RenderLog>,
}

impl MockDocument {
    pub fn new(pages: u32, log: Rc<RenderLog>) -> Self {
        Self { pages, log }
    }
}

#[async_trait(?Send)]
impl PagedDocument for MockDocument {
    type Page = MockPage;

    fn page_count(&self) -> u32 {
        self.pages
    }

    async fn page(&self, number: u32) -> Result<MockPage> {
        self.log.begin(number);

        let mut ok = true;
        if self.log.gated.get() {
            let (sender, receiver) = oneshot::channel();
            self.log.gates.borrow_mut().push_back(sender);
            ok = receiver.await.unwrap_or(false);
        }
        if self.log.fail_next_fetch.replace(false) {
            ok = false;
        }

        if !ok {
            self.log.end();
            return Err(ViewerError::PageFetch {
                page: number,
                reason: "mock fetch rejected".to_string(),
            });
        }

        Ok(MockPage {
            number,
            log: Rc::clone(&self.log),
        })
    }
}

pub struct MockPage {
    number: u32,
    log: Rc<RenderLog>,
}

#[async_trait(?Send)]
impl DocumentPage for MockPage {
    type Surface = MockSurface;

    fn viewport(&self, scale: f64) -> Viewport {
        Viewport::new(PAGE_WIDTH * scale, PAGE_HEIGHT * scale)
    }

    async fn render(&self, surface: &MockSurface, layout: &SurfaceLayout) -> Result<()> {
        self.log.end();
        if surface.last_layout().as_ref() != Some(layout) {
            return Err(ViewerError::Draw {
                page: self.number,
                reason: "surface not prepared".to_string(),
            });
        }
        if self.log.fail_next_draw.replace(false) {
            return Err(ViewerError::Draw {
                page: self.number,
                reason: "mock draw rejected".to_string(),
            });
        }
        self.log.draws.borrow_mut().push(self.number);
        self.log.layouts.borrow_mut().push(*layout);
        Ok(())
    }
}

/// Surface whose size can be changed from the test
#[derive(Clone)]
pub struct MockSurface {
    width: Rc<Cell<f64>>,
    device_pixel_ratio: Rc<Cell<f64>>,
    applied: Rc<RefCell<Vec<SurfaceLayout>>>,
}

impl MockSurface {
    pub fn new(width: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width: Rc::new(Cell::new(width)),
            device_pixel_ratio: Rc::new(Cell::new(device_pixel_ratio)),
            applied: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_container_width(&self, width: f64) {
        self.width.set(width);
    }

    pub fn set_device_pixel_ratio(&self, ratio: f64) {
        self.device_pixel_ratio.set(ratio);
    }

    pub fn last_layout(&self) -> Option<SurfaceLayout> {
        self.applied.borrow().last().copied()
    }
}

impl DrawingSurface for MockSurface {
    fn container_width(&self) -> f64 {
        self.width.get()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.get()
    }

    fn apply_layout(&self, layout: &SurfaceLayout) {
        self.applied.borrow_mut().push(*layout);
    }
}

#[derive(Default)]
pub struct RecordingChrome {
    page_numbers: RefCell<Vec<u32>>,
    page_count: Cell<Option<u32>>,
    errors: RefCell<Vec<ViewerError>>,
}

impl RecordingChrome {
    pub fn page_numbers(&self) -> Vec<u32> {
        self.page_numbers.borrow().clone()
    }

    pub fn page_count(&self) -> Option<u32> {
        self.page_count.get()
    }

    pub fn errors(&self) -> Vec<ViewerError> {
        self.errors.borrow().clone()
    }
}

impl ViewerChrome for RecordingChrome {
    fn show_page_number(&self, page: u32) {
        self.page_numbers.borrow_mut().push(page);
    }

    fn show_page_count(&self, count: u32) {
        self.page_count.set(Some(count));
    }

    fn report_error(&self, error: &ViewerError) {
        self.errors.borrow_mut().push(error.clone());
    }
}

/// Sleeps that end only when the test says so
#[derive(Default)]
pub struct ManualSleeper {
    sleeping: RefCell<Vec<oneshot::Sender<()>>>,
    requested: RefCell<Vec<Duration>>,
}

impl ManualSleeper {
    pub fn waiting(&self) -> usize {
        self.sleeping.borrow().len()
    }

    pub fn requested(&self) -> Vec<Duration> {
        self.requested.borrow().clone()
    }

    pub fn wake_all(&self) {
        let sleeping: Vec<_> = self.sleeping.borrow_mut().drain(..).collect();
        for sender in sleeping {
            let _ = sender.send(());
        }
    }
}

impl Sleeper for ManualSleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (sender, receiver) = oneshot::channel();
        self.sleeping.borrow_mut().push(sender);
        self.requested.borrow_mut().push(duration);
        async move {
            let _ = receiver.await;
        }
        .boxed_local()
    }
}
