//! Page viewer core
//!
//! Runtime-independent pieces of the CV viewer: the render queue, the page
//! cursor, the resize debouncer and the coordinator tying them together.
//! Browser specifics live behind the traits in [`traits`].

pub mod coordinator;
pub mod debounce;
pub mod navigation;
pub mod queue;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{CoordinatorOptions, PageRenderCoordinator};
pub use debounce::Debouncer;
pub use navigation::PageCursor;
pub use queue::{RenderPhase, RenderQueue};
pub use traits::{DocumentPage, DrawingSurface, PagedDocument, Sleeper, SurfaceOf, ViewerChrome};
pub use types::{fit_scale, SurfaceLayout, Viewport};
