//! Render queue state machine
//!
//! `Idle -> Rendering -> Idle` with a single pending slot. At most one render
//! is in flight; requests that arrive meanwhile overwrite the pending slot, so
//! a burst collapses to the page being drawn plus the latest request.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPhase {
    #[default]
    Idle,
    Rendering { page: u32 },
}

#[derive(Debug, Default)]
pub struct RenderQueue {
    phase: RenderPhase,
    pending: Option<u32>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `page` to be drawn.
    ///
    /// Returns the page to start rendering now, or `None` if the request was
    /// parked in the pending slot.
    pub fn request(&mut self, page: u32) -> Option<u32> {
        match self.phase {
            RenderPhase::Rendering { page: current } => {
                if let Some(superseded) = self.pending.replace(page) {
                    tracing::trace!(superseded, page, current, "Pending render superseded");
                }
                None
            }
            RenderPhase::Idle => {
                // A request made while idle is the newest one; it wins over
                // anything left behind by a failed render.
                self.pending = None;
                self.phase = RenderPhase::Rendering { page };
                Some(page)
            }
        }
    }

    /// The active render finished. Returns the pending page to render next.
    pub fn complete(&mut self) -> Option<u32> {
        match self.pending.take() {
            Some(next) => {
                self.phase = RenderPhase::Rendering { page: next };
                Some(next)
            }
            None => {
                self.phase = RenderPhase::Idle;
                None
            }
        }
    }

    /// The active render failed. The pending slot is left untouched.
    pub fn fail(&mut self) {
        self.phase = RenderPhase::Idle;
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, RenderPhase::Rendering { .. })
    }

    pub fn pending(&self) -> Option<u32> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_request_starts_immediately() {
        let mut queue = RenderQueue::new();
        assert_eq!(queue.request(1), Some(1));
        assert_eq!(queue.phase(), RenderPhase::Rendering { page: 1 });
        assert!(queue.is_in_flight());
        assert_eq!(queue.pending(), None);
    }

    #[test]
    fn test_requests_in_flight_coalesce_to_last() {
        let mut queue = RenderQueue::new();
        queue.request(1);
        for page in 2..=6 {
            assert_eq!(queue.request(page), None);
        }
        assert_eq!(queue.pending(), Some(6));

        assert_eq!(queue.complete(), Some(6));
        assert_eq!(queue.phase(), RenderPhase::Rendering { page: 6 });
        assert_eq!(queue.pending(), None);

        assert_eq!(queue.complete(), None);
        assert_eq!(queue.phase(), RenderPhase::Idle);
    }

    #[test]
    fn test_success_clears_everything() {
        let mut queue = RenderQueue::new();
        queue.request(2);
        queue.request(3);
        queue.complete();
        queue.complete();
        assert!(!queue.is_in_flight());
        assert_eq!(queue.pending(), None);
    }

    #[test]
    fn test_failure_keeps_pending_until_next_request() {
        let mut queue = RenderQueue::new();
        queue.request(1);
        queue.request(2);
        queue.fail();

        assert!(!queue.is_in_flight());
        assert_eq!(queue.pending(), Some(2));

        // The retry is an explicit request, which supersedes the stale slot.
        assert_eq!(queue.request(2), Some(2));
        assert_eq!(queue.pending(), None);
        assert_eq!(queue.complete(), None);
    }
}
