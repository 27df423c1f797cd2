//! Page cursor bounded to `[1, page_count]`

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: u32,
    page_count: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PageCursor {
    pub fn new(page_count: u32) -> Self {
        Self {
            current: 1,
            page_count,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Move forward one page. `None` at the last page.
    pub fn advance(&mut self) -> Option<u32> {
        if self.current >= self.page_count {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }

    /// Move back one page. `None` at the first page.
    pub fn retreat(&mut self) -> Option<u32> {
        if self.current <= 1 {
            return None;
        }
        self.current -= 1;
        Some(self.current)
    }

    /// Nearest valid page number, or `None` for an empty document.
    pub fn clamp(&self, page: u32) -> Option<u32> {
        if self.page_count == 0 {
            None
        } else {
            Some(page.clamp(1, self.page_count))
        }
    }
}
