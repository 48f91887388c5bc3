//! Cursor over a list shown one page at a time.

use std::ops::Range;

/// Selected row plus the page window that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
    len: usize,
    page_size: usize,
}

impl ListCursor {
    /// Cursor at the first of `len` rows. A zero page size is treated as 1.
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            index: 0,
            len,
            page_size: page_size.max(1),
        }
    }

    /// Selected row.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move up one row.
    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Move down one row.
    pub fn down(&mut self) {
        if self.index + 1 < self.len {
            self.index += 1;
        }
    }

    /// Move one page forward, if a row exists there.
    pub fn page_down(&mut self) {
        if self.index + self.page_size < self.len {
            self.index += self.page_size;
        }
    }

    /// Move one page back, if a row exists there.
    pub fn page_up(&mut self) {
        if self.index >= self.page_size {
            self.index -= self.page_size;
        }
    }

    /// Rows on the page containing the cursor.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.index / self.page_size) * self.page_size;
        let end = (start + self.page_size).min(self.len);
        start..end
    }

    /// 1-based page number and page count.
    pub fn page_position(&self) -> (usize, usize) {
        let pages = self.len.div_ceil(self.page_size).max(1);
        (self.index / self.page_size + 1, pages)
    }
}
