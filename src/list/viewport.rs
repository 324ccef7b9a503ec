//! Cursor and scroll arithmetic shared by every list flavour.
//!
//! A [`Viewport`] knows nothing about the items themselves; every movement takes the
//! current scope length so that a list whose scope grows underneath it (stream-backed
//! lists) is always measured at the moment of the call.

use std::ops::Range;

/// Cursor, scroll offset and page size of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    cursor: usize,
    start: usize,
    size: usize,
}

impl Viewport {
    /// Create a viewport showing `size` rows. Callers validate `size >= 1`.
    pub fn new(size: usize) -> Self {
        Self {
            cursor: 0,
            start: 0,
            size,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Return focus to the top of the list.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.start = 0;
    }

    pub fn prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        if self.start > self.cursor {
            self.start = self.cursor;
        }
    }

    pub fn next(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
        if self.start + self.size <= self.cursor {
            self.start = self.cursor + 1 - self.size;
        }
    }

    /// Move the window up a page; the cursor is pulled to the top of the new window
    /// only when it would otherwise fall below it.
    pub fn page_up(&mut self) {
        self.start = self.start.saturating_sub(self.size);
        if self.cursor >= self.start + self.size {
            self.cursor = self.start;
        }
    }

    /// Move the window down a page.
    ///
    /// When the clamped start lands exactly on the old cursor the cursor snaps to the
    /// last item, otherwise it follows the start of the window.
    pub fn page_down(&mut self, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }

        let wanted = self.start + self.size;
        self.start = if len < self.size {
            0
        } else {
            wanted.min(len - self.size)
        };

        if self.start == self.cursor {
            self.cursor = len - 1;
        } else if self.start > self.cursor {
            self.cursor = self.start;
        }
    }

    pub fn can_page_up(&self) -> bool {
        self.start > 0
    }

    pub fn can_page_down(&self, len: usize) -> bool {
        self.start + self.size < len
    }

    /// Place the cursor, clamped to the scope, scrolling so it stays visible.
    pub fn set_cursor(&mut self, index: usize, len: usize) {
        self.cursor = index.min(len.saturating_sub(1));
        if self.start > self.cursor {
            self.start = self.cursor;
        } else if self.start + self.size <= self.cursor {
            self.start = self.cursor + 1 - self.size;
        }
    }

    /// Place the scroll offset, clamped so that the cursor remains inside the window.
    pub fn set_start(&mut self, index: usize) {
        let lowest = (self.cursor + 1).saturating_sub(self.size);
        self.start = index.clamp(lowest, self.cursor);
    }

    /// Scope positions currently on screen.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = self.start.min(len);
        start..(self.start + self.size).min(len)
    }

    /// Position of the cursor within [`Viewport::window`], `None` for an empty scope.
    pub fn active(&self, len: usize) -> Option<usize> {
        (self.cursor < len).then(|| self.cursor - self.start)
    }
}
