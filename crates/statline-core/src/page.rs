// "Load more" pagination: the table grows one page at a time.

/// How many rows of the sorted result are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    pages: usize,
}

impl Pager {
    /// A pager showing one page. A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Pager {
            page_size: page_size.max(1),
            pages: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Rows currently visible.
    pub fn visible(&self) -> usize {
        self.page_size.saturating_mul(self.pages)
    }

    pub fn load_more(&mut self) {
        self.pages = self.pages.saturating_add(1);
    }

    /// Back to the first page, as after any filter or sort change.
    pub fn reset(&mut self) {
        self.pages = 1;
    }

    /// The visible prefix of `rows` and whether more rows remain hidden.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> (&'a [T], bool) {
        let end = self.visible().min(rows.len());
        (&rows[..end], end < rows.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
