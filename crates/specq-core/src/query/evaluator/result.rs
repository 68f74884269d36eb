use serde::Serialize;

///
/// PaginatedResult
///
/// One page of rows plus the unpaged total. Assembled by callers from a
/// paged fetch and a count-optimized count over the same specification.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
}

impl<T> PaginatedResult<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total_count: u64, page_number: u32, page_size: u32) -> Self {
        Self {
            items,
            total_count,
            page_number,
            page_size,
        }
    }

    /// Number of pages needed for `total_count` rows; zero when the page size is zero.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }

        self.total_count.div_ceil(u64::from(self.page_size))
    }

    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page_number) < self.total_pages()
    }
}
