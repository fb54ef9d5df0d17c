//! Fixed-size pages over a ranked list.

use serde::Serialize;

/// Movies shown per page in the browse view
pub const PAGE_SIZE: usize = 50;

/// One page of results.
///
/// `page` is 1-based. `total` is the length of the full list the page was
/// cut from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items` into page number `page` (1-based).
///
/// `total_pages = ceil(total / page_size)`. Page 0, pages past the end and
/// a zero page size all yield an empty page.
///
/// Example: 120 items, page size 50 -> pages of 50, 50 and 20
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    };

    let items = if page == 0 || page > total_pages {
        Vec::new()
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total);
        items[start..end].to_vec()
    };

    Page {
        items,
        page,
        total_pages,
        total,
    }
}
