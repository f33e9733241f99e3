//! Page slicing over an ordered result list

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Results shown per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of an ordered result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub current_page: usize,
    /// 0 when there are no results
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Convert the items while keeping page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

/// Slice `results` to the requested 1-based `page`.
///
/// Pages below 1 are served as page 1. Pages past the end yield no items but
/// keep the real totals. A zero `page_size` is rejected.
pub fn paginate<T>(results: Vec<T>, page: i64, page_size: usize) -> Result<Page<T>> {
    if page_size == 0 {
        return Err(Error::InvalidInput("page size must be at least 1".into()));
    }

    let current_page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let total_count = results.len();
    let total_pages = total_count.div_ceil(page_size);

    let items = (current_page - 1)
        .checked_mul(page_size)
        .map_or_else(Vec::new, |offset| {
            results.into_iter().skip(offset).take(page_size).collect()
        });

    Ok(Page {
        items,
        current_page,
        total_pages,
        total_count,
    })
}
