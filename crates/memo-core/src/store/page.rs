//! Pagination view over the note list.
//!
//! Pure functions over a slice and a page cursor. The page count is
//! always derived from the live list length, never from a fixed
//! constant.

use crate::error::{Error, InvalidInputError};

/// A pagination cursor: 1-based page index plus page size.
///
/// A derived view over the record list; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    index: usize,
    size: usize,
}

impl Page {
    /// Create a page cursor. Both the index (1-based) and the size
    /// must be at least 1.
    pub fn new(index: usize, size: usize) -> Result<Self, Error> {
        if index < 1 {
            return Err(Self::invalid("page index is 1-based"));
        }
        if size < 1 {
            return Err(Self::invalid("page size must be at least 1"));
        }
        Ok(Self { index, size })
    }

    /// 1-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.index - 1) * self.size
    }

    fn invalid(reason: &str) -> Error {
        InvalidInputError::Page {
            reason: reason.to_string(),
        }
        .into()
    }
}

/// The sub-slice of `items` visible on `page`.
///
/// Yields at most `page.size()` items starting at `page.offset()`,
/// clamped to the slice; a page past the end is empty.
pub fn page_slice<T>(items: &[T], page: Page) -> &[T] {
    let start = page.offset().min(items.len());
    let end = (page.offset() + page.size()).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `len` items at `size` per page.
///
/// Recomputed from the live length on every call; zero items means
/// zero pages.
pub fn page_count(len: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    len.div_ceil(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_index_and_size() {
        assert!(Page::new(0, 4).is_err());
        assert!(Page::new(1, 0).is_err());
        assert!(Page::new(1, 1).is_ok());
    }

    #[test]
    fn nine_items_page_size_four() {
        let items: Vec<u32> = (0..9).collect();

        assert_eq!(page_slice(&items, Page::new(1, 4).unwrap()), &[0, 1, 2, 3]);
        assert_eq!(page_slice(&items, Page::new(2, 4).unwrap()), &[4, 5, 6, 7]);
        assert_eq!(page_slice(&items, Page::new(3, 4).unwrap()), &[8]);
        assert_eq!(page_count(items.len(), 4), 3);
    }

    #[test]
    fn exact_multiple_fills_last_page() {
        let items: Vec<u32> = (0..8).collect();

        assert_eq!(page_slice(&items, Page::new(2, 4).unwrap()), &[4, 5, 6, 7]);
        assert_eq!(page_count(items.len(), 4), 2);
    }

    #[test]
    fn page_past_end_is_empty() {
        let items: Vec<u32> = (0..3).collect();
        assert!(page_slice(&items, Page::new(5, 4).unwrap()).is_empty());
    }

    #[test]
    fn empty_list_has_no_pages() {
        let items: Vec<u32> = Vec::new();
        assert!(page_slice(&items, Page::new(1, 4).unwrap()).is_empty());
        assert_eq!(page_count(0, 4), 0);
    }

    #[test]
    fn every_page_respects_offset_and_size() {
        let items: Vec<usize> = (0..23).collect();
        let size = 5;

        for index in 1..=page_count(items.len(), size) {
            let page = Page::new(index, size).unwrap();
            let slice = page_slice(&items, page);
            assert!(slice.len() <= size);
            assert_eq!(slice.first(), items.get((index - 1) * size));
        }

        // Last page holds the remainder.
        let last = Page::new(5, size).unwrap();
        assert_eq!(page_slice(&items, last), &[20, 21, 22]);
    }
}
