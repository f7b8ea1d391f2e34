//! Generic page-number paginator.
//!
//! The last page absorbs up to `orphans` extra items instead of leaving them
//! on a page of their own. An empty list still has one (empty) page.

use thiserror::Error;

/// Why a page number was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// Page 1 was requested explicitly; the canonical URL has no page.
    #[error("first page requested explicitly")]
    ExplicitFirstPage,
    /// Page number below 1.
    #[error("page number {0} is less than 1")]
    Invalid(u32),
    /// Page number past the last page.
    #[error("page {0} contains no results")]
    Empty(u32),
}

/// Splits `count` items into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: u64,
    per_page: u32,
    orphans: u32,
}

impl Paginator {
    /// Create a paginator. `per_page` is clamped to at least one.
    pub fn new(count: u64, per_page: u32, orphans: u32) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
            orphans,
        }
    }

    /// Total number of items.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Items per page.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of pages, never less than one.
    pub fn num_pages(&self) -> u32 {
        if self.count == 0 {
            return 1;
        }
        let hits = self.count.saturating_sub(self.orphans as u64).max(1);
        hits.div_ceil(self.per_page as u64) as u32
    }

    /// Resolve a requested page number.
    ///
    /// `None` is the first page. An explicit `Some(1)` is rejected so the
    /// caller can redirect to the page-less URL.
    pub fn page(&self, requested: Option<u32>) -> Result<Page, PageError> {
        let number = match requested {
            None => 1,
            Some(1) => return Err(PageError::ExplicitFirstPage),
            Some(0) => return Err(PageError::Invalid(0)),
            Some(n) if n > self.num_pages() => return Err(PageError::Empty(n)),
            Some(n) => n,
        };

        let per_page = self.per_page as u64;
        let bottom = (number as u64 - 1) * per_page;
        let mut top = bottom + per_page;
        if top + self.orphans as u64 >= self.count {
            top = self.count;
        }

        Ok(Page {
            number,
            num_pages: self.num_pages(),
            offset: bottom,
            limit: top.saturating_sub(bottom),
            count: self.count,
        })
    }
}

/// One resolved page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    num_pages: u32,
    offset: u64,
    limit: u64,
    count: u64,
}

impl Page {
    /// 1-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Rows to skip.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Rows on this page.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Next page number.
    pub fn next_page_number(&self) -> Option<u32> {
        self.has_next().then_some(self.number + 1)
    }

    /// Previous page number.
    pub fn previous_page_number(&self) -> Option<u32> {
        self.has_previous().then_some(self.number - 1)
    }

    /// 1-based index of the first item on the page, 0 when there are none.
    pub fn start_index(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.offset + 1
        }
    }

    /// 1-based index of the last item on the page.
    pub fn end_index(&self) -> u64 {
        self.offset + self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_has_one_page() {
        let paginator = Paginator::new(0, 20, 10);
        assert_eq!(paginator.num_pages(), 1);

        let page = paginator.page(None).unwrap();
        assert_eq!(page.number(), 1);
        assert_eq!(page.limit(), 0);
        assert_eq!(page.start_index(), 0);
        assert_eq!(page.end_index(), 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_orphans_join_last_page() {
        // 30 items, 20 per page, 10 orphans: everything fits on one page.
        let paginator = Paginator::new(30, 20, 10);
        assert_eq!(paginator.num_pages(), 1);
        assert_eq!(paginator.page(None).unwrap().limit(), 30);

        // 31 items overflow into a second page of 11.
        let paginator = Paginator::new(31, 20, 10);
        assert_eq!(paginator.num_pages(), 2);
        assert_eq!(paginator.page(None).unwrap().limit(), 20);
        let last = paginator.page(Some(2)).unwrap();
        assert_eq!(last.offset(), 20);
        assert_eq!(last.limit(), 11);
        assert_eq!(last.start_index(), 21);
        assert_eq!(last.end_index(), 31);
    }

    #[test]
    fn test_without_orphans() {
        let paginator = Paginator::new(45, 20, 0);
        assert_eq!(paginator.num_pages(), 3);

        let page = paginator.page(Some(2)).unwrap();
        assert_eq!(page.next_page_number(), Some(3));
        assert_eq!(page.previous_page_number(), Some(1));

        let last = paginator.page(Some(3)).unwrap();
        assert_eq!(last.limit(), 5);
        assert_eq!(last.next_page_number(), None);
    }

    #[test]
    fn test_explicit_first_page() {
        let paginator = Paginator::new(100, 20, 10);
        assert_eq!(paginator.page(Some(1)), Err(PageError::ExplicitFirstPage));
    }

    #[test]
    fn test_out_of_range_pages() {
        let paginator = Paginator::new(25, 20, 0);
        assert_eq!(paginator.page(Some(0)), Err(PageError::Invalid(0)));
        assert_eq!(paginator.page(Some(3)), Err(PageError::Empty(3)));
        assert!(paginator.page(Some(2)).is_ok());
    }

    #[test]
    fn test_per_page_clamped() {
        let paginator = Paginator::new(3, 0, 0);
        assert_eq!(paginator.per_page(), 1);
        assert_eq!(paginator.num_pages(), 3);
    }
}
