/// Default page size when the client does not request one.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Normalized pagination parameters for list queries.
///
/// Pages are 1-based; out-of-range client input is clamped rather than
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the totals needed for a pagination envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page(),
            limit: request.limit(),
            total,
        }
    }

    /// Total number of pages, rounded up.
    pub fn pages(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            (self.total + self.limit - 1) / self.limit
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        let request = PageRequest::new(None, None);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(request.offset(), 0);

        let request = PageRequest::new(Some(0), Some(-5));
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 1);
    }

    #[test]
    fn offset_arithmetic() {
        let request = PageRequest::new(Some(3), Some(20));
        assert_eq!(request.offset(), 40);
    }

    #[test]
    fn page_count_rounds_up() {
        let page = Paginated::<i64>::new(vec![], PageRequest::new(Some(1), Some(20)), 41);
        assert_eq!(page.pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page = Paginated::<i64>::new(vec![], PageRequest::default(), 0);
        assert_eq!(page.pages(), 0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn last_page_has_prev_but_not_next() {
        let page = Paginated::<i64>::new(vec![], PageRequest::new(Some(3), Some(20)), 41);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }
}
