use crate::repository::Pagination;

/// Validated page number and size, both at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(number: u64, size: u64) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// Row window for this page alone
    pub fn window(&self) -> Pagination {
        Pagination::page(self.number, self.size)
    }
}

/// One page of a simply paginated listing.
///
/// Knows whether a next page exists but not how many records there are.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build from rows read with a one-row lookahead.
    pub fn from_lookahead(mut rows: Vec<T>, request: PageRequest) -> Self {
        let limit = usize::try_from(request.size).unwrap_or(usize::MAX);
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        Self {
            items: rows,
            current_page: request.number,
            per_page: request.size,
            has_more,
        }
    }

    /// 1-based position of the first item, `None` on an empty page
    pub fn from(&self) -> Option<u64> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.current_page - 1) * self.per_page + 1)
        }
    }

    /// 1-based position of the last item
    pub fn to(&self) -> Option<u64> {
        self.from().map(|from| from + self.items.len() as u64 - 1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead_row_is_dropped() {
        let page = Page::from_lookahead(vec![1, 2, 3], PageRequest::new(1, 2));
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.has_more);
    }

    #[test]
    fn test_short_page_has_no_more() {
        let page = Page::from_lookahead(vec![5], PageRequest::new(3, 2));
        assert!(!page.has_more);
        assert_eq!(page.from(), Some(5));
        assert_eq!(page.to(), Some(5));
    }

    #[test]
    fn test_empty_page_positions() {
        let page: Page<u8> = Page::from_lookahead(vec![], PageRequest::new(4, 10));
        assert!(page.is_empty());
        assert_eq!(page.from(), None);
        assert_eq!(page.to(), None);
        assert_eq!(page.current_page, 4);
    }

    #[test]
    fn test_request_floors_at_one() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request, PageRequest { number: 1, size: 1 });
        assert_eq!(request.window(), Pagination::new(0, 1));
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::from_lookahead(vec![1, 2, 3], PageRequest::new(2, 2)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.current_page, 2);
        assert!(page.has_more);
    }
}
