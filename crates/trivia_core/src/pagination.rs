//! crates/trivia_core/src/pagination.rs
//!
//! Fixed-size page windows over an already ordered listing.

use std::num::IntErrorKind;

/// Number of questions in one page of any listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A validated, 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page_number: 1 }
    }
}

impl PageRequest {
    /// Page numbers below 1 are treated as the first page.
    pub fn new(page_number: i64) -> Self {
        Self {
            page_number: page_number.max(1) as u64,
        }
    }

    /// Coerces a raw `page` query value. Absent, blank or non-numeric values mean
    /// page 1; numbers too large to represent saturate to the last possible page.
    pub fn from_query(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::new(n),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Self {
                page_number: u64::MAX,
            },
            Err(_) => Self::default(),
        }
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn offset(&self) -> usize {
        usize::try_from(self.page_number - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(QUESTIONS_PER_PAGE)
    }
}

/// Returns the window of `items` for `page`, preserving order.
/// A page past the end yields an empty slice.
pub fn paginate<T>(items: &[T], page: PageRequest) -> &[T] {
    let start = page.offset().min(items.len());
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: i64) -> Vec<i64> {
        (1..=n).collect()
    }

    #[test]
    fn second_page_holds_the_tail() {
        let items = ids(12);
        assert_eq!(paginate(&items, PageRequest::new(2)), &[11, 12]);
    }

    #[test]
    fn first_page_is_capped_at_page_size() {
        let items = ids(25);
        let page = paginate(&items, PageRequest::new(1));
        assert_eq!(page.len(), QUESTIONS_PER_PAGE);
        assert_eq!(page, &items[..10]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items = ids(20);
        assert!(paginate(&items, PageRequest::new(3)).is_empty());
        assert!(paginate(&items, PageRequest::new(i64::MAX)).is_empty());
        assert!(paginate::<i64>(&[], PageRequest::default()).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let items = vec![9, 3, 7, 1, 5];
        assert_eq!(paginate(&items, PageRequest::new(1)), &[9, 3, 7, 1, 5]);
    }

    #[test]
    fn every_page_is_at_most_page_size() {
        let items = ids(47);
        for n in 0..8 {
            assert!(paginate(&items, PageRequest::new(n)).len() <= QUESTIONS_PER_PAGE);
        }
    }

    #[test]
    fn non_positive_pages_clamp_to_first() {
        assert_eq!(PageRequest::new(0).page_number(), 1);
        assert_eq!(PageRequest::new(-4).offset(), 0);
    }

    #[test]
    fn query_values_are_coerced() {
        assert_eq!(PageRequest::from_query(None).page_number(), 1);
        assert_eq!(PageRequest::from_query(Some("abc")).page_number(), 1);
        assert_eq!(PageRequest::from_query(Some("")).page_number(), 1);
        assert_eq!(PageRequest::from_query(Some(" 3 ")).page_number(), 3);
        assert_eq!(PageRequest::from_query(Some("3")).offset(), 20);
    }

    #[test]
    fn overflowing_page_numbers_are_past_the_end() {
        let items = ids(12);
        let page = PageRequest::from_query(Some("99999999999999999999"));
        assert_eq!(page.page_number(), u64::MAX);
        assert!(paginate(&items, page).is_empty());

        // Too negative to parse still clamps to the first page.
        let page = PageRequest::from_query(Some("-99999999999999999999"));
        assert_eq!(page.page_number(), 1);
    }
}
