//! Page arithmetic for the question list.
//!
//! The server pages at a fixed 10 questions. Pages are 1-based; a total of
//! zero means zero pages.

use std::ops::RangeInclusive;

/// Questions per page
pub const PAGE_SIZE: u32 = 10;

/// Number of pages needed for `total` questions
pub fn page_count(total: u32) -> u32 {
    total.div_ceil(PAGE_SIZE)
}

/// Page to show after a successful delete.
///
/// `total_before` is the count before the delete. When the deleted question
/// was the only one on a page past the first, step back one page.
pub fn page_after_delete(page: u32, total_before: u32) -> u32 {
    let before_page = page.saturating_sub(1) * PAGE_SIZE;
    if page > 1 && total_before.saturating_sub(before_page) == 1 {
        page - 1
    } else {
        page
    }
}

/// Page numbers to render when only `slots` indicators fit.
///
/// Keeps `current` roughly centered and clamps to `1..=count`. Empty when
/// there are no pages.
pub fn visible_pages(current: u32, count: u32, slots: u32) -> RangeInclusive<u32> {
    if count == 0 || slots == 0 {
        return RangeInclusive::new(1, 0);
    }
    if count <= slots {
        return 1..=count;
    }

    let current = current.clamp(1, count);
    let half = slots / 2;
    let start = current.saturating_sub(half).max(1);
    let start = start.min(count - slots + 1);
    start..=start + slots - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(11), 2);
        assert_eq!(page_count(19), 2);
        assert_eq!(page_count(20), 2);
        assert_eq!(page_count(21), 3);
    }

    #[test]
    fn test_delete_last_item_steps_back() {
        // 11 questions, page 2 holds just one
        assert_eq!(page_after_delete(2, 11), 1);
        assert_eq!(page_after_delete(3, 21), 2);
    }

    #[test]
    fn test_delete_keeps_page() {
        assert_eq!(page_after_delete(2, 12), 2);
        assert_eq!(page_after_delete(1, 5), 1);
    }

    #[test]
    fn test_delete_on_first_page_never_goes_to_zero() {
        assert_eq!(page_after_delete(1, 1), 1);
    }

    #[test]
    fn test_visible_pages_all_fit() {
        assert_eq!(visible_pages(1, 3, 10), 1..=3);
        assert!(visible_pages(1, 0, 10).is_empty());
    }

    #[test]
    fn test_visible_pages_window() {
        assert_eq!(visible_pages(1, 20, 5), 1..=5);
        assert_eq!(visible_pages(10, 20, 5), 8..=12);
        assert_eq!(visible_pages(20, 20, 5), 16..=20);
        assert_eq!(visible_pages(19, 20, 4), 17..=20);
    }
}
