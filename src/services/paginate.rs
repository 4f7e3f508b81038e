//! Pagination over the filtered, sorted sequence

use serde::Serialize;

/// One page of results (1-based page index)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_count: usize,
    /// Length of the full sequence before slicing
    pub total: usize,
}

pub struct Paginator;

impl Paginator {
    /// Slice `[(page-1)*size, page*size)`, clipped to the sequence bounds.
    /// Page count is `ceil(len/size)` with a minimum of 1; an out-of-range
    /// page yields an empty item list with the requested index preserved.
    pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> Page<T> {
        let size = page_size.max(1);
        let page = page.max(1);
        let total = items.len();
        let page_count = total.div_ceil(size).max(1);

        let start = (page - 1).saturating_mul(size).min(total);
        let end = page.saturating_mul(size).min(total);

        Page {
            items: items[start..end].to_vec(),
            page,
            page_count,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_one_page() {
        let page = Paginator::paginate::<u32>(&[], 10, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.page_count, 1);
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_exact_multiple() {
        let items: Vec<u32> = (0..20).collect();
        let page = Paginator::paginate(&items, 10, 2);
        assert_eq!(page.items, (10..20).collect::<Vec<u32>>());
        assert_eq!(page.page_count, 2);
    }

    #[test]
    fn test_last_page_holds_remainder() {
        // N=23, P=10 → 3 pages, last page holds 23 - 2*10 = 3 items
        let items: Vec<u32> = (0..23).collect();
        let page = Paginator::paginate(&items, 10, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.total, 23);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        let page = Paginator::paginate(&items, 10, 4);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 4);
        assert_eq!(page.page_count, 1);
    }

    #[test]
    fn test_zero_inputs_clamped() {
        let items: Vec<u32> = (0..5).collect();
        let page = Paginator::paginate(&items, 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 1); // size clamped to 1
        assert_eq!(page.page_count, 5);
    }
}
