//! Fixed-size pagination over the ordered country list.
//!
//! Pages are 1-indexed. An empty list still has one (empty) page so that the
//! UI can show an explicit "no results" state instead of a zero-page display.

/// Number of countries shown per page.
pub const PAGE_SIZE: usize = 20;

/// Number of pages needed for `len` items, never less than one.
#[must_use]
pub const fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 || len == 0 {
        return 1;
    }
    (len + page_size - 1) / page_size
}

/// Returns the slice of `items` shown on `page` (1-indexed).
///
/// Pages outside `[1, page_count]` yield an empty slice; callers are expected
/// to clamp with [`Pagination::clamp`] before slicing.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Current page cursor with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pagination {
    /// Starts at page 1.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self { page: 1, page_size }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pulls the page back into `[1, page_count(len)]`.
    ///
    /// Returns `true` if the page changed.
    pub fn clamp(&mut self, len: usize) -> bool {
        let last = page_count(len, self.page_size);
        let clamped = self.page.clamp(1, last);
        let changed = clamped != self.page;
        if changed {
            tracing::debug!(from = self.page, to = clamped, "page clamped");
        }
        self.page = clamped;
        changed
    }

    /// Advances one page if not already on the last. Returns `true` on change.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page < page_count(len, self.page_size) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page if not already on the first. Returns `true` on change.
    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Slice of `items` on the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_has_a_floor_of_one() {
        assert_eq!(page_count(0, PAGE_SIZE), 1);
        assert_eq!(page_count(1, PAGE_SIZE), 1);
        assert_eq!(page_count(20, PAGE_SIZE), 1);
        assert_eq!(page_count(21, PAGE_SIZE), 2);
        assert_eq!(page_count(45, PAGE_SIZE), 3);
    }

    #[test]
    fn forty_five_items_make_three_pages_with_five_on_the_last() {
        let items: Vec<usize> = (0..45).collect();
        assert_eq!(page_count(items.len(), PAGE_SIZE), 3);
        assert_eq!(paginate(&items, 3, PAGE_SIZE).len(), 5);
        assert_eq!(paginate(&items, 3, PAGE_SIZE).to_vec(), vec![40, 41, 42, 43, 44]);
    }

    #[test]
    fn pages_concatenate_back_to_the_list() {
        for len in [0, 1, 19, 20, 21, 40, 45, 250] {
            let items: Vec<usize> = (0..len).collect();
            let pages = page_count(len, PAGE_SIZE);
            let rebuilt: Vec<usize> = (1..=pages)
                .flat_map(|page| paginate(&items, page, PAGE_SIZE).iter().copied())
                .collect();
            assert_eq!(rebuilt, items, "len {len}");
        }
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<usize> = (0..5).collect();
        assert!(paginate(&items, 0, PAGE_SIZE).is_empty());
        assert!(paginate(&items, 2, PAGE_SIZE).is_empty());
    }

    #[test]
    fn clamp_pulls_page_back_when_list_shrinks() {
        let mut pager = Pagination::default();
        assert!(pager.next(60));
        assert!(pager.next(60));
        assert_eq!(pager.page(), 3);

        assert!(pager.clamp(25));
        assert_eq!(pager.page(), 2);

        assert!(pager.clamp(0));
        assert_eq!(pager.page(), 1);
        assert!(!pager.clamp(0));
    }

    #[test]
    fn next_and_prev_stop_at_the_edges() {
        let mut pager = Pagination::default();
        assert!(!pager.prev());
        assert!(pager.next(21));
        assert!(!pager.next(21));
        assert_eq!(pager.page(), 2);
        assert!(pager.prev());
        assert_eq!(pager.page(), 1);
    }
}
