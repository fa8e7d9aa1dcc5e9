//! Pagination and the composed listing pipeline.

use crate::catalog::Product;
use crate::search::{filter_products, sort_products, FilterOptions, FilterState};
use serde::{Deserialize, Serialize};

/// Products per page on the listing view.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Pages shown on each side of the current page in the page window.
const WINDOW_DELTA: i64 = 2;

/// Slice out one page of `items`.
///
/// Pages are 1-indexed. A page before the first, past the last, or a zero
/// page size yields an empty slice rather than an error.
pub fn paginate_products<T>(items: &[T], page: i64, page_size: usize) -> &[T] {
    if page < 1 || page_size == 0 {
        return &[];
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size));
    match start {
        Some(start) if start < items.len() => {
            let end = start.saturating_add(page_size).min(items.len());
            &items[start..end]
        }
        _ => &[],
    }
}

/// Number of pages needed for `total_items`; zero items means zero pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// An entry in the page navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLink {
    /// A link to a page number.
    Page(i64),
    /// A gap between page numbers.
    Ellipsis,
}

/// Page links to display around `current`, e.g. `1 … 4 5 6 7 8 … 20`.
///
/// The first and last pages are always shown. Nothing is shown when there
/// is at most one page. `current` may lie outside `1..=total_pages`.
pub fn page_window(current: i64, total_pages: usize) -> Vec<PageLink> {
    let total = total_pages as i64;
    if total <= 1 {
        return Vec::new();
    }

    let low = current.saturating_sub(WINDOW_DELTA);
    let high = current.saturating_add(WINDOW_DELTA);

    let mut links = vec![PageLink::Page(1)];
    if low > 2 {
        links.push(PageLink::Ellipsis);
    }

    let start = low.max(2);
    let end = high.min(total - 1);
    links.extend((start..=end).map(PageLink::Page));

    if high < total - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total));
    links
}

/// One derived page of the listing view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage<'a> {
    /// Products on this page.
    pub items: Vec<&'a Product>,
    /// Number of products matching the filters, across all pages.
    pub total_matches: usize,
    /// Number of pages for the matching products.
    pub total_pages: usize,
    /// Requested page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub page_size: usize,
}

impl ListingPage<'_> {
    /// Check if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages as i64
    }

    /// Page links for the navigation bar.
    pub fn page_window(&self) -> Vec<PageLink> {
        page_window(self.page, self.total_pages)
    }

    /// Summary line, e.g. `Showing 9 of 12 products for "phone"`.
    pub fn summary(&self, search: &str) -> String {
        let mut line = format!(
            "Showing {} of {} products",
            self.items.len(),
            self.total_matches
        );
        if !search.is_empty() {
            line.push_str(&format!(" for \"{}\"", search));
        }
        line
    }
}

/// The listing pipeline: filter, then sort, then paginate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Matching policy for search text and tags.
    #[serde(default)]
    pub options: FilterOptions,
    /// Items per page.
    pub page_size: usize,
}

impl ListingQuery {
    /// Create a pipeline with the given policy and page size.
    pub fn new(options: FilterOptions, page_size: usize) -> Self {
        Self { options, page_size }
    }

    /// Derive the page described by `state` from the full collection.
    ///
    /// Total pages are computed from the filtered length, not from the
    /// size of the collection.
    pub fn run<'a>(&self, products: &'a [Product], state: &FilterState) -> ListingPage<'a> {
        let filtered = filter_products(products, &state.search, &state.tags, self.options);
        let sorted = sort_products(&filtered, state.sort);
        let items = paginate_products(&sorted, state.page, self.page_size).to_vec();

        ListingPage {
            items,
            total_matches: sorted.len(),
            total_pages: total_pages(sorted.len(), self.page_size),
            page: state.page,
            page_size: self.page_size,
        }
    }
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new(FilterOptions::default(), DEFAULT_PAGE_SIZE)
    }
}
