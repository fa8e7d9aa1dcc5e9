//! Sort options and the filter state of the listing view.

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep the order the API returned.
    All,
    /// Sort by price, low to high.
    #[default]
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    RatingDesc,
}

impl SortOption {
    /// Sort applied when the query string does not name one.
    pub const DEFAULT: SortOption = SortOption::PriceAsc;

    /// Every option, in the order the sort picker lists them.
    pub const ALL: [SortOption; 4] = [
        SortOption::All,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::RatingDesc,
    ];

    /// Wire value used in the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::All => "all",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::RatingDesc => "rating-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::All => "All Products",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::RatingDesc => "Rating: High to Low",
        }
    }

    /// Compare two products under this option.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::All => Ordering::Equal,
            SortOption::PriceAsc => a.price.total_cmp(&b.price),
            SortOption::PriceDesc => b.price.total_cmp(&a.price),
            SortOption::RatingDesc => b.rating.total_cmp(&a.rating),
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| CommerceError::InvalidSortOption(s.to_string()))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return a sorted copy of `products`; the input is left untouched.
///
/// The sort is stable, so ties and [`SortOption::All`] keep input order.
pub fn sort_products<P>(products: &[P], sort: SortOption) -> Vec<P>
where
    P: Borrow<Product> + Clone,
{
    let mut sorted = products.to_vec();
    if sort != SortOption::All {
        sorted.sort_by(|a, b| sort.compare(a.borrow(), b.borrow()));
    }
    sorted
}

/// Filter state of the listing view, as carried in the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Search text.
    pub search: String,
    /// Selected tags.
    pub tags: Vec<String>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed). Not validated; out-of-range pages
    /// produce an empty listing.
    pub page: i64,
}

impl FilterState {
    /// Create the default state.
    pub fn new() -> Self {
        Self {
            search: String::new(),
            tags: Vec::new(),
            sort: SortOption::DEFAULT,
            page: 1,
        }
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the selected tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Whether search text or tags narrow the listing.
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || !self.tags.is_empty()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}
