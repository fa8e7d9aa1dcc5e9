//! Search module.
//!
//! Contains the listing pipeline (filter, sort, paginate) and the codec
//! that keeps filter state in the query string.

mod filter;
mod params;
mod query;
mod results;

pub use filter::{
    filter_options, filter_products, toggle_tag, unique_tags, FilterOptions, MatchFields,
    TagMatch,
};
pub use params::{
    back_link, decode, decode_with_sort, encode, encode_state, FilterUpdate, QueryParams,
    LISTING_PATH, PAGE_KEY, SEARCH_KEY, SORT_KEY, TAGS_KEY,
};
pub use query::{sort_products, FilterState, SortOption};
pub use results::{
    page_window, paginate_products, total_pages, ListingPage, ListingQuery, PageLink,
    DEFAULT_PAGE_SIZE,
};
