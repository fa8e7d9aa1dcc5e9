//! Catalog domain types and listing logic for TurboCommerce.
//!
//! This crate holds everything the storefront showcase computes without
//! touching the network:
//!
//! - **Catalog**: Products and reviews as served by the catalog API
//! - **Search**: Filtering, sorting, pagination and the page window
//! - **Params**: Filter state carried in the listing's query string
//! - **Display**: Price, initials, relative date and star formatting
//!
//! # Example
//!
//! ```rust
//! use turbo_commerce::prelude::*;
//!
//! let products = vec![
//!     Product::new(1, "Smart Phone", 499.0).with_tags(["smartphones"]),
//!     Product::new(2, "Desk Lamp", 35.0).with_tags(["home"]),
//! ];
//!
//! let params = QueryParams::parse("search=phone&sort=price-desc");
//! let state = decode(&params);
//! let page = ListingQuery::default().run(&products, &state);
//!
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(format_price(page.items[0].price), "$499.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod display;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Product, ProductsResponse, Review, CARD_TAG_LIMIT};

    // Search
    pub use crate::search::{
        back_link, decode, encode, encode_state, filter_options, filter_products, page_window,
        paginate_products, sort_products, toggle_tag, total_pages, unique_tags, FilterOptions,
        FilterState, FilterUpdate, ListingPage, ListingQuery, MatchFields, PageLink,
        QueryParams, SortOption, TagMatch, DEFAULT_PAGE_SIZE,
    };

    // Display
    pub use crate::display::{
        format_price, format_relative_date, initials, render_stars, RelativeDateStyle,
    };
}
