//! View state for the TurboCommerce product showcase.
//!
//! The listing and detail views each own a small load state machine
//! (`loading`, `ready`, `error`) fed by a [`ProductSource`]. Everything the
//! views display is derived on demand from the loaded data and the filter
//! state decoded from the query string.
//!
//! # Example
//!
//! ```rust,no_run
//! use turbo_commerce::search::{decode, QueryParams};
//! use turbo_data::FetchClient;
//! use turbo_showcase::ListingView;
//!
//! # async fn run() {
//! let client = FetchClient::new();
//! let mut listing = ListingView::default();
//! listing.load(&client).await.unwrap();
//!
//! let state = decode(&QueryParams::parse("tags=beauty&sort=rating-desc"));
//! if let Some(page) = listing.page(&state) {
//!     for product in &page.items {
//!         println!("{}", product.title);
//!     }
//! }
//! # }
//! ```
//!
//! [`ProductSource`]: turbo_data::ProductSource

mod detail;
mod listing;
mod state;

pub use detail::DetailView;
pub use listing::{ListingView, LISTING_FETCH_LIMIT};
pub use state::{LoadState, LoadTicket, ViewError, ViewState, ViewStateError};
