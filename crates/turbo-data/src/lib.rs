//! HTTP client for the TurboCommerce catalog API.
//!
//! Wraps `reqwest` with the two read-only endpoints the storefront needs
//! and maps failures into a [`FetchError`] that keeps the HTTP status.
//!
//! # Example
//!
//! ```rust,no_run
//! use turbo_data::FetchClient;
//!
//! # async fn run() -> Result<(), turbo_data::FetchError> {
//! let client = FetchClient::new();
//!
//! let page = client.fetch_products(100, 0).await?;
//! println!("{} of {} products", page.products.len(), page.total);
//!
//! match client.fetch_product_by_id("1").await {
//!     Ok(product) => println!("{}", product.title),
//!     Err(e) if e.is_not_found() => println!("Product not found"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod source;

pub use client::{FetchClient, DEFAULT_BASE_URL, DEFAULT_LIMIT};
pub use error::FetchError;
pub use source::ProductSource;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, ProductSource};
}
