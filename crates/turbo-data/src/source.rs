//! Abstraction over where products come from.

use crate::FetchError;
use async_trait::async_trait;
use turbo_commerce::catalog::{Product, ProductsResponse};

/// A source of catalog products.
///
/// [`FetchClient`](crate::FetchClient) is the HTTP implementation; views
/// take any source so they can be driven without a network.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch `limit` products starting at offset `skip`.
    async fn fetch_products(&self, limit: u32, skip: u32) -> Result<ProductsResponse, FetchError>;

    /// Fetch one product by its id.
    async fn fetch_product(&self, id: &str) -> Result<Product, FetchError>;
}

#[async_trait]
impl<S: ProductSource + ?Sized> ProductSource for std::sync::Arc<S> {
    async fn fetch_products(&self, limit: u32, skip: u32) -> Result<ProductsResponse, FetchError> {
        (**self).fetch_products(limit, skip).await
    }

    async fn fetch_product(&self, id: &str) -> Result<Product, FetchError> {
        (**self).fetch_product(id).await
    }
}
