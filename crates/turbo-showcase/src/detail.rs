//! Detail view for a single product.

use crate::state::{LoadState, LoadTicket, ViewError, ViewState, ViewStateError};
use turbo_commerce::catalog::{Product, Review};
use turbo_data::{FetchError, ProductSource};

/// State of a product detail page.
#[derive(Debug, Clone)]
pub struct DetailView {
    id: String,
    view: ViewState<Product>,
}

impl DetailView {
    /// Create a detail view for the product with `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            view: ViewState::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &LoadState<Product> {
        self.view.state()
    }

    pub fn product(&self) -> Option<&Product> {
        self.view.state().ready()
    }

    pub fn begin_load(&mut self) -> Result<LoadTicket, ViewStateError> {
        self.view.begin_load()
    }

    /// Start another load; a missing product is not retried.
    pub fn retry(&mut self) -> Result<LoadTicket, ViewStateError> {
        self.view.retry()
    }

    /// Whether the current failure offers a retry.
    pub fn can_retry(&self) -> bool {
        self.view
            .state()
            .error()
            .is_some_and(ViewError::is_retryable)
    }

    /// Apply a fetch result, classifying 404 as [`ViewError::NotFound`].
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<Product, FetchError>) -> bool {
        let result = result.map_err(|err| ViewError::from_fetch(&err));
        self.view.complete(ticket, result)
    }

    /// Fetch the product from `source` and settle the view.
    pub async fn load<S>(&mut self, source: &S) -> Result<&LoadState<Product>, ViewStateError>
    where
        S: ProductSource + ?Sized,
    {
        let ticket = self.begin_load()?;
        self.fetch(source, ticket).await;
        Ok(self.state())
    }

    /// Retry after a retryable failure.
    pub async fn reload<S>(&mut self, source: &S) -> Result<&LoadState<Product>, ViewStateError>
    where
        S: ProductSource + ?Sized,
    {
        let ticket = self.retry()?;
        self.fetch(source, ticket).await;
        Ok(self.state())
    }

    async fn fetch<S>(&mut self, source: &S, ticket: LoadTicket)
    where
        S: ProductSource + ?Sized,
    {
        tracing::debug!(id = %self.id, "loading product");
        let result = source.fetch_product(&self.id).await;
        self.complete(ticket, result);
    }

    /// Gallery images; empty until the product is loaded.
    pub fn gallery(&self) -> Vec<&str> {
        self.product().map(Product::gallery).unwrap_or_default()
    }

    /// Reviews sorted newest first; empty until the product is loaded.
    pub fn reviews_newest_first(&self) -> Vec<&Review> {
        self.product()
            .map(Product::reviews_newest_first)
            .unwrap_or_default()
    }

    pub fn teardown(&mut self) {
        self.view.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{catalog, StubSource};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_load_ready() {
        let source = StubSource::new(catalog());
        let mut detail = DetailView::new("2");
        let state = detail.load(&source).await.unwrap();

        assert_eq!(state.ready().map(|p| p.title.as_str()), Some("iPhone 9"));
        assert_eq!(detail.gallery(), vec!["iphone-1.jpg", "iphone-2.jpg"]);
        let comments: Vec<&str> = detail
            .reviews_newest_first()
            .iter()
            .map(|r| r.comment.as_str())
            .collect();
        assert_eq!(comments, vec!["Great phone", "Battery is weak"]);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let source = StubSource::new(catalog());
        let mut detail = DetailView::new("9999");
        let state = detail.load(&source).await.unwrap();

        assert_eq!(state.error(), Some(&ViewError::NotFound));
        assert!(!detail.can_retry());
        assert_eq!(detail.reload(&source).await.unwrap_err(), ViewStateError::NotRetryable);
    }

    #[tokio::test]
    async fn test_server_error_can_retry() {
        let source = StubSource::failing(503);
        let mut detail = DetailView::new("1");
        let state = detail.load(&source).await.unwrap();
        assert_eq!(
            state.error(),
            Some(&ViewError::Failed("Failed to fetch: Service Unavailable".into()))
        );
        assert!(detail.can_retry());

        source.set_products(catalog());
        let state = detail.reload(&source).await.unwrap();
        assert_eq!(state.as_str(), "ready");
        assert_eq!(detail.gallery(), vec!["lamp-thumb.jpg"]);
    }

    #[test]
    fn test_empty_until_loaded() {
        let detail = DetailView::new("1");
        assert!(detail.gallery().is_empty());
        assert!(detail.reviews_newest_first().is_empty());
        assert!(!detail.can_retry());
    }
}
