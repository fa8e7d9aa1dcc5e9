//! Listing view: load the whole catalog once, then page it client-side.

use crate::state::{LoadState, LoadTicket, ViewError, ViewState, ViewStateError};
use turbo_commerce::catalog::{Product, ProductsResponse};
use turbo_commerce::search::{unique_tags, FilterState, ListingPage, ListingQuery};
use turbo_data::{FetchError, ProductSource};

/// Products requested when the listing loads.
pub const LISTING_FETCH_LIMIT: u32 = 100;

/// State of the product listing.
#[derive(Debug, Clone)]
pub struct ListingView {
    view: ViewState<Vec<Product>>,
    query: ListingQuery,
    fetch_limit: u32,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new(ListingQuery::default())
    }
}

impl ListingView {
    /// Create a listing that pages with `query`.
    pub fn new(query: ListingQuery) -> Self {
        Self {
            view: ViewState::new(),
            query,
            fetch_limit: LISTING_FETCH_LIMIT,
        }
    }

    /// Set how many products to request from the API.
    pub fn with_fetch_limit(mut self, fetch_limit: u32) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    pub fn fetch_limit(&self) -> u32 {
        self.fetch_limit
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn state(&self) -> &LoadState<Vec<Product>> {
        self.view.state()
    }

    /// The loaded collection, in API order.
    pub fn products(&self) -> Option<&[Product]> {
        self.view.state().ready().map(Vec::as_slice)
    }

    pub fn begin_load(&mut self) -> Result<LoadTicket, ViewStateError> {
        self.view.begin_load()
    }

    pub fn retry(&mut self) -> Result<LoadTicket, ViewStateError> {
        self.view.retry()
    }

    /// Apply a fetch result; see [`ViewState::complete`].
    ///
    /// Every listing failure is retryable, including a 404 from the list
    /// endpoint.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<ProductsResponse, FetchError>,
    ) -> bool {
        let result = result
            .map(|response| response.products)
            .map_err(|err| ViewError::Failed(err.to_string()));
        self.view.complete(ticket, result)
    }

    /// Fetch the catalog from `source` and settle the view.
    pub async fn load<S>(&mut self, source: &S) -> Result<&LoadState<Vec<Product>>, ViewStateError>
    where
        S: ProductSource + ?Sized,
    {
        let ticket = self.begin_load()?;
        self.fetch(source, ticket).await;
        Ok(self.state())
    }

    /// Retry after a failure, fetching again from `source`.
    pub async fn reload<S>(&mut self, source: &S) -> Result<&LoadState<Vec<Product>>, ViewStateError>
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
        tracing::debug!(limit = self.fetch_limit, "loading product listing");
        let result = source.fetch_products(self.fetch_limit, 0).await;
        if let Ok(response) = &result {
            tracing::debug!(
                loaded = response.products.len(),
                total = response.total,
                "listing loaded"
            );
        }
        self.complete(ticket, result);
    }

    /// Derive the page for `state`; `None` unless the catalog is loaded.
    pub fn page(&self, state: &FilterState) -> Option<ListingPage<'_>> {
        self.products()
            .map(|products| self.query.run(products, state))
    }

    /// Every tag in the loaded catalog, sorted.
    pub fn available_tags(&self) -> Vec<String> {
        self.products().map(unique_tags).unwrap_or_default()
    }

    pub fn teardown(&mut self) {
        self.view.teardown();
    }
}
