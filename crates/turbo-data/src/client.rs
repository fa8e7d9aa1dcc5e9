//! Catalog API client.

use crate::{FetchError, ProductSource};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use turbo_commerce::catalog::{Product, ProductsResponse};
use url::Url;

/// Public catalog API used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Page size the API applies when none is requested.
pub const DEFAULT_LIMIT: u32 = 30;

/// HTTP client for the catalog API.
///
/// Requests are plain `GET`s with no retries or timeouts beyond what the
/// underlying [`reqwest::Client`] is configured with.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    base_url: Url,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a client for [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }

    /// Point the client at another API root.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, FetchError> {
        let url = Url::parse(base_url.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.as_ref().to_string()));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Use a preconfigured [`reqwest::Client`].
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// The API root requests are made against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch one page of the catalog.
    pub async fn fetch_products(&self, limit: u32, skip: u32) -> Result<ProductsResponse, FetchError> {
        let mut url = self.endpoint(&["products"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string());
        self.get_json(url).await
    }

    /// Fetch a single product.
    ///
    /// The id is sent as one path segment, percent-encoded, so it may be
    /// any string; a missing product is reported as a 404 [`FetchError::Api`].
    pub async fn fetch_product_by_id(&self, id: &str) -> Result<Product, FetchError> {
        let url = self.endpoint(&["products", id])?;
        self.get_json(url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "response");

        if !status.is_success() {
            return Err(FetchError::from_status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ProductSource for FetchClient {
    async fn fetch_products(&self, limit: u32, skip: u32) -> Result<ProductsResponse, FetchError> {
        FetchClient::fetch_products(self, limit, skip).await
    }

    async fn fetch_product(&self, id: &str) -> Result<Product, FetchError> {
        self.fetch_product_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    const LIST_BODY: &str = r#"{
        "products": [
            {"id": 1, "title": "Essence Mascara", "price": 9.99, "rating": 4.9, "tags": ["beauty"]},
            {"id": 2, "title": "Eyeshadow Palette", "price": 19.99, "rating": 3.3, "tags": ["beauty"]}
        ],
        "total": 194,
        "skip": 0,
        "limit": 2
    }"#;

    async fn client_for(server: &mockito::ServerGuard) -> FetchClient {
        FetchClient::new().with_base_url(server.url()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_products_sends_limit_and_skip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "2".into()),
                Matcher::UrlEncoded("skip".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LIST_BODY)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let response = client.fetch_products(2, 10).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.total, 194);
        let titles: Vec<&str> = response.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Essence Mascara", "Eyeshadow Palette"]);
    }

    #[tokio::test]
    async fn test_fetch_product_by_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/1")
            .with_status(200)
            .with_body(r#"{"id": 1, "title": "Essence Mascara", "price": 9.99}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let product = client.fetch_product_by_id("1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(product.id.get(), 1);
        assert!(product.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_product_id_is_percent_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/a%2Fb%20c")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_product_by_id("a/b c").await.unwrap_err();

        mock.assert_async().await;
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/9999")
            .with_status(404)
            .with_body(r#"{"message": "Product with id '9999' not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_product_by_id("9999").await.unwrap_err();

        assert!(matches!(err, FetchError::Api { status: 404, .. }));
        assert_eq!(err.to_string(), "Failed to fetch: Not Found");
    }

    #[tokio::test]
    async fn test_server_error_is_not_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_products(DEFAULT_LIMIT, 0).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/1")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_product_by_id("1").await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop a listener so the port is known to be closed.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = FetchClient::new()
            .with_base_url(format!("http://127.0.0.1:{}", port))
            .unwrap();

        let err = client.fetch_products(1, 0).await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/products/3")
            .with_status(200)
            .with_body(r#"{"id": 3, "title": "Lamp", "price": 35.0}"#)
            .create_async()
            .await;

        let client = FetchClient::new()
            .with_base_url(format!("{}/api/", server.url()))
            .unwrap();
        let product = client.fetch_product_by_id("3").await.unwrap();

        mock.assert_async().await;
        assert_eq!(product.title, "Lamp");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            FetchClient::new().with_base_url("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            FetchClient::new().with_base_url("mailto:shop@example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(FetchClient::new().base_url().as_str(), "https://dummyjson.com/");
    }
}
