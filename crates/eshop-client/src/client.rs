//! HTTP client for communicating with the shop API

use crate::api::ShopApi;
use crate::http::ResponseExt;
use crate::Result;
use async_trait::async_trait;
use eshop_core::{
    AccessToken, ApiConfig, Category, Credentials, LoginResponse, Page, Product, ProductId,
    ProductPayload, ProductQuery, Registration,
};
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

/// API client for making HTTP requests to the shop backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with default transport settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client from configuration, applying the request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL every endpoint path is appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, %url, "API request");
        self.client.request(method, url)
    }

    fn authorized(&self, method: Method, path: &str, token: &AccessToken) -> RequestBuilder {
        self.request(method, path).bearer_auth(token.as_str())
    }
}

#[async_trait]
impl ShopApi for ApiClient {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.request(Method::GET, "categories/")
            .send()
            .await?
            .check_success()
            .await?
            .read_json()
            .await
    }

    async fn list_products(&self, query: &ProductQuery) -> Result<Page<Product>> {
        self.request(Method::GET, "products/")
            .query(&query.to_query_pairs())
            .send()
            .await?
            .check_success()
            .await?
            .read_json()
            .await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.request(Method::POST, "auth/login/")
            .json(credentials)
            .send()
            .await?
            .check_success()
            .await?
            .read_json()
            .await
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        self.request(Method::POST, "auth/register/")
            .json(registration)
            .send()
            .await?
            .check_success()
            .await?;
        Ok(())
    }

    async fn create_product(&self, token: &AccessToken, payload: &ProductPayload) -> Result<()> {
        self.authorized(Method::POST, "products/", token)
            .json(payload)
            .send()
            .await?
            .check_success()
            .await?;
        Ok(())
    }

    async fn update_product(
        &self,
        token: &AccessToken,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<()> {
        self.authorized(Method::PUT, &format!("products/{id}/"), token)
            .json(payload)
            .send()
            .await?
            .check_success()
            .await?;
        Ok(())
    }

    async fn delete_product(&self, token: &AccessToken, id: ProductId) -> Result<()> {
        self.authorized(Method::DELETE, &format!("products/{id}/"), token)
            .send()
            .await?
            .check_success()
            .await?;
        Ok(())
    }
}
