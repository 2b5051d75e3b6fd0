//! The backend operations the dashboard depends on

use crate::Result;
use async_trait::async_trait;
use eshop_core::{
    AccessToken, Category, Credentials, LoginResponse, Page, Product, ProductId, ProductPayload,
    ProductQuery, Registration,
};

/// Catalog and authentication endpoints of the shop backend
///
/// [`ApiClient`](crate::ApiClient) implements this over HTTP. Each method performs
/// exactly one request, with no retries.
#[async_trait]
pub trait ShopApi: Send + Sync {
    /// `GET /categories/`
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// `GET /products/` with page, ordering and optional filters
    async fn list_products(&self, query: &ProductQuery) -> Result<Page<Product>>;

    /// `POST /auth/login/`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// `POST /auth/register/`
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// `POST /products/` with a bearer token
    async fn create_product(&self, token: &AccessToken, payload: &ProductPayload) -> Result<()>;

    /// `PUT /products/{id}/` with a bearer token
    async fn update_product(
        &self,
        token: &AccessToken,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<()>;

    /// `DELETE /products/{id}/` with a bearer token
    async fn delete_product(&self, token: &AccessToken, id: ProductId) -> Result<()>;
}
