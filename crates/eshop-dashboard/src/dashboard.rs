//! The dashboard state container
//!
//! [`Dashboard`] owns every piece of UI state and performs each user action as at most one
//! backend round trip followed, where needed, by a catalog re-fetch. Operations never return
//! errors: every failure ends up as a banner message and a log line.

use crate::banner::Banner;
use crate::catalog::Catalog;
use crate::forms::{AuthForm, AuthMode, ProductForm};
use crate::session::Session;
use eshop_client::{ClientError, ShopApi};
use eshop_core::{CategoryId, ProductId, ProductQuery, SortKey};
use tracing::{debug, error, info, warn};

/// Banner texts shown to the user
pub mod messages {
    /// Product list fetch failed
    pub const FETCH_FAILED: &str = "Failed to fetch products. Make sure the API server is running!";
    /// Login failed for any reason
    pub const LOGIN_FAILED: &str = "Login failed. Check your credentials.";
    /// Login succeeded
    pub const LOGIN_OK: &str = "Login successful!";
    /// Registration passwords differ
    pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
    /// Registration succeeded
    pub const REGISTER_OK: &str = "Registration successful! Please login.";
    /// Registration failed without field messages
    pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
    /// Logout
    pub const LOGOUT_OK: &str = "Logged out successfully";
    /// A mutation was attempted while anonymous
    pub const LOGIN_REQUIRED: &str = "Please login to manage products";
    /// Product created
    pub const PRODUCT_CREATED: &str = "Product created!";
    /// Product updated
    pub const PRODUCT_UPDATED: &str = "Product updated!";
    /// Create or update failed
    pub const SAVE_FAILED: &str = "Failed to save product";
    /// Product deleted
    pub const PRODUCT_DELETED: &str = "Product deleted successfully";
    /// Delete failed
    pub const DELETE_FAILED: &str = "Failed to delete product";
    /// Delete confirmation prompt
    pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this product?";
}

/// Asks the user a yes/no question
pub trait Confirm {
    /// Returns `true` when the user agrees
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Login/registration modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthModal {
    /// Whether the modal is showing
    pub open: bool,
    /// Login or register
    pub mode: AuthMode,
    /// Typed input
    pub form: AuthForm,
}

/// Create/edit product modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductModal {
    /// Whether the modal is showing
    pub open: bool,
    /// Typed input
    pub form: ProductForm,
}

/// All dashboard state plus the backend it talks to
#[derive(Debug)]
pub struct Dashboard<A> {
    api: A,
    session: Session,
    catalog: Catalog,
    banner: Banner,
    auth_modal: AuthModal,
    product_modal: ProductModal,
}

impl<A: ShopApi> Dashboard<A> {
    /// Create an anonymous dashboard with an empty catalog
    ///
    /// Nothing is fetched until [`refresh`](Self::refresh) is called.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            session: Session::default(),
            catalog: Catalog::default(),
            banner: Banner::default(),
            auth_modal: AuthModal::default(),
            product_modal: ProductModal::default(),
        }
    }

    /// Backend handle
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Current session
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Catalog state
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Banner state
    #[must_use]
    pub const fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Auth modal state
    #[must_use]
    pub const fn auth_modal(&self) -> &AuthModal {
        &self.auth_modal
    }

    /// Product modal state
    #[must_use]
    pub const fn product_modal(&self) -> &ProductModal {
        &self.product_modal
    }

    /// Auth form, for input
    pub const fn auth_form_mut(&mut self) -> &mut AuthForm {
        &mut self.auth_modal.form
    }

    /// Product form, for input
    pub const fn product_form_mut(&mut self) -> &mut ProductForm {
        &mut self.product_modal.form
    }

    // ----- catalog -----

    /// Re-fetch the product page and the category list
    pub async fn refresh(&mut self) {
        self.fetch_products().await;
        self.fetch_categories().await;
    }

    /// Re-fetch the product page shown on screen
    ///
    /// On failure the previous list stays on screen and the error banner is set.
    pub async fn fetch_products(&mut self) {
        let query = self.catalog.query().clone();
        self.load_products(query).await;
    }

    async fn load_products(&mut self, query: ProductQuery) {
        debug!(page = query.page, ordering = %query.sort, "Fetching products");

        match self.api.list_products(&query).await {
            Ok(page) => {
                debug!(count = page.count, received = page.results.len(), "Products fetched");
                self.catalog.apply_page(query, page);
            }
            Err(e) => {
                error!(error = %e, page = query.page, "Failed to fetch products");
                self.banner.set_error(messages::FETCH_FAILED);
            }
        }
    }

    /// Fetch `query` and the categories, if the parameters changed
    async fn requery(&mut self, query: Option<ProductQuery>) {
        if let Some(query) = query {
            self.load_products(query).await;
            self.fetch_categories().await;
        }
    }

    /// Fetch the category list
    ///
    /// Failures are logged only.
    pub async fn fetch_categories(&mut self) {
        match self.api.list_categories().await {
            Ok(categories) => self.catalog.set_categories(categories),
            Err(e) => error!(error = %e, "Failed to fetch categories"),
        }
    }

    /// Change the search term; an empty term clears it
    ///
    /// Parameters are compared with the list on screen, so repeating a change whose
    /// fetch failed retries it.
    pub async fn set_search(&mut self, term: Option<String>) {
        let query = self.catalog.with_search(term);
        self.requery(query).await;
    }

    /// Change the category filter
    pub async fn set_category(&mut self, category: Option<CategoryId>) {
        let query = self.catalog.with_category(category);
        self.requery(query).await;
    }

    /// Change the ordering
    pub async fn set_sort(&mut self, sort: SortKey) {
        let query = self.catalog.with_sort(sort);
        self.requery(query).await;
    }

    /// Jump to a page; 0 is treated as 1
    pub async fn go_to_page(&mut self, page: u32) {
        let query = self.catalog.with_page(page);
        self.requery(query).await;
    }

    /// Advance one page, stopping at the last
    pub async fn next_page(&mut self) {
        let page = self.catalog.next_page();
        self.go_to_page(page).await;
    }

    /// Go back one page, stopping at the first
    pub async fn previous_page(&mut self) {
        let page = self.catalog.previous_page();
        self.go_to_page(page).await;
    }

    // ----- session -----

    /// Show the auth modal in login mode
    pub fn open_auth_modal(&mut self) {
        self.auth_modal.open = true;
        self.auth_modal.mode = AuthMode::Login;
    }

    /// Hide the auth modal, keeping what was typed
    pub const fn close_auth_modal(&mut self) {
        self.auth_modal.open = false;
    }

    /// Switch between login and register
    pub fn toggle_auth_mode(&mut self) {
        self.auth_modal.mode = self.auth_modal.mode.toggled();
        self.banner.dismiss_error();
    }

    /// Submit the auth form in its current mode
    pub async fn submit_auth(&mut self) {
        self.banner.clear();
        match self.auth_modal.mode {
            AuthMode::Login => self.login().await,
            AuthMode::Register => self.register().await,
        }
    }

    async fn login(&mut self) {
        let credentials = self.auth_modal.form.credentials();

        match self.api.login(&credentials).await {
            Ok(response) => {
                info!(username = %credentials.username, "Logged in");
                self.session = Session::authenticated(response.access, credentials.username);
                self.auth_modal.open = false;
                self.auth_modal.form.reset();
                self.banner.set_success(messages::LOGIN_OK);
            }
            Err(e) => {
                warn!(username = %credentials.username, error = %e, "Login failed");
                self.banner.set_error(messages::LOGIN_FAILED);
            }
        }
    }

    async fn register(&mut self) {
        let registration = self.auth_modal.form.registration();
        if !registration.passwords_match() {
            self.banner.set_error(messages::PASSWORD_MISMATCH);
            return;
        }

        match self.api.register(&registration).await {
            Ok(()) => {
                info!(username = %registration.username, "Registered account");
                self.auth_modal.mode = AuthMode::Login;
                self.auth_modal.form.reset();
                self.banner.set_success(messages::REGISTER_OK);
            }
            Err(e) => {
                warn!(username = %registration.username, error = %e, "Registration failed");
                let message = e
                    .field_messages()
                    .unwrap_or_else(|| messages::REGISTER_FAILED.to_string());
                self.banner.set_error(message);
            }
        }
    }

    /// Forget the token locally
    pub fn logout(&mut self) {
        if let Some(username) = self.session.username() {
            info!(username, "Logged out");
        }
        self.session = Session::Anonymous;
        self.banner.set_success(messages::LOGOUT_OK);
    }

    // ----- products -----

    /// Show an empty product form
    pub fn open_create_product(&mut self) {
        self.product_modal.form.reset();
        self.product_modal.open = true;
    }

    /// Show the product form pre-filled from a product on the current page
    ///
    /// Returns `false` when the product is not on the current page.
    pub fn open_edit_product(&mut self, id: ProductId) -> bool {
        let Some(product) = self.catalog.product(id) else {
            return false;
        };
        self.product_modal.form = ProductForm::from_product(product);
        self.product_modal.open = true;
        true
    }

    /// Hide the product modal, keeping what was typed
    pub const fn close_product_modal(&mut self) {
        self.product_modal.open = false;
    }

    /// Create or update, depending on whether the form carries an id
    pub async fn submit_product(&mut self) {
        self.banner.clear();

        let Some(token) = self.session.token().cloned() else {
            self.banner.set_error(messages::LOGIN_REQUIRED);
            return;
        };

        let payload = match self.product_modal.form.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                debug!(error = %e, "Product form rejected");
                self.banner.set_error(e.to_string());
                return;
            }
        };

        let (result, success) = match self.product_modal.form.id {
            Some(id) => (
                self.api.update_product(&token, id, &payload).await,
                messages::PRODUCT_UPDATED,
            ),
            None => (
                self.api.create_product(&token, &payload).await,
                messages::PRODUCT_CREATED,
            ),
        };

        match result {
            Ok(()) => {
                info!(id = ?self.product_modal.form.id, name = %payload.name, "Product saved");
                self.banner.set_success(success);
                self.product_modal.form.reset();
                self.product_modal.open = false;
                self.fetch_products().await;
            }
            Err(e) => {
                log_mutation_failure("save", &e);
                self.banner.set_error(messages::SAVE_FAILED);
            }
        }
    }

    /// Delete a product after the user confirms
    #[allow(clippy::future_not_send)]
    pub async fn delete_product(&mut self, id: ProductId, confirm: &mut impl Confirm) {
        let Some(token) = self.session.token().cloned() else {
            self.banner.set_error(messages::LOGIN_REQUIRED);
            return;
        };

        if !confirm.confirm(messages::CONFIRM_DELETE) {
            debug!(id, "Delete cancelled");
            return;
        }

        match self.api.delete_product(&token, id).await {
            Ok(()) => {
                info!(id, "Product deleted");
                self.banner.set_success(messages::PRODUCT_DELETED);
                self.fetch_products().await;
            }
            Err(e) => {
                log_mutation_failure("delete", &e);
                self.banner.set_error(messages::DELETE_FAILED);
            }
        }
    }

    // ----- banner -----

    /// Hide the error message
    pub fn dismiss_error(&mut self) {
        self.banner.dismiss_error();
    }

    /// Hide the success message
    pub fn dismiss_success(&mut self) {
        self.banner.dismiss_success();
    }
}

fn log_mutation_failure(action: &str, e: &ClientError) {
    match e.status() {
        Some(status) => error!(action, status, error = %e, "Product request rejected"),
        None => error!(action, error = %e, "Product request failed"),
    }
}
