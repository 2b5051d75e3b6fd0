//! Form state for the auth and product modals

use eshop_core::{
    CategoryId, Credentials, Decimal, Error, Product, ProductId, ProductPayload, Registration,
};
use std::fmt;

/// Which action the auth modal performs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Sign in with an existing account
    #[default]
    Login,
    /// Create an account
    Register,
}

impl AuthMode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Modal title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }
}

/// Raw input of the auth modal
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    /// Account name
    pub username: String,
    /// Email, used when registering
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation, used when registering
    pub password2: String,
}

impl fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl AuthForm {
    /// Login request body
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Registration request body
    #[must_use]
    pub fn registration(&self) -> Registration {
        Registration {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            password2: self.password2.clone(),
        }
    }

    /// Empty every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Raw input of the product modal, as typed
///
/// A populated `id` means the form edits that product; otherwise it creates one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Product being edited
    pub id: Option<ProductId>,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Price text, e.g. `24.50`
    pub price: String,
    /// Stock text, e.g. `12`
    pub stock_quantity: String,
    /// Category id text
    pub category: String,
}

impl ProductForm {
    /// Pre-fill the form for editing an existing product
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            category: product.category.to_string(),
        }
    }

    /// Whether submitting updates an existing product
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Empty every field, returning to create mode
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Parse and validate the typed input into a request body
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first field that cannot be used.
    pub fn to_payload(&self) -> eshop_core::Result<ProductPayload> {
        let price = self
            .price
            .trim()
            .parse::<Decimal>()
            .map_err(|_| Error::validation("price", "must be a decimal number"))?;

        let stock_quantity = self
            .stock_quantity
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::validation("stock quantity", "must be a whole number, 0 or more"))?;

        let category = self
            .category
            .trim()
            .parse::<CategoryId>()
            .map_err(|_| Error::validation("category", "must be a category id"))?;

        ProductPayload {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            price,
            stock_quantity,
            category,
        }
        .validated()
    }
}
