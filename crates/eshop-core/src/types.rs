//! Core data types shared by the REST client and the dashboard

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Product identifier type
pub type ProductId = i64;

/// Category identifier type
pub type CategoryId = i64;

/// Number of products the backend returns per page
pub const PAGE_SIZE: u64 = 10;

/// Number of pages needed to show `count` products, `ceil(count / PAGE_SIZE)`
#[must_use]
pub fn total_pages(count: u64) -> u32 {
    u32::try_from(count.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}

/// Product ordering accepted by the backend's `ordering` parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Most recently created first
    #[default]
    #[serde(rename = "-created_at")]
    NewestFirst,
    /// Oldest first
    #[serde(rename = "created_at")]
    OldestFirst,
    /// Cheapest first
    #[serde(rename = "price")]
    PriceAscending,
    /// Most expensive first
    #[serde(rename = "-price")]
    PriceDescending,
    /// Alphabetical by name
    #[serde(rename = "name")]
    NameAscending,
    /// Reverse alphabetical by name
    #[serde(rename = "-name")]
    NameDescending,
}

impl SortKey {
    /// Every sort key, in the order the sort selector lists them
    pub const ALL: [Self; 6] = [
        Self::NewestFirst,
        Self::OldestFirst,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::NameAscending,
        Self::NameDescending,
    ];

    /// Wire value sent as `ordering`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewestFirst => "-created_at",
            Self::OldestFirst => "created_at",
            Self::PriceAscending => "price",
            Self::PriceDescending => "-price",
            Self::NameAscending => "name",
            Self::NameDescending => "-name",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewestFirst => "Newest First",
            Self::OldestFirst => "Oldest First",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
            Self::NameAscending => "Name: A-Z",
            Self::NameDescending => "Name: Z-A",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.as_str()).collect();
                crate::Error::validation(
                    "sort",
                    format!("unknown sort key '{s}', expected one of {}", known.join(", ")),
                )
            })
    }
}

/// A named grouping applied to products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID
    pub id: CategoryId,
    /// Display name
    pub name: String,
}

/// A catalog item as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Unit price, sent over the wire as a decimal string
    pub price: Decimal,

    /// Units in stock
    pub stock_quantity: u32,

    /// Category reference
    pub category: CategoryId,

    /// Category display name
    #[serde(default)]
    pub category_name: String,

    /// When the product was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items matching the query, across all pages
    #[serde(default)]
    pub count: u64,

    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,

    /// Items on this page
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Number of pages the whole listing spans
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.count)
    }
}

/// Parameters of a product listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Page number (1-based)
    pub page: u32,
    /// Restrict to one category
    pub category: Option<CategoryId>,
    /// Substring search, matched by the backend
    pub search: Option<String>,
    /// Ordering
    pub sort: SortKey,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            category: None,
            search: None,
            sort: SortKey::default(),
        }
    }
}

impl ProductQuery {
    /// Query parameters in request order: `page`, `ordering`, then the optional filters
    ///
    /// An empty search term is omitted.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("ordering", self.sort.as_str().to_string()),
        ];

        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }

        pairs
    }
}

/// Opaque bearer token issued by the login endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for the `Authorization` header
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Body of `POST /auth/login/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Access token for authenticated calls
    pub access: AccessToken,
}

/// Body of `POST /auth/register/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Requested account name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub password2: String,
}

impl Registration {
    /// Whether the confirmation matches the password
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password == self.password2
    }
}

/// Body of product create and update requests; never carries an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ProductPayload {
    /// Product name
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Unit price
    #[validate(custom(function = "non_negative_price"))]
    pub price: Decimal,

    /// Units in stock
    pub stock_quantity: u32,

    /// Category reference
    pub category: CategoryId,
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut error = ValidationError::new("range");
        error.message = Some("must not be negative".into());
        return Err(error);
    }
    Ok(())
}

impl ProductPayload {
    /// Run field validation, reporting the first failing field
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validated(self) -> crate::Result<Self> {
        if let Err(errors) = self.validate() {
            let mut fields: Vec<_> = errors
                .field_errors()
                .into_iter()
                .map(|(field, errs)| {
                    let message = errs
                        .first()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map_or_else(|| e.code.to_string(), ToString::to_string)
                        })
                        .unwrap_or_default();
                    (field.to_string(), message)
                })
                .collect();
            fields.sort();

            let (field, message) = fields
                .into_iter()
                .next()
                .unwrap_or_else(|| ("product".to_string(), "invalid product".to_string()));
            return Err(crate::Error::validation(field, message));
        }
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(9, 1)]
    #[case(10, 1)]
    #[case(11, 2)]
    #[case(20, 2)]
    #[case(101, 11)]
    fn test_total_pages(#[case] count: u64, #[case] expected: u32) {
        assert_eq!(total_pages(count), expected);
    }

    proptest! {
        #[test]
        fn prop_total_pages_is_ceiling(count in 0u64..1_000_000) {
            let pages = u64::from(total_pages(count));
            prop_assert!(pages * PAGE_SIZE >= count);
            prop_assert!(pages == 0 || (pages - 1) * PAGE_SIZE < count);
        }
    }

    #[test]
    fn test_sort_key_round_trips_through_wire_value() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
            assert_eq!(
                serde_json::to_value(key).unwrap(),
                json!(key.as_str()),
                "serde name of {key:?}"
            );
        }
        assert_eq!(SortKey::default(), SortKey::NewestFirst);
    }

    #[test]
    fn test_sort_key_rejects_unknown() {
        let error = "stock".parse::<SortKey>().unwrap_err();
        assert!(error.is_validation());
        assert!(error.to_string().contains("-created_at"));
    }

    #[test]
    fn test_query_pairs_with_all_filters() {
        let query = ProductQuery {
            page: 2,
            category: Some(3),
            search: Some("lamp".to_string()),
            sort: SortKey::PriceDescending,
        };

        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("ordering", "-price".to_string()),
                ("category", "3".to_string()),
                ("search", "lamp".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_omit_unset_filters() {
        let query = ProductQuery {
            search: Some(String::new()),
            ..ProductQuery::default()
        };

        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("page", "1".to_string()),
                ("ordering", "-created_at".to_string()),
            ]
        );
    }

    #[test]
    fn test_product_deserializes_backend_shape() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "name": "Desk Lamp",
            "description": "Warm light",
            "price": "24.50",
            "stock_quantity": 12,
            "category": 3,
            "category_name": "Lighting",
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.price, Decimal::new(2450, 2));
        assert_eq!(product.category_name, "Lighting");
        assert!(product.created_at.is_some());
        assert!(product.updated_at.is_none());
    }

    #[test]
    fn test_page_defaults_missing_fields() {
        let page: Page<Product> = serde_json::from_value(json!({})).unwrap();

        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let response: LoginResponse =
            serde_json::from_value(json!({"access": "secret-jwt"})).unwrap();

        assert_eq!(response.access.as_str(), "secret-jwt");
        assert!(!format!("{response:?}").contains("secret-jwt"));
    }

    #[test]
    fn test_registration_password_match() {
        let mut registration = Registration {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "StrongPass123!".to_string(),
            password2: "StrongPass123!".to_string(),
        };
        assert!(registration.passwords_match());

        registration.password2 = "other".to_string();
        assert!(!registration.passwords_match());
    }

    #[test]
    fn test_payload_serializes_price_as_string_without_id() {
        let payload = ProductPayload {
            name: "Laptop".to_string(),
            description: "A new laptop".to_string(),
            price: Decimal::new(99999, 2),
            stock_quantity: 5,
            category: 1,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "Laptop",
                "description": "A new laptop",
                "price": "999.99",
                "stock_quantity": 5,
                "category": 1
            })
        );
    }

    #[test]
    fn test_payload_validation() {
        let valid = ProductPayload {
            name: "Phone".to_string(),
            description: String::new(),
            price: Decimal::ZERO,
            stock_quantity: 0,
            category: 1,
        };
        assert!(valid.clone().validated().is_ok());

        let negative = ProductPayload {
            price: Decimal::new(-1, 0),
            ..valid.clone()
        };
        let error = negative.validated().unwrap_err();
        assert_eq!(error.to_string(), "Invalid price: must not be negative");

        let unnamed = ProductPayload {
            name: String::new(),
            ..valid
        };
        let error = unnamed.validated().unwrap_err();
        assert_eq!(error.to_string(), "Invalid name: must not be empty");
    }
}
