//! In-memory shop backend shared by the dashboard integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use async_trait::async_trait;
use eshop_client::{ClientError, Result, ShopApi};
use eshop_core::{
    AccessToken, Category, CategoryId, Credentials, Decimal, LoginResponse, PAGE_SIZE, Page,
    Product, ProductId, ProductPayload, ProductQuery, Registration, SortKey,
};
use parking_lot::Mutex;

/// Username accepted by [`FakeShop::login`]
pub const USERNAME: &str = "tester";
/// Password accepted by [`FakeShop::login`]
pub const PASSWORD: &str = "testpass";
/// Token issued on a successful login
pub const TOKEN: &str = "token-tester";

/// One backend call, in the order it was received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListCategories,
    ListProducts(ProductQuery),
    Login(String),
    Register(String),
    Create(String),
    Update(ProductId),
    Delete(ProductId),
}

#[derive(Debug, Default)]
struct State {
    products: Vec<Product>,
    categories: Vec<Category>,
    users: Vec<String>,
    next_id: ProductId,
    calls: Vec<Call>,
    fail_products: bool,
    fail_categories: bool,
    fail_mutations: bool,
}

/// Backend that filters, sorts and paginates like the real one
#[derive(Debug, Default)]
pub struct FakeShop {
    state: Mutex<State>,
}

impl FakeShop {
    /// Three categories and `count` products spread across them
    pub fn seeded(count: usize) -> Self {
        let categories = vec![
            category(1, "Electronics"),
            category(2, "Books"),
            category(3, "Lighting"),
        ];
        let products = (1..=count)
            .map(|i| {
                let id = ProductId::try_from(i).unwrap();
                let category_id = id % 3 + 1;
                let name = &categories
                    .iter()
                    .find(|c| c.id == category_id)
                    .unwrap()
                    .name;
                product(id, &format!("Product {id:02}"), category_id, name)
            })
            .collect();

        Self::with_catalog(categories, products)
    }

    /// Start from explicit data
    pub fn with_catalog(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(State {
                products,
                categories,
                users: vec![USERNAME.to_string()],
                next_id,
                ..State::default()
            }),
        }
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Number of product listing requests received
    pub fn product_fetches(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::ListProducts(_)))
            .count()
    }

    /// Whether any mutating request reached the backend
    pub fn saw_mutation(&self) -> bool {
        self.state
            .lock()
            .calls
            .iter()
            .any(|c| matches!(c, Call::Create(_) | Call::Update(_) | Call::Delete(_)))
    }

    /// Number of stored products
    pub fn product_count(&self) -> usize {
        self.state.lock().products.len()
    }

    /// Stored product by id
    pub fn stored(&self, id: ProductId) -> Option<Product> {
        self.state.lock().products.iter().find(|p| p.id == id).cloned()
    }

    /// Make product listing fail with a 500
    pub fn fail_products(&self, fail: bool) {
        self.state.lock().fail_products = fail;
    }

    /// Make category listing fail with a 500
    pub fn fail_categories(&self, fail: bool) {
        self.state.lock().fail_categories = fail;
    }

    /// Make create, update and delete fail with a 500
    pub fn fail_mutations(&self, fail: bool) {
        self.state.lock().fail_mutations = fail;
    }
}

pub fn category(id: CategoryId, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

pub fn product(id: ProductId, name: &str, category: CategoryId, category_name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: format!("Description of {name}"),
        price: Decimal::from(id),
        stock_quantity: u32::try_from(id).unwrap_or(0),
        category,
        category_name: category_name.to_string(),
        created_at: None,
        updated_at: None,
    }
}

fn status(status: u16, body: &str) -> ClientError {
    ClientError::Status {
        status,
        body: body.to_string(),
    }
}

fn check_token(state: &State, token: &AccessToken) -> Result<()> {
    if token.as_str() != TOKEN {
        return Err(status(401, r#"{"detail":"Authentication credentials were not provided."}"#));
    }
    if state.fail_mutations {
        return Err(status(500, "Internal Server Error"));
    }
    Ok(())
}

fn sort(products: &mut [Product], key: SortKey) {
    // Ids grow with creation time.
    match key {
        SortKey::NewestFirst => products.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::OldestFirst => products.sort_by_key(|p| p.id),
        SortKey::PriceAscending => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDescending => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::NameAscending => products.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NameDescending => products.sort_by(|a, b| b.name.cmp(&a.name)),
    }
}

#[async_trait]
impl ShopApi for FakeShop {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut state = self.state.lock();
        state.calls.push(Call::ListCategories);
        if state.fail_categories {
            return Err(status(500, "Internal Server Error"));
        }
        Ok(state.categories.clone())
    }

    async fn list_products(&self, query: &ProductQuery) -> Result<Page<Product>> {
        let mut state = self.state.lock();
        state.calls.push(Call::ListProducts(query.clone()));
        if state.fail_products {
            return Err(status(500, "Internal Server Error"));
        }

        let search = query.search.as_deref().map(str::to_lowercase);
        let mut matching: Vec<Product> = state
            .products
            .iter()
            .filter(|p| query.category.is_none_or(|c| p.category == c))
            .filter(|p| {
                search.as_deref().is_none_or(|term| {
                    p.name.to_lowercase().contains(term)
                        || p.description.to_lowercase().contains(term)
                })
            })
            .cloned()
            .collect();
        sort(&mut matching, query.sort);

        let count = u64::try_from(matching.len()).unwrap();
        let page_size = usize::try_from(PAGE_SIZE).unwrap();
        let start = usize::try_from(query.page.saturating_sub(1)).unwrap() * page_size;
        if query.page > 1 && start >= matching.len() {
            return Err(status(404, r#"{"detail":"Invalid page."}"#));
        }

        Ok(Page {
            count,
            next: None,
            previous: None,
            results: matching.into_iter().skip(start).take(page_size).collect(),
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let mut state = self.state.lock();
        state.calls.push(Call::Login(credentials.username.clone()));
        if credentials.username == USERNAME && credentials.password == PASSWORD {
            Ok(LoginResponse {
                access: AccessToken::new(TOKEN),
            })
        } else {
            Err(status(
                401,
                r#"{"detail":"No active account found with the given credentials"}"#,
            ))
        }
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(Call::Register(registration.username.clone()));

        let mut fields = Vec::new();
        if state.users.contains(&registration.username) {
            fields.push(r#""username":["A user with that username already exists."]"#);
        }
        if registration.email.is_empty() {
            fields.push(r#""email":["This field may not be blank."]"#);
        }
        if !fields.is_empty() {
            return Err(status(400, &format!("{{{}}}", fields.join(","))));
        }

        state.users.push(registration.username.clone());
        Ok(())
    }

    async fn create_product(&self, token: &AccessToken, payload: &ProductPayload) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(Call::Create(payload.name.clone()));
        check_token(&state, token)?;

        let id = state.next_id;
        state.next_id += 1;
        let category_name = state
            .categories
            .iter()
            .find(|c| c.id == payload.category)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        state.products.push(Product {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            price: payload.price,
            stock_quantity: payload.stock_quantity,
            category: payload.category,
            category_name,
            created_at: None,
            updated_at: None,
        });
        Ok(())
    }

    async fn update_product(
        &self,
        token: &AccessToken,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(Call::Update(id));
        check_token(&state, token)?;

        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| status(404, r#"{"detail":"Not found."}"#))?;
        product.name.clone_from(&payload.name);
        product.description.clone_from(&payload.description);
        product.price = payload.price;
        product.stock_quantity = payload.stock_quantity;
        product.category = payload.category;
        Ok(())
    }

    async fn delete_product(&self, token: &AccessToken, id: ProductId) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(Call::Delete(id));
        check_token(&state, token)?;

        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(status(404, r#"{"detail":"Not found."}"#));
        }
        Ok(())
    }
}
