//! Catalog state: the visible page of products and the query that produced it

use eshop_core::{Category, CategoryId, Page, Product, ProductId, ProductQuery, SortKey};

/// Products, categories and the active page/filter/sort parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    query: ProductQuery,
    count: u64,
    total_pages: u32,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            query: ProductQuery::default(),
            count: 0,
            total_pages: 1,
        }
    }
}

impl Catalog {
    /// Products of the last successful fetch
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Known categories
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Parameters of the last successful fetch, i.e. of the list on screen
    #[must_use]
    pub const fn query(&self) -> &ProductQuery {
        &self.query
    }

    /// Current page (1-based)
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.query.page
    }

    /// Total matching products reported by the last successful fetch
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Number of pages, `ceil(count / 10)`
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Look up a product on the current page
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a category's display name
    #[must_use]
    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Whether "previous" is enabled
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.query.page > 1
    }

    /// Whether "next" is enabled
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.query.page < self.total_pages
    }

    /// Whether the pager is shown at all
    #[must_use]
    pub const fn shows_pager(&self) -> bool {
        self.total_pages > 1
    }

    /// Page "previous" leads to, never below 1
    #[must_use]
    pub fn previous_page(&self) -> u32 {
        self.query.page.saturating_sub(1).max(1)
    }

    /// Page "next" leads to, never beyond the last page
    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.query
            .page
            .saturating_add(1)
            .min(self.total_pages.max(1))
    }

    /// Store a successful fetch together with the query that produced it
    pub(crate) fn apply_page(&mut self, query: ProductQuery, page: Page<Product>) {
        self.query = query;
        self.count = page.count;
        self.total_pages = page.total_pages();
        self.products = page.results;
    }

    pub(crate) fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Query with a new search term; `None` when it matches what is shown
    ///
    /// An empty term clears the search.
    pub(crate) fn with_search(&self, term: Option<String>) -> Option<ProductQuery> {
        self.requery(ProductQuery {
            search: term.filter(|t| !t.is_empty()),
            ..self.query.clone()
        })
    }

    pub(crate) fn with_category(&self, category: Option<CategoryId>) -> Option<ProductQuery> {
        self.requery(ProductQuery {
            category,
            ..self.query.clone()
        })
    }

    pub(crate) fn with_sort(&self, sort: SortKey) -> Option<ProductQuery> {
        self.requery(ProductQuery {
            sort,
            ..self.query.clone()
        })
    }

    /// Page 0 is treated as page 1
    pub(crate) fn with_page(&self, page: u32) -> Option<ProductQuery> {
        self.requery(ProductQuery {
            page: page.max(1),
            ..self.query.clone()
        })
    }

    fn requery(&self, query: ProductQuery) -> Option<ProductQuery> {
        (query != self.query).then_some(query)
    }
}
