//! Plain-text rendering of the dashboard

use crate::dashboard::Dashboard;
use eshop_client::ShopApi;
use eshop_core::Product;
use std::fmt::{self, Display, Formatter};

/// Everything the user sees after a command: header, banner, filters, products, pager
#[derive(Debug)]
pub struct Screen<'a, A> {
    dashboard: &'a Dashboard<A>,
}

impl<'a, A: ShopApi> Screen<'a, A> {
    /// Render `dashboard`
    #[must_use]
    pub const fn new(dashboard: &'a Dashboard<A>) -> Self {
        Self { dashboard }
    }

    fn header(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "== E-Shop Dashboard ==")?;
        match self.dashboard.session().username() {
            Some(username) => writeln!(f, "  Welcome, {username}!"),
            None => writeln!(f, "  (not logged in)"),
        }
    }

    fn banner(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let banner = self.dashboard.banner();
        if let Some(error) = banner.error() {
            writeln!(f, "[error] {error}")?;
        }
        if let Some(success) = banner.success() {
            writeln!(f, "[ok] {success}")?;
        }
        Ok(())
    }

    fn filters(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let catalog = self.dashboard.catalog();
        let query = catalog.query();

        let search = query.search.as_deref().unwrap_or("-");
        let category = match query.category {
            Some(id) => catalog
                .category_name(id)
                .map_or_else(|| format!("#{id}"), str::to_string),
            None => "All Categories".to_string(),
        };

        writeln!(
            f,
            "Search: {search} | Category: {category} | Sort: {}",
            query.sort.label()
        )
    }

    fn products(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let products = self.dashboard.catalog().products();
        if products.is_empty() {
            writeln!(f, "No products found.")?;
            if self.dashboard.session().is_authenticated() {
                writeln!(f, "Use `add` to create the first one.")?;
            }
            return Ok(());
        }

        for product in products {
            writeln!(f, "{}", ProductLine(product))?;
        }
        Ok(())
    }

    fn pager(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let catalog = self.dashboard.catalog();
        if !catalog.shows_pager() {
            return Ok(());
        }

        let previous = if catalog.has_previous() { "< prev  " } else { "        " };
        let next = if catalog.has_next() { "  next >" } else { "" };
        writeln!(
            f,
            "{previous}Page {} of {}{next}",
            catalog.page(),
            catalog.total_pages()
        )
    }
}

impl<A: ShopApi> Display for Screen<'_, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.header(f)?;
        self.banner(f)?;
        self.filters(f)?;
        writeln!(f)?;
        self.products(f)?;
        self.pager(f)
    }
}

/// One product card on a single line
struct ProductLine<'a>(&'a Product);

impl Display for ProductLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let p = self.0;
        write!(
            f,
            "#{} {} [{}] ${} Stock: {}",
            p.id, p.name, p.category_name, p.price, p.stock_quantity
        )?;
        if !p.description.is_empty() {
            write!(f, "\n    {}", p.description)?;
        }
        Ok(())
    }
}

/// The category list, one `id name` pair per line
#[derive(Debug)]
pub struct CategoryList<'a, A> {
    dashboard: &'a Dashboard<A>,
}

impl<'a, A: ShopApi> CategoryList<'a, A> {
    /// Render the categories known to `dashboard`
    #[must_use]
    pub const fn new(dashboard: &'a Dashboard<A>) -> Self {
        Self { dashboard }
    }
}

impl<A: ShopApi> Display for CategoryList<'_, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let categories = self.dashboard.catalog().categories();
        if categories.is_empty() {
            return writeln!(f, "No categories.");
        }
        for category in categories {
            writeln!(f, "{:>4}  {}", category.id, category.name)?;
        }
        Ok(())
    }
}
