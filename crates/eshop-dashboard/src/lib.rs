//! Terminal admin dashboard for the e-shop catalog
//!
//! [`Dashboard`] holds all UI state (session, catalog, modals, banner) and talks to the
//! backend through any [`ShopApi`](eshop_client::ShopApi). [`Screen`] renders it as text and
//! [`Shell`] drives it from an interactive prompt.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod banner;
pub mod catalog;
pub mod dashboard;
pub mod forms;
pub mod session;
pub mod shell;
pub mod view;

pub use banner::Banner;
pub use catalog::Catalog;
pub use dashboard::{AuthModal, Confirm, Dashboard, ProductModal, messages};
pub use forms::{AuthForm, AuthMode, ProductForm};
pub use session::Session;
pub use shell::{BannerSlot, Flow, LineInput, Shell, ShellCommand, ShellLine};
pub use view::{CategoryList, Screen};
