//! Typed REST client for the e-shop catalog and auth API

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api;
pub mod client;
pub mod error;
mod http;

pub use api::ShopApi;
pub use client::ApiClient;
pub use error::{ClientError, Result, flatten_field_errors};
