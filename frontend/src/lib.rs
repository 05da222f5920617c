//! Ahorrista: a browser client for the Ahorrista expense-tracking API.
//!
//! Everything outside [`ui`] and [`browser`] is plain Rust and runs (and is
//! tested) on any target. The yew components and the `gloo-net` /
//! `localStorage` adapters only exist on `wasm32`.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod session;
pub mod summary;
pub mod validate;
pub mod views;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use api::ApiClient;
pub use config::Config;
pub use error::{AppError, RequestError, ValidationError};
pub use session::{Credentials, Session, SessionController, SessionStore};
