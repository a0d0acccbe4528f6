//! Transport layer: the remote article catalog.
//!
//! # Modules
//!
//! - `backend`: [`ArticleApi`] trait and list parameters
//! - `http`: blocking HTTP implementation built on `reqwest`
//! - `models`: wire records, body decoding, failure-message derivation

pub mod backend;
pub mod http;
pub mod models;

pub use backend::{ArticleApi, ListParams};
pub use http::HttpArticleApi;
pub use models::{failure_message, PageRecord};
