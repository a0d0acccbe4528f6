//! Domain layer for the catalog client.
//!
//! Core types shared by every other layer, independent of HTTP or threading
//! concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`article`]: `Article`, `Page`, `Cursor` and query normalization

pub mod article;
pub mod error;

pub use article::{normalize_query, Article, ArticleId, Cursor, Page, Timestamp};
pub use error::{CatalogError, Result};
