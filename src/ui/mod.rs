//! Presentation layer: plain-text view of the application state.
//!
//! ```text
//! AppState → compute_viewmodel → CatalogViewModel → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types
//! - [`helpers`]: Date, excerpt and label formatting
//! - [`renderer`]: Writes a view model to any `io::Write`

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{ArticleRow, CatalogViewModel, DetailView, HeaderInfo, LoadMoreHint, Notice};
