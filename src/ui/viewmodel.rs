//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready text.

/// Complete view model for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogViewModel {
    /// Connection and query information.
    pub header: HeaderInfo,

    /// `"Loading..."`, `"No articles found."` or `"{n} articles"`.
    pub count_label: String,

    /// One row per loaded article, in list order.
    pub rows: Vec<ArticleRow>,

    /// Last list failure, if any.
    pub list_error: Option<Notice>,

    /// State of the "load more" affordance.
    pub load_more: LoadMoreHint,

    /// Detail pane for the selected article.
    pub detail: DetailView,
}

/// Header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub api_base_url: String,
    pub query: Option<String>,
}

/// Display information for a single list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    /// 1-based position, used by `select <n>`.
    pub number: usize,
    pub title: String,
    pub is_draft: bool,
    pub updated_at: String,
    pub excerpt: String,
    pub is_selected: bool,
}

/// An error message shown inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn error(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// What the list footer offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreHint {
    /// A cursor is present and no page is loading.
    Available,
    /// The next page is being fetched.
    Loading,
    /// No cursor: every page has been loaded.
    AllShown,
}

impl LoadMoreHint {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "More articles available.",
            Self::Loading => "Loading...",
            Self::AllShown => "All articles shown.",
        }
    }
}

/// Detail pane contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// Nothing selected.
    Placeholder {
        /// Whether the first page is still loading.
        loading: bool,
    },
    /// The selected article.
    Article {
        title: String,
        slug: String,
        created_at: String,
        updated_at: String,
        status: String,
        paragraphs: Vec<String>,
        error: Option<Notice>,
    },
}
