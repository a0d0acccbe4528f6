//! Article domain model and the page type returned by the catalog API.
//!
//! Articles are immutable from the client's point of view: the only way an
//! article changes is by being replaced with a freshly fetched copy of the same
//! `id`/`slug`. Timestamps and cursors are kept as the exact strings the server
//! sent, so a replaced entry compares equal to what the server returned and
//! cursors are never interpreted client-side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric article identity.
pub type ArticleId = i64;

/// Server-issued timestamp, stored verbatim.
///
/// Parsing is only attempted for display purposes via [`Timestamp::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the timestamp as RFC 3339, returning `None` if the server used
    /// another format.
    #[must_use]
    pub fn parse(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc3339(&self.0).ok()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque pagination token. The client only stores it and sends it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps a server token. Empty tokens are not cursors.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single catalog article.
///
/// # Fields
///
/// - `id`: stable unique identity, used for selection reconciliation
/// - `slug`: unique external key, used for direct lookup and refresh replacement
/// - `published_at`: present only when `published` is true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Timestamp>,
    pub author_id: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Article {
    /// Returns `true` if the article is an unpublished draft.
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        !self.published
    }
}

/// One page of articles in server order.
///
/// `next_cursor` is the single source of truth for whether more pages exist;
/// the wire-level `has_more` flag is reconciled away in
/// [`crate::api::models::PageRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Article>,
    pub next_cursor: Option<Cursor>,
}

impl Page {
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Normalizes raw search input: trims whitespace, and an empty result means
/// "no filter".
///
/// ```
/// use catalog_sync::domain::normalize_query;
///
/// assert_eq!(normalize_query(Some("  rust  ")), Some("rust".to_string()));
/// assert_eq!(normalize_query(Some("   ")), None);
/// assert_eq!(normalize_query(None), None);
/// ```
#[must_use]
pub fn normalize_query(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|q| !q.is_empty())
        .map(String::from)
}

#[cfg(test)]
pub(crate) fn sample(id: ArticleId, slug: &str) -> Article {
    Article {
        id,
        title: format!("Article {id}"),
        slug: slug.to_string(),
        body: format!("Body of {slug}"),
        published: true,
        published_at: Some(Timestamp::new("2024-05-01T09:30:00Z")),
        author_id: 1,
        created_at: Timestamp::new("2024-05-01T09:00:00Z"),
        updated_at: Timestamp::new("2024-05-02T10:15:00Z"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_decodes_from_api_shape() {
        let json = r#"{
            "id": 7,
            "title": "Hello",
            "slug": "hello",
            "body": "text",
            "published": false,
            "published_at": null,
            "author_id": 3,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 7);
        assert!(article.is_draft());
        assert!(article.published_at.is_none());
        assert_eq!(article.updated_at.as_str(), "2024-01-02T00:00:00Z");
    }

    #[test]
    fn timestamp_keeps_unparsable_text() {
        let ts = Timestamp::new("2024-01-01 00:00:00");
        assert!(ts.parse().is_none());
        assert_eq!(ts.to_string(), "2024-01-01 00:00:00");
        assert!(Timestamp::new("2024-01-01T00:00:00+09:00").parse().is_some());
    }

    #[test]
    fn empty_cursor_token_is_absent() {
        assert!(Cursor::from_token("").is_none());
        assert_eq!(Cursor::from_token("c1").unwrap().as_str(), "c1");
    }

    #[test]
    fn whitespace_queries_normalize_to_no_filter() {
        assert_eq!(normalize_query(Some("")), None);
        assert_eq!(normalize_query(Some(" \t\n")), None);
        assert_eq!(normalize_query(Some(" foo bar ")), Some("foo bar".into()));
    }
}
