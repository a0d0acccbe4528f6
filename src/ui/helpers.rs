//! Text formatting helpers for the view model.

use crate::domain::{Article, Timestamp};

/// Maximum excerpt length in characters.
const EXCERPT_CHARS: usize = 140;

/// Formats a timestamp as `YYYY-MM-DD HH:MM` in its own offset, or returns the
/// raw text if it is not RFC 3339.
#[must_use]
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.parse().map_or_else(
        || timestamp.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Collapses whitespace and cuts the body to a short excerpt.
#[must_use]
pub fn excerpt(body: &str) -> String {
    let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return "No body yet.".to_string();
    }
    if normalized.chars().count() > EXCERPT_CHARS {
        let cut: String = normalized.chars().take(EXCERPT_CHARS).collect();
        format!("{cut}…")
    } else {
        normalized
    }
}

/// `"Loading..."` while the first page loads, then an article count.
#[must_use]
pub fn count_label(loading: bool, count: usize) -> String {
    if loading {
        "Loading...".to_string()
    } else if count == 0 {
        "No articles found.".to_string()
    } else {
        format!("{count} articles")
    }
}

/// Publication state line for the detail pane.
#[must_use]
pub fn publication_status(article: &Article) -> String {
    if !article.published {
        return "Draft".to_string();
    }
    let when = article
        .published_at
        .as_ref()
        .map_or_else(|| "date unknown".to_string(), format_timestamp);
    format!("Published ({when})")
}

/// Splits a body into paragraphs at runs of two or more newlines.
#[must_use]
pub fn paragraphs(body: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut newlines = 0usize;

    for ch in body.chars() {
        if ch == '\n' {
            newlines += 1;
            continue;
        }
        if newlines >= 2 {
            blocks.push(std::mem::take(&mut current));
        } else if newlines == 1 {
            current.push('\n');
        }
        newlines = 0;
        current.push(ch);
    }
    blocks.push(current);

    blocks.retain(|block| !block.is_empty());
    blocks
}
