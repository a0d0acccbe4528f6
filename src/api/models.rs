//! Wire-level records and response decoding rules.
//!
//! These types and helpers sit between raw HTTP bodies and the domain types.
//! They own the two pieces of protocol knowledge the rest of the crate should
//! not care about: how a failure message is derived from an error response, and
//! how a page's redundant `has_more` flag is reconciled with its cursor.

use crate::domain::error::Result;
use crate::domain::{Article, Cursor, Page};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Message used when no other failure text is available.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Request failed";

/// A list page exactly as the server sends it.
///
/// Every field is defaulted so that an empty successful body (`{}`) decodes to
/// an empty, final page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub items: Vec<Article>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl PageRecord {
    /// Converts the record into a domain [`Page`].
    ///
    /// Cursor presence wins over `has_more`. A disagreement between the two is
    /// logged as a warning for the API owner and otherwise ignored.
    #[must_use]
    pub fn into_page(self) -> Page {
        let next_cursor = self.next_cursor.and_then(Cursor::from_token);
        if next_cursor.is_some() != self.has_more {
            tracing::warn!(
                has_more = self.has_more,
                has_cursor = next_cursor.is_some(),
                "page has_more disagrees with next_cursor, trusting next_cursor"
            );
        }
        Page {
            items: self.items,
            next_cursor,
        }
    }
}

/// Decodes a successful response body. An empty body is treated as `{}`.
///
/// # Errors
///
/// Returns [`CatalogError::Decode`](crate::domain::CatalogError::Decode) when the
/// body is not valid JSON for `T`.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    Ok(serde_json::from_str(body)?)
}

/// Derives the user-facing message for a non-2xx response.
///
/// Resolution order:
/// 1. `"{status} {reason}"`, trimmed
/// 2. if the body is non-empty and is a JSON object: its `message`, then its `error`
/// 3. if the body is non-empty and not JSON: the raw body text
/// 4. if the result is still empty: [`FALLBACK_FAILURE_MESSAGE`]
///
/// ```
/// use catalog_sync::api::models::failure_message;
///
/// assert_eq!(failure_message(404, "Not Found", r#"{"message":"no such article"}"#), "no such article");
/// assert_eq!(failure_message(502, "Bad Gateway", "upstream down"), "upstream down");
/// assert_eq!(failure_message(500, "Internal Server Error", ""), "500 Internal Server Error");
/// ```
#[must_use]
pub fn failure_message(status: u16, reason: &str, body: &str) -> String {
    let status_line = format!("{status} {reason}").trim().to_string();

    let message = if body.is_empty() {
        status_line
    } else {
        match serde_json::from_str::<JsonValue>(body) {
            Ok(JsonValue::Object(fields)) => message_field(&fields, "message")
                .or_else(|| message_field(&fields, "error"))
                .unwrap_or(status_line),
            Ok(JsonValue::Null) | Err(_) => body.to_string(),
            Ok(_) => status_line,
        }
    };

    if message.is_empty() {
        FALLBACK_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

fn message_field(fields: &serde_json::Map<String, JsonValue>, key: &str) -> Option<String> {
    match fields.get(key)? {
        JsonValue::Null => None,
        JsonValue::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
