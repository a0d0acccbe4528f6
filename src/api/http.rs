//! Blocking HTTP implementation of [`ArticleApi`].
//!
//! Requests are plain `GET`s with `Accept: application/json`, a cookie store so
//! that session cookies are sent along, and a per-request timeout. Every failure
//! is mapped to a transport-class [`CatalogError`].

use std::time::Duration;

use hyper::ext::ReasonPhrase;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::api::backend::{ArticleApi, ListParams};
use crate::api::models::{decode_body, failure_message, PageRecord};
use crate::domain::error::{CatalogError, Result};
use crate::domain::{Article, Page};
use crate::Config;

/// Path segments of the article collection below the base URL.
const ARTICLES_PATH: [&str; 3] = ["api", "v1", "articles"];

/// HTTP client for the article catalog.
#[derive(Debug, Clone)]
pub struct HttpArticleApi {
    client: Client,
    base: Url,
}

impl HttpArticleApi {
    /// Builds a client for `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the base URL cannot be parsed or cannot
    /// carry a path, and [`CatalogError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.api_base_url).map_err(|e| {
            CatalogError::Config(format!("invalid api_base_url {:?}: {e}", config.api_base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "api_base_url {:?} cannot carry a path",
                config.api_base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_store(true)
            .user_agent(concat!("catalog-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(base_url = %base, "http article api ready");

        Ok(Self { client, base })
    }

    /// URL of the list endpoint for `params`.
    #[must_use]
    pub fn list_url(&self, params: &ListParams) -> Url {
        let mut url = self.endpoint(&[]);
        let pairs = params.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    /// URL of the single-article endpoint; `slug` becomes one percent-encoded
    /// path segment.
    #[must_use]
    pub fn article_url(&self, slug: &str) -> Url {
        self.endpoint(&["by-slug", slug])
    }

    fn endpoint(&self, extra: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(ARTICLES_PATH)
                .extend(extra);
        }
        url
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let _span = tracing::debug_span!("http_get", url = %url).entered();

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        let reason = reason_phrase(&response);
        let body = response.text()?;

        if !status.is_success() {
            let message = failure_message(status.as_u16(), &reason, &body);
            tracing::debug!(status = status.as_u16(), message = %message, "request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "request succeeded");
        decode_body(&body)
    }
}

/// The reason phrase the server sent. hyper records it only when it differs
/// from the canonical phrase for the status.
fn reason_phrase(response: &Response) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or_default()
        .to_string()
}

impl ArticleApi for HttpArticleApi {
    fn list_articles(&self, params: &ListParams) -> Result<Page> {
        let record: PageRecord = self.get_json(self.list_url(params))?;
        Ok(record.into_page())
    }

    fn article_by_slug(&self, slug: &str) -> Result<Article> {
        self.get_json(self.article_url(slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cursor;

    fn api(base: &str) -> HttpArticleApi {
        let config = Config {
            api_base_url: base.to_string(),
            ..Config::default()
        };
        HttpArticleApi::new(&config).unwrap()
    }

    #[test]
    fn list_url_without_parameters_has_no_query() {
        let url = api("http://localhost:8080").list_url(&ListParams::default());
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/articles");
    }

    #[test]
    fn list_url_encodes_present_parameters() {
        let params = ListParams {
            query: Some("rust & wasm".into()),
            cursor: Cursor::from_token("abc=="),
            include_drafts: true,
        };
        let url = api("http://localhost:8080").list_url(&params);
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/articles?cursor=abc%3D%3D&q=rust+%26+wasm&include_drafts=true"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let url = api("https://cms.example.com/backend").list_url(&ListParams::default());
        assert_eq!(url.as_str(), "https://cms.example.com/backend/api/v1/articles");
    }

    #[test]
    fn slug_is_percent_encoded_as_one_segment() {
        let url = api("http://localhost:8080").article_url("a/b c?");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/articles/by-slug/a%2Fb%20c%3F"
        );
    }

    #[test]
    fn unusable_base_url_is_a_config_error() {
        for base in ["not a url", "mailto:someone@example.com"] {
            let config = Config {
                api_base_url: base.to_string(),
                ..Config::default()
            };
            let err = HttpArticleApi::new(&config).unwrap_err();
            assert!(matches!(err, CatalogError::Config(_)), "{base}: {err}");
        }
    }
}
