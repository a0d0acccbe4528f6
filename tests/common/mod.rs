#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use catalog_sync::api::{ArticleApi, ListParams};
use catalog_sync::app::RequestTicket;
use catalog_sync::worker::WorkerMessage;
use catalog_sync::{Action, Article, CatalogError, Cursor, Page, Result, Timestamp};

pub fn article(id: i64, slug: &str) -> Article {
    Article {
        id,
        title: format!("Article {id}"),
        slug: slug.to_string(),
        body: format!("Body of {slug}."),
        published: true,
        published_at: Some(Timestamp::new("2024-05-01T09:30:00Z")),
        author_id: 7,
        created_at: Timestamp::new("2024-05-01T09:00:00Z"),
        updated_at: Timestamp::new("2024-05-02T10:15:00Z"),
    }
}

pub fn page(items: Vec<Article>, cursor: Option<&str>) -> Page {
    Page {
        items,
        next_cursor: cursor.and_then(Cursor::from_token),
    }
}

/// Extracts the single list request from `actions`.
pub fn list_request(actions: &[Action]) -> (RequestTicket, ListParams) {
    match actions {
        [Action::PostToWorker(WorkerMessage::FetchPage { ticket, params, .. })] => {
            (*ticket, params.clone())
        }
        other => panic!("expected one list request, got {other:?}"),
    }
}

/// Extracts the single refresh request from `actions`.
pub fn refresh_slug(actions: &[Action]) -> String {
    match actions {
        [Action::PostToWorker(WorkerMessage::FetchArticle { slug, .. })] => slug.clone(),
        other => panic!("expected one refresh request, got {other:?}"),
    }
}

/// An [`ArticleApi`] that replays queued list results and serves articles by slug.
#[derive(Default)]
pub struct ScriptedApi {
    pages: Mutex<VecDeque<Result<Page>>>,
    articles: Mutex<HashMap<String, Article>>,
    pub seen: Mutex<Vec<ListParams>>,
}

impl ScriptedApi {
    pub fn with_pages(pages: Vec<Result<Page>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub fn serve_article(&self, article: Article) {
        self.articles
            .lock()
            .unwrap()
            .insert(article.slug.clone(), article);
    }
}

impl ArticleApi for ScriptedApi {
    fn list_articles(&self, params: &ListParams) -> Result<Page> {
        self.seen.lock().unwrap().push(params.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CatalogError::Transport("script exhausted".into())))
    }

    fn article_by_slug(&self, slug: &str) -> Result<Article> {
        self.articles
            .lock()
            .unwrap()
            .get(slug)
            .cloned()
            .ok_or_else(|| CatalogError::Status {
                status: 404,
                message: "Article not found".into(),
            })
    }
}

/// Lets a test keep a handle on the backend after moving it into a worker.
pub struct SharedApi(pub std::sync::Arc<ScriptedApi>);

impl ArticleApi for SharedApi {
    fn list_articles(&self, params: &ListParams) -> Result<Page> {
        self.0.list_articles(params)
    }

    fn article_by_slug(&self, slug: &str) -> Result<Article> {
        self.0.article_by_slug(slug)
    }
}
