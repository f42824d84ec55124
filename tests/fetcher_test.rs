use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use devblog_views::error::ViewsError;
use devblog_views::fetcher::{fetch_posts, PageQuery, PageSource};
use devblog_views::views::{ingest_views, ViewsMap};

mod common;
use common::{page_body, post_json};

/// Canned per-collection-type responses; records every request it receives.
struct StubSource {
    pages: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_page(mut self, post_type: &str, body: String) -> Self {
        self.pages.insert(post_type.to_string(), Ok(body));
        self
    }

    fn with_failure(mut self, post_type: &str, message: &str) -> Self {
        self.pages
            .insert(post_type.to_string(), Err(message.to_string()));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn fetch_page(&self, post_type: &str, _query: &PageQuery) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(post_type.to_string());
        match self.pages.get(post_type) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(anyhow::anyhow!("{message}")),
            None => Ok("[]".to_string()),
        }
    }
}

fn unbounded() -> PageQuery {
    PageQuery {
        page: 1,
        per_page: 100,
        after: None,
    }
}

fn types(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn joins_view_count_across_date_granularity() {
    let (views, _) = ingest_views("Post Title,42,https://x/news/2024/12/post");
    let source = StubSource::new().with_page(
        "posts",
        page_body(&[post_json(
            7,
            "Post Title",
            "2024-12-10T08:00:00",
            "https://x/news/2024/12/10/post/",
            Some("Ada"),
        )]),
    );

    let posts = fetch_posts(&source, &types(&["posts"]), &unbounded(), &views)
        .await
        .unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].views, 42);
    // The record keeps the literal API link, not the normalized form.
    assert_eq!(posts[0].url, "https://x/news/2024/12/10/post/");
    assert_eq!(posts[0].author, "Ada");
    assert_eq!(posts[0].post_type, "posts");
}

#[tokio::test]
async fn unmatched_post_defaults_to_zero_views() {
    let (views, _) = ingest_views("Other Post,9000,https://x/news/2024/11/other");
    let source = StubSource::new().with_page(
        "posts",
        page_body(&[post_json(
            8,
            "Lonely",
            "2024-12-01T00:00:00Z",
            "https://x/news/2024/12/01/lonely/",
            None,
        )]),
    );

    let posts = fetch_posts(&source, &types(&["posts"]), &unbounded(), &views)
        .await
        .unwrap();

    assert_eq!(posts[0].views, 0);
}

#[tokio::test]
async fn failed_collection_type_skips_but_run_continues() {
    let source = StubSource::new()
        .with_failure("snippets", "connection refused")
        .with_page(
            "posts",
            page_body(&[post_json(
                1,
                "Survivor",
                "2024-12-10T08:00:00",
                "https://x/news/2024/12/10/survivor/",
                Some("Ada"),
            )]),
        );

    let posts = fetch_posts(
        &source,
        &types(&["snippets", "posts"]),
        &unbounded(),
        &ViewsMap::new(),
    )
    .await
    .unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Survivor");
    // The failing collection type was still attempted.
    assert_eq!(source.calls(), vec!["snippets", "posts"]);
}

#[tokio::test]
async fn fetches_exactly_one_page_per_collection_type() {
    // Single-page fetching is the documented behavior: no pagination loop,
    // even when a full page suggests more records exist upstream.
    let source = StubSource::new();
    let post_types = types(&["snippets", "dev-blog-videos", "posts"]);

    fetch_posts(&source, &post_types, &unbounded(), &ViewsMap::new())
        .await
        .unwrap();

    assert_eq!(source.calls(), post_types);
}

#[tokio::test]
async fn missing_embed_defaults_author_to_unknown() {
    let source = StubSource::new().with_page(
        "posts",
        page_body(&[post_json(
            2,
            "No Embed",
            "2024-12-10T08:00:00",
            "https://x/news/2024/12/10/no-embed/",
            None,
        )]),
    );

    let posts = fetch_posts(&source, &types(&["posts"]), &unbounded(), &ViewsMap::new())
        .await
        .unwrap();

    assert_eq!(posts[0].author, "Unknown");
}

#[tokio::test]
async fn empty_author_list_defaults_to_unknown() {
    let mut post = post_json(
        3,
        "Empty Authors",
        "2024-12-10T08:00:00",
        "https://x/news/2024/12/10/empty-authors/",
        None,
    );
    post["_embedded"] = serde_json::json!({"author": []});
    let source = StubSource::new().with_page("posts", page_body(&[post]));

    let posts = fetch_posts(&source, &types(&["posts"]), &unbounded(), &ViewsMap::new())
        .await
        .unwrap();

    assert_eq!(posts[0].author, "Unknown");
}

#[tokio::test]
async fn malformed_page_fails_the_run() {
    // Record is missing the required `link` field.
    let body = r#"[{"id": 1, "title": {"rendered": "Broken"}, "date": "2024-12-10T08:00:00"}]"#;
    let source = StubSource::new().with_page("posts", body.to_string());

    let err = fetch_posts(&source, &types(&["posts"]), &unbounded(), &ViewsMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ViewsError::MalformedRecord { .. }));
    assert!(err.to_string().contains("posts"));
}

#[tokio::test]
async fn unparseable_timestamp_fails_the_run() {
    let source = StubSource::new().with_page(
        "posts",
        page_body(&[post_json(
            4,
            "Bad Date",
            "sometime last week",
            "https://x/news/bad-date/",
            None,
        )]),
    );

    let err = fetch_posts(&source, &types(&["posts"]), &unbounded(), &ViewsMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ViewsError::TimestampParse(_)));
}

#[tokio::test]
async fn author_comes_from_first_embedded_entry() {
    let mut post = post_json(
        5,
        "Two Authors",
        "2024-12-10T08:00:00",
        "https://x/news/2024/12/10/two-authors/",
        None,
    );
    post["_embedded"] = serde_json::json!({"author": [{"name": "First"}, {"name": "Second"}]});
    let source = StubSource::new().with_page("posts", page_body(&[post]));

    let posts = fetch_posts(&source, &types(&["posts"]), &unbounded(), &ViewsMap::new())
        .await
        .unwrap();

    assert_eq!(posts[0].author, "First");
}
