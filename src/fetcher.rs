//! Record fetching and view-count correlation.
//!
//! Each configured collection type maps to a distinct API path segment under
//! `{base}/wp-json/wp/v2/`. Exactly one page is requested per collection type
//! per run; a failed request skips its collection type while the rest of the
//! run continues.

use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::date_input::parse_post_timestamp;
use crate::error::{Result, ViewsError};
use crate::models::{FetchedPost, WpPost};
use crate::url_norm::normalize_url;
use crate::views::ViewsMap;

/// Query parameters shared by every page request.
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
    /// Lower bound on publication date, passed upstream as the `after`
    /// filter; `None` means unbounded.
    pub after: Option<NaiveDate>,
}

/// Transport for one page of records. The HTTP implementation is the
/// production path; tests substitute canned bodies or failures.
#[async_trait]
pub trait PageSource {
    async fn fetch_page(&self, post_type: &str, query: &PageQuery) -> AnyResult<String>;
}

/// `reqwest`-backed [`PageSource`] against a WordPress-style REST API.
pub struct HttpPageSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, post_type: &str, query: &PageQuery) -> AnyResult<String> {
        let url = format!("{}/wp-json/wp/v2/{}", self.base_url, post_type);

        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
            ("_embed", "true".to_string()),
        ];
        if let Some(after) = query.after {
            // Midnight at the cutoff, serialized as an ISO-8601 instant.
            params.push(("after", format!("{}T00:00:00", after.format("%Y-%m-%d"))));
        }

        debug!(url = %url, "requesting page");
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("requesting {url}"))?;

        response.text().await.context("reading response body")
    }
}

/// Fetch one page of records for every collection type and join each record
/// to its view count.
///
/// A failed request skips its collection type. A page body that does not
/// decode into the expected record shape fails the whole run. Result order
/// follows the API within each collection type; the report applies its own
/// sort.
pub async fn fetch_posts(
    source: &dyn PageSource,
    post_types: &[String],
    query: &PageQuery,
    views: &ViewsMap,
) -> Result<Vec<FetchedPost>> {
    let mut all_posts = Vec::new();

    for post_type in post_types {
        // One request per collection type; no pagination loop.
        let body = match source.fetch_page(post_type, query).await {
            Ok(body) => body,
            Err(err) => {
                warn!(
                    post_type = %post_type,
                    error = %format!("{err:#}"),
                    "fetch failed, skipping collection type"
                );
                continue;
            }
        };

        let page: Vec<WpPost> =
            serde_json::from_str(&body).map_err(|source| ViewsError::MalformedRecord {
                post_type: post_type.clone(),
                source,
            })?;

        debug!(post_type = %post_type, records = page.len(), "decoded page");
        for post in page {
            all_posts.push(join_post(post, post_type, views)?);
        }
    }

    info!(posts = all_posts.len(), "fetched records across collection types");
    Ok(all_posts)
}

fn join_post(post: WpPost, post_type: &str, views: &ViewsMap) -> Result<FetchedPost> {
    let publication_date = parse_post_timestamp(&post.date)?;

    let author = post
        .embedded
        .and_then(|embedded| embedded.author.into_iter().next())
        .and_then(|author| author.name)
        .unwrap_or_else(|| "Unknown".to_string());

    let normalized = normalize_url(&post.link);
    let views = views
        .match_normalized(&normalized)
        .map(|record| record.views)
        .unwrap_or(0);

    Ok(FetchedPost {
        id: post.id,
        title: post.title.rendered,
        publication_date,
        author,
        url: post.link,
        post_type: post_type.to_string(),
        views,
    })
}
