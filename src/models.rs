//! Core Data Models
//!
//! Data flows through these models in sequence: raw view-count text becomes
//! [`ViewRecord`] entries keyed by URL (see [`crate::views::ViewsMap`]), the
//! content API returns [`WpPost`] wire records, and the two are joined into
//! [`FetchedPost`] rows that feed the report renderer.
//!
//! Wire types deserialize only the fields this tool uses; anything else in the
//! API response is ignored.

use serde::{Deserialize, Serialize};

/// View data for one exported URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub title: String,
    pub views: u64,
}

/// One record from `GET {base}/wp-json/wp/v2/{type}`, reduced to the fields
/// used. A record missing any non-optional field fails page decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct WpPost {
    pub id: u64,
    pub title: RenderedText,
    pub date: String,
    pub link: String,
    #[serde(rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderedText {
    pub rendered: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub author: Vec<EmbeddedAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

/// A fetched record joined with its view count. Immutable once constructed.
///
/// `url` is the literal link returned by the API; normalization is applied
/// only while matching view counts, never stored here.
#[derive(Debug, Clone, Serialize)]
pub struct FetchedPost {
    pub id: u64,
    pub title: String,
    #[serde(rename = "publicationDate")]
    pub publication_date: chrono::NaiveDate,
    pub author: String,
    pub url: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_record_ignores_unused_fields() {
        let body = r#"{
            "id": 7,
            "title": {"rendered": "Hello"},
            "date": "2024-12-10T08:00:00",
            "link": "https://x/news/2024/12/10/hello/",
            "status": "publish",
            "guid": {"rendered": "https://x/?p=7"}
        }"#;
        let post: WpPost = serde_json::from_str(body).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.title.rendered, "Hello");
        assert!(post.embedded.is_none());
    }

    #[test]
    fn embedded_author_name_is_optional() {
        let body = r#"{
            "id": 7,
            "title": {"rendered": "Hello"},
            "date": "2024-12-10T08:00:00",
            "link": "https://x/hello",
            "_embedded": {"author": [{"id": 3}]}
        }"#;
        let post: WpPost = serde_json::from_str(body).unwrap();
        let embedded = post.embedded.unwrap();
        assert_eq!(embedded.author.len(), 1);
        assert!(embedded.author[0].name.is_none());
    }

    #[test]
    fn joined_post_serializes_with_camel_case_names() {
        let post = FetchedPost {
            id: 7,
            title: "Hello".to_string(),
            publication_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 10).unwrap(),
            author: "Ada".to_string(),
            url: "https://x/hello".to_string(),
            post_type: "posts".to_string(),
            views: 42,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["publicationDate"], "2024-12-10");
        assert_eq!(json["type"], "posts");
        assert_eq!(json["views"], 42);
    }
}
