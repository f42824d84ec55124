use serde_json::{json, Value};

/// Build one API record with the fields the fetcher consumes.
pub fn post_json(id: u64, title: &str, date: &str, link: &str, author: Option<&str>) -> Value {
    let mut post = json!({
        "id": id,
        "title": {"rendered": title},
        "date": date,
        "link": link,
    });
    if let Some(name) = author {
        post["_embedded"] = json!({"author": [{"name": name}]});
    }
    post
}

/// Serialize records into a one-page response body.
pub fn page_body(posts: &[Value]) -> String {
    Value::Array(posts.to_vec()).to_string()
}
