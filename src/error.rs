use thiserror::Error;

/// All errors produced by the report pipeline.
#[derive(Error, Debug)]
pub enum ViewsError {
    /// A cutoff string did not match any accepted date format.
    #[error("Unable to parse date: {0}. Use formats like YYYY-MM-DD or MM/DD/YYYY")]
    InvalidDateFormat(String),

    /// An API page decoded into something other than the expected record shape.
    #[error("Malformed {post_type} record: {source}")]
    MalformedRecord {
        post_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record timestamp could not be interpreted as a publication date.
    #[error("Invalid publication timestamp: {0}")]
    TimestampParse(String),

    /// Pass-through for raw I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ViewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_date_format_names_the_input() {
        let err = ViewsError::InvalidDateFormat("13/13/13".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Unable to parse date: 13/13/13"));
        assert!(msg.contains("YYYY-MM-DD"));
    }

    #[test]
    fn malformed_record_names_the_collection_type() {
        let source = serde_json::from_str::<Vec<u64>>("{bad}").unwrap_err();
        let err = ViewsError::MalformedRecord {
            post_type: "snippets".to_string(),
            source,
        };
        assert!(err.to_string().contains("Malformed snippets record"));
    }

    #[test]
    fn timestamp_parse_names_the_input() {
        let err = ViewsError::TimestampParse("not-a-timestamp".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid publication timestamp: not-a-timestamp"
        );
    }
}
