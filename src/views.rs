//! Tolerant ingestion of exported view-count text.
//!
//! One candidate record per line: title, view count, URL. Lines come from
//! analytics exports that are only loosely CSV-shaped, so a line that does not
//! yield all three fields is counted and skipped, never fatal. The first line
//! is data; no header row is assumed.

use tracing::{debug, info};

use crate::models::ViewRecord;
use crate::url_norm::normalize_url;

/// URL -> view data mapping preserving first-seen insertion order.
///
/// Correlation walks entries in insertion order and takes the first key whose
/// normalized form matches, so order is part of the contract. Re-inserting an
/// existing raw URL overwrites the value without moving the entry.
#[derive(Debug, Default, Clone)]
pub struct ViewsMap {
    entries: Vec<(String, ViewRecord)>,
}

impl ViewsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an existing raw URL keeps its original position.
    pub fn insert(&mut self, url: String, record: ViewRecord) {
        if let Some(pos) = self.entries.iter().position(|(key, _)| *key == url) {
            self.entries[pos].1 = record;
        } else {
            self.entries.push((url, record));
        }
    }

    pub fn get(&self, url: &str) -> Option<&ViewRecord> {
        self.entries
            .iter()
            .find(|(key, _)| key == url)
            .map(|(_, record)| record)
    }

    /// First entry, in insertion order, whose normalized key equals
    /// `normalized` (which must already be in canonical form).
    pub fn match_normalized(&self, normalized: &str) -> Option<&ViewRecord> {
        self.entries
            .iter()
            .find(|(key, _)| normalize_url(key) == normalized)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ViewRecord)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate ingestion counters, exposed for observability. A caller cannot
/// distinguish "zero valid records" from "all records malformed" except
/// through these.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub processed: usize,
    pub skipped: usize,
}

struct ParsedLine<'a> {
    title: &'a str,
    views_text: &'a str,
    url: &'a str,
}

/// Parse raw view-count text into a [`ViewsMap`].
///
/// Later duplicate URLs overwrite earlier ones. Malformed lines increment the
/// skipped counter and are logged at debug level.
pub fn ingest_views(content: &str) -> (ViewsMap, IngestStats) {
    let mut map = ViewsMap::new();
    let mut stats = IngestStats::default();

    for line in content.trim().split('\n') {
        let parsed = if line.starts_with('"') {
            parse_quoted_line(line)
        } else {
            parse_plain_line(line)
        };

        let record = parsed.and_then(|fields| {
            let views: u64 = fields.views_text.trim().parse().ok()?;
            let url = fields
                .url
                .trim()
                .trim_matches('"')
                .trim_end_matches('/')
                .to_string();
            let record = ViewRecord {
                title: fields.title.to_string(),
                views,
            };
            Some((url, record))
        });

        match record {
            Some((url, record)) => {
                map.insert(url, record);
                stats.processed += 1;
            }
            None => {
                stats.skipped += 1;
                debug!(line = line.trim(), "skipped malformed views line");
            }
        }
    }

    info!(
        processed = stats.processed,
        skipped = stats.skipped,
        "ingested view counts"
    );
    (map, stats)
}

/// Quoted shape: `"Title, with commas",123,https://...`
/// The title runs to the first quote immediately followed by a comma.
fn parse_quoted_line(line: &str) -> Option<ParsedLine<'_>> {
    let title_end = line[1..].find("\",").map(|pos| pos + 1)?;
    let title = &line[1..title_end];
    let remainder = &line[title_end + 2..];
    let (views_text, url) = remainder.split_once(',')?;
    Some(ParsedLine {
        title,
        views_text,
        url,
    })
}

/// Plain shape: `Title,123,https://...`
/// Only the first two commas delimit, so the URL keeps any further commas.
fn parse_plain_line(line: &str) -> Option<ParsedLine<'_>> {
    let mut fields = line.splitn(3, ',');
    let title = fields.next()?;
    let views_text = fields.next()?;
    let url = fields.next()?;
    Some(ParsedLine {
        title,
        views_text,
        url,
    })
}
