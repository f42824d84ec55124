//! Dev Blog Views Library
//!
//! Correlates content records fetched from a WordPress-style REST API with
//! externally exported view counts, and renders a sorted Markdown report.
//!
//! ## Pipeline
//!
//! 1. **Ingest**: [`views::ingest_views`] parses loosely-delimited view-count
//!    text into a [`views::ViewsMap`] keyed by raw URL, skipping malformed
//!    lines and counting them in [`views::IngestStats`].
//! 2. **Cutoff**: [`date_input::CutoffParser`] parses the optional
//!    publication-date lower bound from any of several common formats.
//! 3. **Fetch**: [`fetcher::fetch_posts`] requests one page per configured
//!    collection type, joining each record to its view count by comparing
//!    URLs through [`url_norm::normalize_url`], which collapses
//!    year/month/day paths down to year/month so differently-grained URLs of
//!    the same post compare equal.
//! 4. **Render**: [`report::render_markdown`] sorts the joined records by
//!    publication date and emits the 6-column table.
//!
//! A failed request skips its collection type; a malformed record fails the
//! run; a missing view count degrades to zero. See [`error::ViewsError`] for
//! the taxonomy.
//!
//! ## Key Types
//!
//! - [`models::FetchedPost`] - a record joined with its view count
//! - [`models::ViewRecord`] - view data for one exported URL
//! - [`fetcher::PageSource`] - transport abstraction, swappable in tests

pub mod config;
pub mod date_input;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod report;
pub mod url_norm;
pub mod views;

pub use error::{Result, ViewsError};
pub use models::{FetchedPost, ViewRecord};
