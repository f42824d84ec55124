use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use devblog_views::config::get_config;
use devblog_views::date_input::CutoffParser;
use devblog_views::fetcher::{fetch_posts, HttpPageSource, PageQuery};
use devblog_views::logging::init_logging;
use devblog_views::report::{self, NO_CUTOFF_LABEL};
use devblog_views::views::{ingest_views, ViewsMap};

#[derive(Parser)]
#[command(name = "devblog-views")]
#[command(about = "Correlate dev-blog posts with exported view counts")]
#[command(version)]
struct Cli {
    /// Only include posts published after this date (YYYY-MM-DD, MM/DD/YYYY, ...)
    #[arg(long)]
    after: Option<String>,

    /// Exported view-count file to correlate against
    #[arg(long)]
    views_file: Option<PathBuf>,

    /// Directory for the rendered report and views JSON export
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Content API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Collection type to fetch (repeatable; defaults to the configured list)
    #[arg(long = "post-type")]
    post_types: Vec<String>,

    /// Print the joined posts as JSON instead of writing a Markdown report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let json_output = cli.json;
    init_logging();

    let span = tracing::info_span!("run", run_id = %Uuid::new_v4());
    match run(cli).instrument(span).await {
        Ok(()) => Ok(()),
        Err(e) => handle_error(e, json_output),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = get_config();

    let base_url = cli.base_url.unwrap_or_else(|| config.api.base_url.clone());
    let post_types = if cli.post_types.is_empty() {
        config.api.post_types.clone()
    } else {
        cli.post_types
    };
    let views_path = cli.views_file.unwrap_or_else(|| config.paths.views_file.clone());
    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| config.paths.output_directory.clone());

    // Absent or blank cutoff means unbounded.
    let (after, cutoff_label) = match cli.after.as_deref().map(str::trim) {
        None | Some("") => (None, NO_CUTOFF_LABEL.to_string()),
        Some(input) => (Some(CutoffParser::parse(input)?), input.to_string()),
    };

    // A missing views file degrades to an empty mapping.
    let (views, stats) = match fs::read_to_string(&views_path) {
        Ok(content) => {
            let (views, stats) = ingest_views(&content);
            if config.output.export_views_json {
                export_views_json(&views, &output_dir)?;
            }
            (views, stats)
        }
        Err(err) => {
            warn!(
                path = %views_path.display(),
                error = %err,
                "views file not found, continuing without view counts"
            );
            Default::default()
        }
    };

    let source = HttpPageSource::new(&base_url);
    let query = PageQuery {
        page: config.api.page,
        per_page: config.api.per_page,
        after,
    };
    let posts = fetch_posts(&source, &post_types, &query, &views).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        warn!("no posts found");
        println!("No posts found.");
        return Ok(());
    }

    let markdown = report::render_markdown(&posts, &cutoff_label);
    let stem = sanitize_filename(&format!("{}-{}", config.output.filename_prefix, cutoff_label));
    let output_path = output_dir.join(format!("{stem}.md"));
    fs::write(&output_path, &markdown)
        .with_context(|| format!("writing report to {}", output_path.display()))?;
    info!(posts = posts.len(), path = %output_path.display(), "report written");

    report::print_summary(&posts, stats, &cutoff_label, Some(&output_path));
    Ok(())
}

/// Export the ingested mapping as a JSON document for reuse.
fn export_views_json(views: &ViewsMap, output_dir: &Path) -> Result<()> {
    let mut map = serde_json::Map::new();
    for (url, record) in views.iter() {
        map.insert(url.to_string(), serde_json::to_value(record)?);
    }

    let path = output_dir.join("views_data.json");
    let json = serde_json::to_string_pretty(&serde_json::Value::Object(map))?;
    fs::write(&path, json)
        .with_context(|| format!("writing views data to {}", path.display()))?;
    info!(path = %path.display(), "views data exported");
    Ok(())
}

/// Keep alphanumerics, dashes, and underscores; drop everything else.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

fn handle_error(e: anyhow::Error, json: bool) -> Result<()> {
    if json {
        println!("{{\"error\": \"{}\"}}", e);
    } else {
        eprintln!("Error: {}", e);
    }
    process::exit(1);
}
