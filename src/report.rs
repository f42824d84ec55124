//! Markdown report rendering and the terminal run summary.

use std::path::Path;

use colored::Colorize;

use crate::models::FetchedPost;
use crate::views::IngestStats;

/// Sentinel used in the report header and filenames when no cutoff was
/// supplied.
pub const NO_CUTOFF_LABEL: &str = "all";

/// Render the 6-column Markdown report.
///
/// Rows are sorted by publication date ascending with the record id as the
/// tie-break so output is reproducible across runs.
pub fn render_markdown(posts: &[FetchedPost], cutoff_label: &str) -> String {
    let mut lines = vec![
        "# Dev Blog News".to_string(),
        format!("## Posts Published After {cutoff_label}"),
        String::new(),
        "| Date | Title | Author | Type | Views | Post ID |".to_string(),
        "|------|-------|--------|------|-------|----------|".to_string(),
    ];

    let mut sorted: Vec<&FetchedPost> = posts.iter().collect();
    sorted.sort_by_key(|post| (post.publication_date, post.id));

    for post in sorted {
        // A literal pipe in the title would break the column layout.
        let safe_title = format!("[{}]({})", post.title.replace('|', "&#124;"), post.url);
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            post.publication_date.format("%Y-%m-%d"),
            safe_title,
            post.author,
            post.post_type,
            post.views,
            post.id
        ));
    }

    lines.join("\n")
}

/// Colored terminal summary printed after a successful run.
pub fn print_summary(
    posts: &[FetchedPost],
    stats: IngestStats,
    cutoff_label: &str,
    output: Option<&Path>,
) {
    println!("\n{}", "=".repeat(60).bright_cyan());
    println!("{}", "Dev Blog Views Report".bright_white().bold());
    println!("{}", "=".repeat(60).bright_cyan());

    println!(
        "\n{} {} posts published after {}",
        "📰".bright_yellow(),
        posts.len().to_string().bright_white().bold(),
        cutoff_label.bright_white().bold()
    );
    println!(
        "   View counts: {} processed, {} skipped",
        stats.processed.to_string().bright_green(),
        stats.skipped.to_string().bright_yellow()
    );
    if let Some(path) = output {
        println!(
            "   Report written to {}",
            path.display().to_string().bright_cyan()
        );
    }
    println!();
}
