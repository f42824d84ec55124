//! URL canonicalization for view-count correlation.
//!
//! The view-count export and the content API can disagree on whether a post
//! URL carries the day segment (`/news/2024/12/10/slug/` vs
//! `/news/2024/12/slug`). Both sides of a comparison are run through the same
//! scan so the two forms compare equal.

/// Canonicalize a URL for equality comparison.
///
/// Lower-cases, strips trailing slashes, then collapses any year/month/day
/// run of path segments down to year/month. The scan is a single left-to-right
/// pass with two segments of lookahead and no backtracking: a 4-digit
/// all-numeric segment is kept, a following 1-2 digit segment (month) is kept,
/// and a second 1-2 digit segment after that (day) is dropped.
///
/// Normalized forms are used only for comparison and never stored back onto
/// records.
pub fn normalize_url(url: &str) -> String {
    let url = url.to_lowercase();
    let url = url.trim_end_matches('/');
    let parts: Vec<&str> = url.split('/').collect();

    let mut normalized: Vec<&str> = Vec::with_capacity(parts.len());
    let mut i = 0;
    while i < parts.len() {
        let part = parts[i];
        if is_year(part) {
            normalized.push(part);
            if i + 1 < parts.len() && is_month_or_day(parts[i + 1]) {
                normalized.push(parts[i + 1]);
                if i + 2 < parts.len() && is_month_or_day(parts[i + 2]) {
                    i += 3;
                } else {
                    i += 2;
                }
                continue;
            }
            i += 1;
            continue;
        }
        normalized.push(part);
        i += 1;
    }

    normalized.join("/")
}

// Any 4-digit all-numeric segment counts, even one sitting in a slug.
// Deliberate simplification, not a date parser.
fn is_year(part: &str) -> bool {
    part.len() == 4 && part.bytes().all(|b| b.is_ascii_digit())
}

fn is_month_or_day(part: &str) -> bool {
    !part.is_empty() && part.len() <= 2 && part.bytes().all(|b| b.is_ascii_digit())
}
