// src/search.rs

use chrono::NaiveDate;
use log::debug;

/// LIKE patterns for one search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPatterns {
    /// Matched against `content` and `tags`.
    pub text: String,
    /// Matched against the display date of each entry.
    pub date: String,
}

impl SearchPatterns {
    pub fn new(query: &str) -> Self {
        let text = like_pattern(query);
        let date = match month_day_token(query) {
            Some(token) => {
                debug!("search query {:?} treated as date token {:?}", query, token);
                like_pattern(&token)
            }
            None => text.clone(),
        };
        SearchPatterns { text, date }
    }
}

/// Wraps `s` in `%` wildcards, escaping LIKE metacharacters with `\`.
pub fn like_pattern(s: &str) -> String {
    let mut pattern = String::with_capacity(s.len() + 2);
    pattern.push('%');
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Reformats an "abbreviated-month day" query (e.g. "Aug 3") into the prefix
/// the display date uses for that day in any year ("Aug 3,").
pub fn month_day_token(query: &str) -> Option<String> {
    let mut parts = query.split_whitespace();
    let (month, day) = (parts.next()?, parts.next()?);
    if parts.next().is_some()
        || day.len() > 2
        || !day.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    // leap year so "Feb 29" parses
    let date = NaiveDate::parse_from_str(&format!("{} {} 2000", month, day), "%b %d %Y").ok()?;
    Some(date.format("%b %-d,").to_string())
}
