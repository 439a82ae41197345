//! Shared SQL building helpers for the SQLite repositories.

use crate::db::{Page, QuoteQuery};

/// WHERE clause and its bind value for a text search.
pub struct SearchFilter {
    pub where_clause: String,
    pub pattern: Option<String>,
}

/// Escape LIKE wildcards so the search text matches literally.
/// Pairs with `ESCAPE '\'` in the generated clause.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the search filter for a quote query.
///
/// Matches against the lowercased `text_folded`/`author_folded` columns with
/// a lowercased pattern, since SQLite's LIKE only folds ASCII. The pattern
/// must be bound twice, once per column.
pub fn build_search_filter(query: &QuoteQuery) -> SearchFilter {
    match query.search_term() {
        Some(term) => SearchFilter {
            where_clause:
                r"WHERE (text_folded LIKE ? ESCAPE '\' OR author_folded LIKE ? ESCAPE '\')"
                    .to_string(),
            pattern: Some(format!("%{}%", escape_like(&fold_case(term)))),
        },
        None => SearchFilter {
            where_clause: String::new(),
            pattern: None,
        },
    }
}

/// Case folding shared by stored search columns and search patterns.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Build LIMIT/OFFSET clause from an optional page.
/// Note: no page means no window; nothing is appended.
/// Offsets past `i64::MAX` are clamped, SQLite reads larger literals as REAL.
pub fn build_limit_offset_clause(page: Option<&Page>) -> String {
    match page {
        Some(page) => format!(
            " LIMIT {} OFFSET {}",
            page.size,
            page.offset().min(i64::MAX as u64)
        ),
        None => String::new(),
    }
}
