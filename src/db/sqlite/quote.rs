//! SQLite QuoteRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{build_limit_offset_clause, build_search_filter, fold_case};
use crate::db::{DbResult, ListResult, NewQuote, Quote, QuoteId, QuoteQuery, QuoteRepository};

const QUOTE_COLUMNS: &str = "id, text, author, is_favorite";

/// SQLx-backed quote repository.
#[derive(Clone)]
pub struct SqliteQuoteRepository {
    pub(crate) pool: SqlitePool,
}

fn quote_from_row(row: &SqliteRow) -> Quote {
    Quote {
        id: row.get("id"),
        text: row.get("text"),
        author: row.get("author"),
        is_favorite: row.get("is_favorite"),
    }
}

impl QuoteRepository for SqliteQuoteRepository {
    async fn list(&self, query: &QuoteQuery) -> DbResult<ListResult<Quote>> {
        let filter = build_search_filter(query);
        let limit_clause = build_limit_offset_clause(query.page.as_ref());

        let sql = format!(
            "SELECT {} FROM quotes {} ORDER BY id ASC{}",
            QUOTE_COLUMNS, filter.where_clause, limit_clause
        );
        let count_sql = format!("SELECT COUNT(*) FROM quotes {}", filter.where_clause);

        // Get paginated results - the pattern is bound once per searched column
        let mut query_builder = sqlx::query(&sql);
        if let Some(pattern) = &filter.pattern {
            query_builder = query_builder.bind(pattern).bind(pattern);
        }
        let rows = query_builder.fetch_all(&self.pool).await?;
        let items: Vec<Quote> = rows.iter().map(quote_from_row).collect();

        // Get total count of the filtered set
        let mut count_query = sqlx::query_scalar(&count_sql);
        if let Some(pattern) = &filter.pattern {
            count_query = count_query.bind(pattern).bind(pattern);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?;

        Ok(ListResult {
            items,
            total: total as usize,
        })
    }

    async fn create(&self, quote: &NewQuote) -> DbResult<Quote> {
        let row = sqlx::query(&format!(
            "INSERT INTO quotes (text, author, is_favorite, text_folded, author_folded) \
             VALUES (?, ?, 0, ?, ?) RETURNING {}",
            QUOTE_COLUMNS
        ))
        .bind(&quote.text)
        .bind(&quote.author)
        .bind(fold_case(&quote.text))
        .bind(fold_case(&quote.author))
        .fetch_one(&self.pool)
        .await?;

        Ok(quote_from_row(&row))
    }

    async fn delete(&self, id: QuoteId) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_favorite(&self, id: QuoteId, is_favorite: bool) -> DbResult<Option<Quote>> {
        let row = sqlx::query(&format!(
            "UPDATE quotes SET is_favorite = ? WHERE id = ? RETURNING {}",
            QUOTE_COLUMNS
        ))
        .bind(is_favorite)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(quote_from_row))
    }
}
