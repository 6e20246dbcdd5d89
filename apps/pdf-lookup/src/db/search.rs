//! FTS5 sentence index
//!
//! Sentences from every ingested PDF live in one FTS5 table, tagged with
//! their source path and page. Queries are ranked with bm25, best first.
//!
//! # Usage
//!
//! ```rust,ignore
//! let pool = create_pool("sqlite:history_search.db").await?;
//! let index = SentenceIndex::new(&pool);
//!
//! index.ingest(&document.path, &document.sentences, 10).await?;
//! let hits = index.search("roman empire", None).await?;
//! ```

use std::path::Path;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::document::SentenceRecord;
use crate::error::Result;

/// One ranked match from the index
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IndexHit {
    pub content: String,
    /// Path of the PDF the sentence came from
    pub source: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// bm25 score (lower = better match)
    pub rank: f64,
}

impl IndexHit {
    /// Final component of the source path
    pub fn file_name(&self) -> &str {
        Path::new(&self.source)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.source)
    }
}

/// Index statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub sentences: usize,
    pub documents: usize,
}

/// FTS5-backed sentence index
pub struct SentenceIndex<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SentenceIndex<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace everything indexed for `source` with `records`
    ///
    /// Sentences shorter than `min_len` characters are skipped. Runs in a
    /// single transaction; returns the number of sentences stored.
    pub async fn ingest(
        &self,
        source: &Path,
        records: &[SentenceRecord],
        min_len: usize,
    ) -> Result<usize> {
        let source = source.to_string_lossy();
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM documents WHERE source = ?")
            .bind(&*source)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if removed > 0 {
            tracing::info!(source = %source, removed, "Replacing previously indexed sentences");
        }

        let mut inserted = 0;
        for record in records
            .iter()
            .filter(|r| r.sentence.chars().count() >= min_len)
        {
            sqlx::query("INSERT INTO documents (content, source, page) VALUES (?, ?, ?)")
                .bind(&record.sentence)
                .bind(&*source)
                .bind(record.page)
                .execute(&mut *tx)
                .await?;
            inserted += 1;
        }

        tx.commit().await?;

        tracing::info!(source = %source, inserted, "Indexed sentences");
        Ok(inserted)
    }

    /// Ranked full-text search; `limit` of `None` returns every match
    pub async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<IndexHit>> {
        let sanitized = sanitize_fts5_query(query);
        if sanitized.is_empty() {
            return Ok(Vec::new());
        }

        let limit = limit.map(i64::from).unwrap_or(-1);

        let hits = sqlx::query_as::<_, IndexHit>(
            r#"
            SELECT content, source, page, rank
            FROM documents
            WHERE documents MATCH ?
            ORDER BY rank
            LIMIT ?
            "#,
        )
        .bind(&sanitized)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(hits)
    }

    pub async fn stats(&self) -> Result<IndexStats> {
        let (sentences, documents): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COUNT(DISTINCT source) FROM documents")
                .fetch_one(self.pool)
                .await?;

        Ok(IndexStats {
            sentences: sentences as usize,
            documents: documents as usize,
        })
    }
}

/// Turn free text into an FTS5 query
///
/// Every whitespace-separated term becomes a quoted string, so FTS5
/// operators and punctuation are matched as text and the terms are ANDed.
/// Terms without any letters or digits are dropped.
fn sanitize_fts5_query(query: &str) -> String {
    query
        .split_whitespace()
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(" ")
}
