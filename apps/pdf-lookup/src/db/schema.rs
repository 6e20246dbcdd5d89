//! Database schema initialization

use sqlx::SqlitePool;

use crate::error::Result;

/// Initialize the database schema
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}

/// Only `content` is tokenized; `source` and `page` ride along so a hit can
/// be traced back to its file and page.
const SCHEMA_SQL: &str = r#"
CREATE VIRTUAL TABLE IF NOT EXISTS documents USING fts5(
    content,
    source UNINDEXED,
    page UNINDEXED,
    tokenize='unicode61 remove_diacritics 2'
)
"#;
