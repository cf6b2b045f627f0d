use crate::types::{Result, SeenRecord};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Durable record of every article a run has already examined.
///
/// Lookups hit the database plus whatever the current run has staged, so an
/// article repeated within one run is only recorded once. Staged rows reach
/// disk together in [`SeenStore::commit`] or not at all.
pub struct SeenStore {
    db: SqlitePool,
    staged: Vec<SeenRecord>,
    staged_ids: HashSet<String>,
}

impl SeenStore {
    /// Opens the store file, creating it and the `articles` table if needed.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let store = Self::connect(options).await?;
        info!("Opened seen-article store at {}", path.display());
        Ok(store)
    }

    /// A store that lives only as long as this value.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self> {
        // A single long-lived connection: runs are sequential and an in-memory
        // database disappears with its connection.
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self {
            db,
            staged: Vec::new(),
            staged_ids: HashSet::new(),
        };
        store.setup_schema().await?;
        Ok(store)
    }

    async fn setup_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                link TEXT NOT NULL,
                date_seen TEXT NOT NULL,
                title TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_articles_link ON articles (link)")
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// True if `identifier` was recorded by an earlier run or staged by this one.
    pub async fn lookup(&self, identifier: &str) -> Result<bool> {
        if self.staged_ids.contains(identifier) {
            return Ok(true);
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE link = ?1")
            .bind(identifier)
            .fetch_one(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Queues a record for the next commit. Returns false if the identifier
    /// is already staged.
    pub fn stage_insert(&mut self, identifier: &str, run_date: &str, title: &str) -> bool {
        if !self.staged_ids.insert(identifier.to_string()) {
            debug!("Already staged: {}", identifier);
            return false;
        }

        self.staged.push(SeenRecord {
            identifier: identifier.to_string(),
            date_seen: run_date.to_string(),
            title: title.to_string(),
        });
        true
    }

    pub fn staged(&self) -> &[SeenRecord] {
        &self.staged
    }

    /// Writes every staged record in one transaction and returns how many
    /// were written. On error nothing is persisted and the staged records
    /// are kept.
    pub async fn commit(&mut self) -> Result<usize> {
        let mut tx = self.db.begin().await?;

        for record in &self.staged {
            sqlx::query("INSERT INTO articles (link, date_seen, title) VALUES (?1, ?2, ?3)")
                .bind(&record.identifier)
                .bind(&record.date_seen)
                .bind(&record.title)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let written = self.staged.len();
        self.staged.clear();
        self.staged_ids.clear();
        info!("Committed {} records to the seen-article store", written);
        Ok(written)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    /// All committed records in insertion order.
    pub async fn records(&self) -> Result<Vec<SeenRecord>> {
        let rows = sqlx::query("SELECT link, date_seen, title FROM articles ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        rows.into_iter()
            .map(|row| -> Result<SeenRecord> {
                Ok(SeenRecord {
                    identifier: row.try_get("link")?,
                    date_seen: row.try_get("date_seen")?,
                    title: row.try_get("title")?,
                })
            })
            .collect()
    }

    pub async fn close(self) {
        self.db.close().await;
    }
}
