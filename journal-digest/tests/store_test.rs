mod common;

use common::{init_tracing, RUN_DATE};
use journal_digest::{DigestError, Result, SeenStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_store_file_is_created_and_survives_reopen() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = dir.path().join("seen.db");

    let mut store = SeenStore::open(&path).await?;
    assert!(path.exists());
    assert!(store.stage_insert("http://a/1", RUN_DATE, "Cancer breakthrough"));
    assert_eq!(store.commit().await?, 1);
    store.close().await;

    let store = SeenStore::open(&path).await?;
    assert!(store.lookup("http://a/1").await?);
    assert!(!store.lookup("http://a/2").await?);
    let records = store.records().await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date_seen, RUN_DATE);
    assert_eq!(records[0].title, "Cancer breakthrough");
    Ok(())
}

#[tokio::test]
async fn test_uncommitted_records_are_not_persisted() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("seen.db");

    let mut store = SeenStore::open(&path).await?;
    store.stage_insert("http://a/1", RUN_DATE, "One");
    store.stage_insert("http://a/2", RUN_DATE, "Two");
    assert!(store.lookup("http://a/1").await?);
    store.close().await;

    let store = SeenStore::open(&path).await?;
    assert_eq!(store.count().await?, 0);
    assert!(!store.lookup("http://a/1").await?);
    Ok(())
}

#[tokio::test]
async fn test_staging_same_identifier_twice_is_a_no_op() -> Result<()> {
    let mut store = SeenStore::in_memory().await?;

    assert!(store.stage_insert("Same title", RUN_DATE, "Same title"));
    assert!(!store.stage_insert("Same title", RUN_DATE, "Same title"));
    assert_eq!(store.staged().len(), 1);
    assert_eq!(store.commit().await?, 1);
    assert!(store.staged().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_commit_keeps_staged_records() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("seen.db");

    let mut store = SeenStore::open(&path).await?;
    store.stage_insert("http://a/1", RUN_DATE, "One");

    // Drop the table underneath the store so the transaction cannot complete.
    let other = sqlx::SqlitePool::connect(&format!("sqlite://{}", path.display())).await?;
    sqlx::query("DROP TABLE articles").execute(&other).await?;
    other.close().await;

    let err = store.commit().await.unwrap_err();
    assert!(matches!(err, DigestError::Persistence(_)));
    assert_eq!(store.staged().len(), 1);
    Ok(())
}
