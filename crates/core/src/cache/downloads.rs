//! Download row operations.
//!
//! A download row maps a URL to the raw bytes fetched from it. Rows are
//! written once and never updated or deleted; cached content is assumed
//! immutable for the lifetime of the cache file.

use super::connection::CacheDb;
use crate::Error;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl CacheDb {
    /// Get the cached bytes for a URL.
    ///
    /// Returns None if the URL has never been downloaded.
    pub async fn get_download(&self, url: &str) -> Result<Option<Vec<u8>>, Error> {
        let url = url.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Vec<u8>>, Error> {
                let result = conn.query_row(
                    "SELECT content FROM downloads WHERE url = ?1",
                    params![url],
                    |row| row.get::<_, Vec<u8>>(0),
                );

                match result {
                    Ok(content) => Ok(Some(content)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert downloaded bytes for a URL.
    ///
    /// Uses ON CONFLICT DO NOTHING: two callers racing on the same uncached
    /// URL both download, the first insert wins and the second is a no-op.
    pub async fn insert_download(&self, url: &str, content: &[u8]) -> Result<(), Error> {
        tracing::debug!("caching {} bytes for {}", content.len(), url);
        let url = url.to_string();
        let content = content.to_vec();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO downloads (url, content) VALUES (?1, ?2)
                     ON CONFLICT(url) DO NOTHING",
                    params![url, content],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Number of cached downloads.
    pub async fn download_count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM downloads", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.insert_download("https://example.com/a.zip", b"archive bytes")
            .await
            .unwrap();

        let content = db.get_download("https://example.com/a.zip").await.unwrap().unwrap();
        assert_eq!(content, b"archive bytes");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.get_download("https://example.com/missing.zip").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_insert_conflict_keeps_first_write() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.insert_download("https://example.com/a.zip", b"first").await.unwrap();
        db.insert_download("https://example.com/a.zip", b"second").await.unwrap();

        let content = db.get_download("https://example.com/a.zip").await.unwrap().unwrap();
        assert_eq!(content, b"first");
        assert_eq!(db.download_count().await.unwrap(), 1);
    }
}
