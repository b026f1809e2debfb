//! query_docs tool implementation.
//!
//! Resolves a ZIP archive URL through the download cache, extracts markdown
//! documents, builds an ephemeral full-text index, and renders the top hits.
//!
//! The pipeline itself returns a tagged `Result` so library callers can tell
//! failure kinds apart; only the protocol-facing adapter collapses errors
//! into the `"Error querying docs: ..."` text payload.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sourcetap_client::{DocIndex, Downloader, extract_markdown_docs};
use sourcetap_core::{CacheDb, Error};

/// Input parameters for query_docs tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryDocsParams {
    /// URL to a ZIP file (e.g. a GitHub archive).
    pub url: String,

    /// Search query.
    pub query: String,
}

/// Resolve a URL through the download cache.
///
/// On a hit the stored bytes are returned without touching the network.
/// On a miss the URL is downloaded directly (not through the reader proxy)
/// and persisted before returning. Cached content is never refreshed.
pub async fn get_or_fetch(db: &CacheDb, downloader: &dyn Downloader, url: &str) -> Result<Vec<u8>, Error> {
    if let Some(content) = db.get_download(url).await? {
        tracing::debug!("cache hit for {}", url);
        return Ok(content);
    }

    let bytes = downloader.download(url).await?;
    db.insert_download(url, &bytes).await?;
    Ok(bytes.to_vec())
}

/// Run the full query pipeline, returning the rendered result text.
pub async fn run_query(
    db: &CacheDb, downloader: &dyn Downloader, max_results: usize, params: &QueryDocsParams,
) -> Result<String, Error> {
    let bytes = get_or_fetch(db, downloader, &params.url).await?;

    let docs = extract_markdown_docs(&bytes)?;
    let index = DocIndex::build(&docs)?;
    let hits = index.search(&params.query, max_results)?;

    if hits.is_empty() {
        return Ok("No results found.".to_string());
    }

    let blocks: Vec<String> = hits
        .iter()
        .map(|hit| format!("File: {}\nContent Preview:\n{}...\n", hit.filename, hit.content))
        .collect();

    Ok(blocks.join("\n---\n"))
}

/// Implementation of the query_docs tool.
///
/// Never returns a protocol-level error: any pipeline failure is rendered
/// as a successful call carrying an error-shaped text payload.
pub async fn query_impl(
    db: &CacheDb, downloader: &dyn Downloader, max_results: usize, params: QueryDocsParams,
) -> Result<CallToolResult, McpError> {
    let text = match run_query(db, downloader, max_results, &params).await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("query_docs failed for {}: {}", params.url, e);
            format!("Error querying docs: {}", e)
        }
    };

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::io::{Cursor, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use zip::write::SimpleFileOptions;

    struct StubDownloader {
        response: Result<Vec<u8>, String>,
        calls: AtomicUsize,
    }

    impl StubDownloader {
        fn ok(bytes: Vec<u8>) -> Self {
            Self { response: Ok(bytes), calls: AtomicUsize::new(0) }
        }

        fn failing(message: &str) -> Self {
            Self { response: Err(message.to_string()), calls: AtomicUsize::new(0) }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Downloader for StubDownloader {
        async fn download(&self, _url: &str) -> Result<Bytes, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(bytes) => Ok(Bytes::from(bytes.clone())),
                Err(msg) => Err(Error::Http(msg.clone())),
            }
        }
    }

    fn dummy_zip() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut buffer);
        writer
            .start_file("test/doc.md", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"# Title\nThis is a test document.").unwrap();
        writer
            .start_file("test/ignore.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"This should be ignored.").unwrap();
        writer.finish().unwrap();
        buffer.into_inner()
    }

    fn params(url: &str, query: &str) -> QueryDocsParams {
        QueryDocsParams { url: url.to_string(), query: query.to_string() }
    }

    #[tokio::test]
    async fn test_get_or_fetch_miss_downloads_and_persists() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let downloader = StubDownloader::ok(b"archive bytes".to_vec());

        let content = get_or_fetch(&db, &downloader, "http://test.zip").await.unwrap();
        assert_eq!(content, b"archive bytes");
        assert_eq!(downloader.call_count(), 1);

        let stored = db.get_download("http://test.zip").await.unwrap().unwrap();
        assert_eq!(stored, b"archive bytes");
    }

    #[tokio::test]
    async fn test_get_or_fetch_hit_skips_network() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.insert_download("http://test.zip", b"cached bytes").await.unwrap();

        let downloader = StubDownloader::ok(b"fresh bytes".to_vec());
        let content = get_or_fetch(&db, &downloader, "http://test.zip").await.unwrap();

        assert_eq!(content, b"cached bytes");
        assert_eq!(downloader.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_or_fetch_second_call_hits_cache() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let downloader = StubDownloader::ok(b"archive bytes".to_vec());

        get_or_fetch(&db, &downloader, "http://test.zip").await.unwrap();
        get_or_fetch(&db, &downloader, "http://test.zip").await.unwrap();

        assert_eq!(downloader.call_count(), 1);
    }

    #[tokio::test]
    async fn test_query_finds_markdown_doc() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let downloader = StubDownloader::ok(dummy_zip());

        let text = run_query(&db, &downloader, 5, &params("http://test.zip", "test"))
            .await
            .unwrap();

        assert!(text.contains("File: doc.md"));
        assert!(text.contains("This is a test document"));
        assert!(!text.contains("ignore.txt"));
    }

    #[tokio::test]
    async fn test_query_absent_term_reports_no_results() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let downloader = StubDownloader::ok(dummy_zip());

        let text = run_query(&db, &downloader, 5, &params("http://test.zip", "banana"))
            .await
            .unwrap();

        assert_eq!(text, "No results found.");
    }

    #[tokio::test]
    async fn test_query_renders_preview_block() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let downloader = StubDownloader::ok(dummy_zip());

        let text = run_query(&db, &downloader, 5, &params("http://test.zip", "test"))
            .await
            .unwrap();

        assert_eq!(text, "File: doc.md\nContent Preview:\n# Title\nThis is a test document....\n");
    }

    #[tokio::test]
    async fn test_query_impl_download_failure_degrades_to_text() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let downloader = StubDownloader::failing("Download failed");

        let result = query_impl(&db, &downloader, 5, params("http://bad.zip", "test"))
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        let text = result.content[0].as_text().map(|t| t.text.clone()).unwrap_or_default();
        assert_eq!(text, "Error querying docs: Download failed");
    }

    #[tokio::test]
    async fn test_query_impl_invalid_archive_degrades_to_text() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let downloader = StubDownloader::ok(b"not a zip".to_vec());

        let result = query_impl(&db, &downloader, 5, params("http://bad.zip", "test"))
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        let text = result.content[0].as_text().map(|t| t.text.clone()).unwrap_or_default();
        assert!(text.starts_with("Error querying docs: invalid archive:"));
    }
}
