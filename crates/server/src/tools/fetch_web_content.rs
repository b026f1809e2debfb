//! fetch_web_content tool implementation.
//!
//! One GET through the reader proxy, body returned verbatim. No caching,
//! no retries, no status-code inspection.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sourcetap_client::ReaderClient;
use sourcetap_core::Error;

/// Input parameters for fetch_web_content tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchWebContentParams {
    /// The URL of the web page to fetch content from.
    pub url: String,
}

/// Implementation of the fetch_web_content tool.
///
/// Transport errors propagate as protocol-level failures; a non-2xx body
/// from the proxy is returned as-is.
pub async fn fetch_impl(reader: &ReaderClient, params: FetchWebContentParams) -> Result<CallToolResult, McpError> {
    if params.url.is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let text = reader.fetch(&params.url).await?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcetap_client::FetchConfig;

    #[tokio::test]
    async fn test_fetch_empty_url_fails() {
        let reader = ReaderClient::new(FetchConfig::default()).unwrap();
        let params = FetchWebContentParams { url: "".into() };

        let result = fetch_impl(&reader, params).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_reader_url_for_example_dot_com() {
        let reader = ReaderClient::new(FetchConfig::default()).unwrap();
        assert_eq!(
            reader.reader_url("https://example.com"),
            "https://r.jina.ai/https://example.com"
        );
    }
}
