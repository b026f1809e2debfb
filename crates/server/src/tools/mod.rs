//! MCP tool implementations.
//!
//! This module contains all tools exposed by the sourcetap server.

pub mod fetch_web_content;
pub mod query_docs;

pub use fetch_web_content::FetchWebContentParams;
pub use query_docs::QueryDocsParams;
