//! Client code for sourcetap.
//!
//! This crate provides the HTTP clients (reader-proxy fetch and direct
//! download) and the markdown docs pipeline (ZIP extraction plus the
//! ephemeral full-text index) used by the server.

pub mod docs;
pub mod fetch;

pub use docs::{DocEntry, DocIndex, extract_markdown_docs};
pub use fetch::{DownloadClient, Downloader, FetchConfig, ReaderClient};
