//! Markdown docs pipeline: ZIP extraction and ephemeral full-text search.
//!
//! Documents only live for the duration of one query: the archive is opened
//! in memory, markdown entries are collected, a fresh index is built over
//! them, and everything is dropped when the call returns.

pub mod archive;
pub mod index;

pub use archive::{DocEntry, extract_markdown_docs};
pub use index::DocIndex;
