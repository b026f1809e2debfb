//! SQLite-backed download cache.
//!
//! This module provides a persistent key/value cache mapping URLs to the raw
//! bytes downloaded from them, using SQLite with async access via
//! tokio-rusqlite. It supports:
//!
//! - Automatic schema migrations
//! - WAL mode for concurrent access across processes
//! - Insert-once semantics (a URL's content is never updated or deleted)

pub mod connection;
pub mod downloads;
pub mod migrations;

pub use crate::Error;

pub use connection::CacheDb;
