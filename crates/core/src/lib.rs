//! Core types and shared functionality for sourcetap.
//!
//! This crate provides:
//! - Download cache with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::CacheDb;
pub use config::AppConfig;
pub use error::Error;
