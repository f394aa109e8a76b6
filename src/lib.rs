//! pet-adopt library
//!
//! Pet catalog browsing, adoption requests and their review, backed by a
//! local SQLite key-value store.

pub mod adopt;
pub mod config;
