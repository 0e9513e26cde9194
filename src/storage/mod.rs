//! Storage module for persisting reviewed restaurants
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Upserting extracted restaurants keyed by normalized source URL
//! - Listing and counting saved restaurants

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{RestaurantStore, StorageError, StorageResult};

use crate::models::ExtractedRestaurantData;
use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(StorageError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// A saved restaurant
#[derive(Debug, Clone)]
pub struct RestaurantRecord {
    pub id: i64,
    pub source_url: String,
    pub data: ExtractedRestaurantData,
    pub endpoint: Option<String>,
    pub scraped_at: String,
    pub updated_at: String,
}
