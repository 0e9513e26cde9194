//! Storage traits and error types
//!
//! This module defines the trait interface for restaurant storage backends
//! and associated error types.

use crate::models::ExtractedRestaurantData;
use crate::storage::RestaurantRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Restaurant not found: {0}")]
    NotFound(String),

    #[error("Invalid source URL: {0}")]
    InvalidSourceUrl(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for restaurant storage backends
pub trait RestaurantStore {
    /// Saves a reviewed restaurant
    ///
    /// Source URLs are normalized before use as the key, so saving the same
    /// page twice (even via a different tracking link) updates one row.
    ///
    /// # Arguments
    ///
    /// * `source_url` - The review page the data was extracted from
    /// * `data` - The extracted restaurant data
    /// * `endpoint` - The extraction endpoint that produced the data, if known
    ///
    /// # Returns
    ///
    /// The row ID (either newly created or existing)
    fn save_restaurant(
        &mut self,
        source_url: &str,
        data: &ExtractedRestaurantData,
        endpoint: Option<&str>,
    ) -> StorageResult<i64>;

    /// Gets a restaurant by its (unnormalized) source URL
    fn get_restaurant_by_source_url(&self, source_url: &str)
        -> StorageResult<Option<RestaurantRecord>>;

    /// Lists saved restaurants, most recently updated first
    fn list_restaurants(&self, limit: usize) -> StorageResult<Vec<RestaurantRecord>>;

    /// Counts saved restaurants
    fn count_restaurants(&self) -> StorageResult<u64>;

    /// Deletes a restaurant by row ID
    fn delete_restaurant(&mut self, id: i64) -> StorageResult<()>;
}
