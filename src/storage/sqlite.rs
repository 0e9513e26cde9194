//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the RestaurantStore trait.

use crate::models::ExtractedRestaurantData;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{RestaurantStore, StorageError, StorageResult};
use crate::storage::RestaurantRecord;
use crate::url::normalize_url;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const RESTAURANT_COLUMNS: &str =
    "id, source_url, data_json, endpoint, scraped_at, updated_at";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn storage_key(source_url: &str) -> StorageResult<String> {
        normalize_url(source_url)
            .map(|url| url.to_string())
            .map_err(|e| StorageError::InvalidSourceUrl(e.to_string()))
    }
}

/// Raw column values read before the JSON payload is decoded
struct RawRow {
    id: i64,
    source_url: String,
    data_json: String,
    endpoint: Option<String>,
    scraped_at: String,
    updated_at: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            source_url: row.get(1)?,
            data_json: row.get(2)?,
            endpoint: row.get(3)?,
            scraped_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_record(self) -> StorageResult<RestaurantRecord> {
        Ok(RestaurantRecord {
            id: self.id,
            source_url: self.source_url,
            data: serde_json::from_str(&self.data_json)?,
            endpoint: self.endpoint,
            scraped_at: self.scraped_at,
            updated_at: self.updated_at,
        })
    }
}

impl RestaurantStore for SqliteStorage {
    fn save_restaurant(
        &mut self,
        source_url: &str,
        data: &ExtractedRestaurantData,
        endpoint: Option<&str>,
    ) -> StorageResult<i64> {
        let key = Self::storage_key(source_url)?;
        let now = Utc::now().to_rfc3339();
        let cuisines = serde_json::to_string(&data.cuisines)?;
        let data_json = serde_json::to_string(data)?;

        // scraped_at keeps the first save; everything else tracks the latest
        self.conn.execute(
            "INSERT INTO restaurants
                (source_url, name, cuisines, price_tier, rating, location, data_json,
                 endpoint, scraped_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
             ON CONFLICT(source_url) DO UPDATE SET
                name = excluded.name,
                cuisines = excluded.cuisines,
                price_tier = excluded.price_tier,
                rating = excluded.rating,
                location = excluded.location,
                data_json = excluded.data_json,
                endpoint = excluded.endpoint,
                updated_at = excluded.updated_at",
            params![
                key,
                data.name,
                cuisines,
                data.price_tier,
                data.rating,
                data.location,
                data_json,
                endpoint,
                now
            ],
        )?;

        let id: i64 = self.conn.query_row(
            "SELECT id FROM restaurants WHERE source_url = ?1",
            params![key],
            |row| row.get(0),
        )?;

        tracing::debug!("Saved restaurant '{}' as row {}", data.name, id);
        Ok(id)
    }

    fn get_restaurant_by_source_url(
        &self,
        source_url: &str,
    ) -> StorageResult<Option<RestaurantRecord>> {
        let key = Self::storage_key(source_url)?;
        let raw = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM restaurants WHERE source_url = ?1",
                    RESTAURANT_COLUMNS
                ),
                params![key],
                RawRow::from_row,
            )
            .optional()?;

        raw.map(RawRow::into_record).transpose()
    }

    fn list_restaurants(&self, limit: usize) -> StorageResult<Vec<RestaurantRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM restaurants ORDER BY updated_at DESC, id DESC LIMIT ?1",
            RESTAURANT_COLUMNS
        ))?;

        let rows = stmt
            .query_map(params![limit as i64], RawRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(RawRow::into_record).collect()
    }

    fn count_restaurants(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM restaurants", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn delete_restaurant(&mut self, id: i64) -> StorageResult<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM restaurants WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StorageError::NotFound(format!("Restaurant ID {}", id)));
        }
        Ok(())
    }
}
