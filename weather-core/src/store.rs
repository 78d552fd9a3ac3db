use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::StoreError, model::WeatherRecord};

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Persistence boundary for weather records.
///
/// Contract: the store keeps at most one record per lookup key. `save`
/// upserts, replacing any existing record for `requested_city_name`, so the
/// latest write wins and readers never need a timestamp tie-break.
/// Implementations must tolerate concurrent reads and writes.
#[async_trait]
pub trait WeatherStore: Send + Sync + Debug {
    /// Most recent record stored under `key`, if any.
    async fn find_latest_by_key(&self, key: &str) -> Result<Option<WeatherRecord>, StoreError>;

    /// Insert or replace the record for its lookup key.
    async fn save(&self, record: &WeatherRecord) -> Result<(), StoreError>;

    /// Remove every persisted record.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
