use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{error::StoreError, model::WeatherRecord};

use super::WeatherStore;

/// In-process store keyed by `requested_city_name`. Nothing survives the
/// process; useful for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, WeatherRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn find_latest_by_key(&self, key: &str) -> Result<Option<WeatherRecord>, StoreError> {
        let records = self.records.lock().expect("store mutex poisoned");
        Ok(records.get(key).cloned())
    }

    async fn save(&self, record: &WeatherRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        records.insert(record.requested_city_name.clone(), record.clone());
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        records.clear();
        Ok(())
    }
}
