use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::{error::StoreError, model::WeatherRecord};

use super::WeatherStore;

/// File-backed store so the cache survives between CLI invocations.
///
/// The whole key→record map is kept as one JSON document; every operation
/// rewrites it. Fine at the scale of "one record per city you ever asked
/// about". A process-local mutex serializes read-modify-write cycles.
///
/// I/O is blocking `std::fs` on the async path: each operation touches one
/// small file, so there is no `spawn_blocking` hop.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, guard: Mutex::new(()) }
    }

    fn load_map(&self) -> Result<HashMap<String, WeatherRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_map(&self, map: &HashMap<String, WeatherRecord>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl WeatherStore for JsonFileStore {
    async fn find_latest_by_key(&self, key: &str) -> Result<Option<WeatherRecord>, StoreError> {
        let _guard = self.guard.lock().expect("store mutex poisoned");
        Ok(self.load_map()?.remove(key))
    }

    async fn save(&self, record: &WeatherRecord) -> Result<(), StoreError> {
        let _guard = self.guard.lock().expect("store mutex poisoned");
        let mut map = self.load_map()?;
        map.insert(record.requested_city_name.clone(), record.clone());
        self.write_map(&map)
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let _guard = self.guard.lock().expect("store mutex poisoned");
        self.write_map(&HashMap::new())
    }
}
