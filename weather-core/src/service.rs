use chrono::Duration;
use std::sync::Arc;

use crate::{
    clock::Clock,
    error::WeatherError,
    model::{WeatherRecord, WeatherResult, lookup_key},
    response::{UpstreamResponse, classify, truncate_body},
    store::WeatherStore,
    upstream::UpstreamClient,
};

/// How long a stored record is served without re-querying the provider.
pub const FRESHNESS_WINDOW_MINUTES: i64 = 30;

/// Orchestrates store lookup → freshness check → upstream call → classify →
/// persist → return.
///
/// Concurrent lookups for the same key are not coordinated: two simultaneous
/// stale lookups may both call upstream and both save. The store's
/// one-record-per-key upsert resolves the write race.
#[derive(Debug, Clone)]
pub struct WeatherService {
    store: Arc<dyn WeatherStore>,
    upstream: Arc<dyn UpstreamClient>,
    clock: Arc<dyn Clock>,
}

impl WeatherService {
    pub fn new(
        store: Arc<dyn WeatherStore>,
        upstream: Arc<dyn UpstreamClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, upstream, clock }
    }

    /// Look up current weather for `city`, serving from the store when the
    /// record is younger than [`FRESHNESS_WINDOW_MINUTES`].
    ///
    /// The store is keyed by the normalized city; the upstream call uses the
    /// city string exactly as supplied.
    pub async fn get_weather(&self, city: &str) -> Result<WeatherResult, WeatherError> {
        let key = lookup_key(city);

        if let Some(record) = self.store.find_latest_by_key(&key).await? {
            let age = self.clock.now() - record.updated_time;
            if age < Duration::minutes(FRESHNESS_WINDOW_MINUTES) {
                tracing::debug!(city = %key, "serving weather from cache");
                return Ok(WeatherResult::from(&record));
            }
        }

        let raw = self.upstream.fetch(city).await?;

        match classify(&raw) {
            UpstreamResponse::Success(payload) => {
                let record = WeatherRecord {
                    requested_city_name: key,
                    city_name: payload.location.name,
                    country: payload.location.country,
                    temperature: payload.current.temperature,
                    updated_time: self.clock.now(),
                };
                self.store.save(&record).await?;
                tracing::debug!(city = %record.requested_city_name, "stored fresh weather record");
                Ok(WeatherResult::from(&record))
            }
            UpstreamResponse::Error(payload) => Err(WeatherError::UpstreamApi(payload)),
            UpstreamResponse::Unrecognized => {
                let body = truncate_body(&raw);
                tracing::error!(%body, "weather provider returned an unrecognized response");
                Err(WeatherError::UnrecognizedResponse { body })
            }
        }
    }

    /// Wipe every persisted record. Store failures propagate unchanged.
    pub async fn clear_cache(&self) -> Result<(), WeatherError> {
        self.store.clear_all().await?;
        tracing::info!("Caches are cleared");
        Ok(())
    }
}
