//! Core library for the cached weather lookup service.
//!
//! This crate defines:
//! - Configuration handling (weatherstack credentials, endpoint, limits)
//! - The upstream client and response classification
//! - The freshness store abstraction and its adapters
//! - The lookup service orchestrating cache-or-fetch decisions
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod response;
pub mod service;
pub mod store;
pub mod upstream;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{StoreError, TransportError, WeatherError};
pub use model::{WeatherRecord, WeatherResult, lookup_key};
pub use response::{ErrorPayload, SuccessPayload, UpstreamResponse, classify};
pub use service::{FRESHNESS_WINDOW_MINUTES, WeatherService};
pub use store::{JsonFileStore, MemoryStore, WeatherStore};
pub use upstream::{UpstreamClient, WeatherstackClient};
