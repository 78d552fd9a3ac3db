use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use weather_core::{
    Config, JsonFileStore, SystemClock, WeatherService, WeatherstackClient, model::TIME_FORMAT,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Cached weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherstack access key.
    Configure,

    /// Show current weather for a city, served from the cache when fresh.
    Show {
        /// City name, e.g. "Amsterdam".
        city: String,
    },

    /// Wipe every cached weather record.
    ClearCache,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::ClearCache => clear_cache().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let access_key =
        inquire::Password::new("Weatherstack access key:").without_confirmation().prompt()?;

    config.set_access_key(access_key);
    config.save()?;

    println!("Access key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_service(config: &Config, access_key: String) -> Result<WeatherService> {
    let client = WeatherstackClient::new(config, access_key)?;
    let store = JsonFileStore::new(Config::cache_file_path()?);

    Ok(WeatherService::new(Arc::new(store), Arc::new(client), Arc::new(SystemClock)))
}

async fn show(city: &str) -> Result<()> {
    let config = Config::load()?;
    let access_key = config.access_key()?.to_string();
    let service = build_service(&config, access_key)?;

    let result = service.get_weather(city).await?;

    println!("{}, {}", result.city_name, result.country);
    println!("Temperature: {}°C", result.temperature);
    println!("Updated:     {}", result.updated_time.format(TIME_FORMAT));
    Ok(())
}

async fn clear_cache() -> Result<()> {
    let config = Config::load()?;
    // The upstream client is never exercised on the clear path, so a missing
    // access key must not block it.
    let access_key = config.access_key.clone().unwrap_or_default();
    let service = build_service(&config, access_key)?;

    service.clear_cache().await?;

    println!("Cache cleared.");
    Ok(())
}
