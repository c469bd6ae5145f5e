use crate::{
    Config, WeatherError,
    model::{Place, WeatherSnapshot},
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

/// Where places and forecasts come from.
///
/// Implementations fold their transport errors into the matching
/// [`WeatherError`] variant so callers only ever see the typed taxonomy.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Best matches for a place name, most relevant first. May be empty.
    async fn search_places(&self, name: &str) -> Result<Vec<Place>, WeatherError>;

    async fn forecast(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the Open-Meteo source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let provider = OpenMeteoProvider::from_endpoints(&config.endpoints)?;
    Ok(Box::new(provider))
}
