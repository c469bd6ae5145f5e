//! Two-stage fetch: geocode a free-text name, then fetch its forecast.
//!
//! Each stage returns its own result; stages share nothing but the
//! [`Place`] the first hands to the second.

use crate::{
    WeatherError,
    model::{Place, WeatherSnapshot},
    provider::WeatherSource,
};

/// A successful search: the resolved place and its forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub place: Place,
    pub snapshot: WeatherSnapshot,
}

/// Trim the raw query; blank input is rejected before any request is made.
pub fn validate_query(raw: &str) -> Result<&str, WeatherError> {
    let city = raw.trim();
    if city.is_empty() {
        Err(WeatherError::InputEmpty)
    } else {
        Ok(city)
    }
}

pub async fn geocode_stage(source: &dyn WeatherSource, city: &str) -> Result<Place, WeatherError> {
    let place = source
        .search_places(city)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::CityNotFound { query: city.to_string() })?;

    tracing::info!(query = city, place = %place.display_name(), "city resolved");
    Ok(place)
}

pub async fn forecast_stage(
    source: &dyn WeatherSource,
    place: &Place,
) -> Result<WeatherSnapshot, WeatherError> {
    let snapshot = source.forecast(place).await?;
    tracing::debug!(days = snapshot.day_count(), hours = snapshot.hourly.time.len(), "forecast received");
    Ok(snapshot)
}

/// Run both stages for a raw query. The first failing stage ends the run.
pub async fn run(source: &dyn WeatherSource, raw: &str) -> Result<SearchResult, WeatherError> {
    let city = validate_query(raw)?;
    let place = geocode_stage(source, city).await?;
    let snapshot = forecast_stage(source, &place).await?;
    Ok(SearchResult { place, snapshot })
}
