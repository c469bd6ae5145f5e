use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    WeatherError,
    config::Endpoints,
    model::{Place, WeatherSnapshot},
};

use super::WeatherSource;

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,relative_humidity_2m,apparent_temperature,pressure_msl,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,precipitation_probability,relative_humidity_2m,wind_speed_10m,pressure_msl";
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,weather_code,precipitation_probability_max";

/// Client for the Open-Meteo geocoding and forecast APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn from_endpoints(endpoints: &Endpoints) -> Result<Self> {
        let http = Client::builder()
            .timeout(endpoints.timeout())
            .user_agent(concat!("meteo/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(
            http,
            &endpoints.geocoding_url,
            &endpoints.forecast_url,
        ))
    }

    pub fn with_client(http: Client, geocoding_url: &str, forecast_url: &str) -> Self {
        Self {
            geocoding_url: geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: forecast_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn fetch_places(&self, name: &str) -> Result<Vec<Place>> {
        let url = format!("{}/v1/search", self.geocoding_url);
        tracing::debug!(%url, name, "geocoding request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (geocoding)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GeoResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        Ok(parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Place::from)
            .collect())
    }

    async fn fetch_forecast(&self, place: &Place) -> Result<WeatherSnapshot> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        tracing::debug!(%url, lat = place.latitude, lon = place.longitude, "forecast request");

        let latitude = place.latitude.to_string();
        let longitude = place.longitude.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("temperature_unit", "celsius"),
                ("wind_speed_unit", "kmh"),
                ("timezone", "auto"),
                ("language", "en"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let snapshot: WeatherSnapshot =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        snapshot
            .check_alignment()
            .map_err(|msg| anyhow!("Open-Meteo forecast series are not aligned: {msg}"))?;

        Ok(snapshot)
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GeoResult> for Place {
    fn from(r: GeoResult) -> Self {
        Place {
            name: r.name,
            country: r.country,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoProvider {
    async fn search_places(&self, name: &str) -> Result<Vec<Place>, WeatherError> {
        self.fetch_places(name)
            .await
            .map_err(|e| WeatherError::GeocodeTransport { detail: format!("{e:#}") })
    }

    async fn forecast(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch_forecast(place)
            .await
            .map_err(|e| WeatherError::ForecastTransport { detail: format!("{e:#}") })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let p = OpenMeteoProvider::with_client(Client::new(), "http://geo/", "http://wx//");
        assert_eq!(p.geocoding_url, "http://geo");
        assert_eq!(p.forecast_url, "http://wx");
    }

    #[test]
    fn geocode_result_without_country() {
        let parsed: GeoResponse = serde_json::from_str(
            r#"{"results":[{"name":"Null Island","latitude":0.0,"longitude":0.0}]}"#,
        )
        .unwrap();
        let place = Place::from(parsed.results.unwrap().remove(0));
        assert_eq!(place.display_name(), "Null Island");
    }

    #[test]
    fn geocode_response_without_results_key() {
        let parsed: GeoResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(parsed.results.is_none());
    }
}
