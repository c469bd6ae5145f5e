use serde::{Deserialize, Serialize};

/// A geocoded place: what the geocode stage hands to the forecast stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// "Lisbon, Portugal", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        match self.country.as_deref().filter(|c| !c.is_empty()) {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// A full forecast payload: current conditions plus hourly and daily series.
///
/// Field names follow the Open-Meteo response so the snapshot can be
/// deserialized straight from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub timezone: Option<String>,
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "apparent_temperature")]
    pub feels_like: f64,
    pub weather_code: i32,
    #[serde(rename = "relative_humidity_2m", alias = "relativehumidity_2m", default)]
    pub humidity: Option<f64>,
    #[serde(rename = "wind_speed_10m", alias = "windspeed_10m", default)]
    pub wind_speed: Option<f64>,
    #[serde(rename = "pressure_msl", alias = "surface_pressure", default)]
    pub pressure: Option<f64>,
}

/// Hourly series; every vector is index-aligned with `time`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Local times such as `2026-10-18T12:00`.
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(rename = "relative_humidity_2m", alias = "relativehumidity_2m", default)]
    pub humidity: Vec<Option<f64>>,
    #[serde(rename = "wind_speed_10m", alias = "windspeed_10m", default)]
    pub wind_speed: Vec<Option<f64>>,
    #[serde(rename = "pressure_msl", default)]
    pub pressure: Vec<Option<f64>>,
}

/// Daily series; every vector is index-aligned with `time`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    /// Local dates such as `2026-10-18`.
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min", default)]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
}

/// One day of the daily series. Null readings stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: String,
    pub min_c: Option<f64>,
    pub max_c: Option<f64>,
    pub weather_code: Option<i32>,
    pub precipitation_max: Option<f64>,
}

impl WeatherSnapshot {
    /// Number of dated days in the daily series.
    pub fn day_count(&self) -> usize {
        self.daily.time.len()
    }

    pub fn daily_summary(&self, index: usize) -> Option<DailySummary> {
        if index >= self.day_count() {
            return None;
        }
        let d = &self.daily;
        Some(DailySummary {
            date: d.time[index].clone(),
            min_c: value_at(&d.temperature_min, index),
            max_c: value_at(&d.temperature_max, index),
            weather_code: value_at(&d.weather_code, index),
            precipitation_max: value_at(&d.precipitation_probability_max, index),
        })
    }

    pub fn daily_summaries(&self) -> Vec<DailySummary> {
        (0..self.day_count()).filter_map(|i| self.daily_summary(i)).collect()
    }

    /// Check that every non-empty series has the length of its `time` array.
    ///
    /// Series the provider did not return at all are allowed to be empty.
    pub fn check_alignment(&self) -> Result<(), String> {
        fn check(series: &str, field: &str, len: usize, expected: usize) -> Result<(), String> {
            if len == 0 || len == expected {
                Ok(())
            } else {
                Err(format!("{series}.{field} has {len} entries, expected {expected}"))
            }
        }

        let h = &self.hourly;
        let n = h.time.len();
        check("hourly", "temperature_2m", h.temperature.len(), n)?;
        check("hourly", "weather_code", h.weather_code.len(), n)?;
        check("hourly", "precipitation_probability", h.precipitation_probability.len(), n)?;
        check("hourly", "relative_humidity_2m", h.humidity.len(), n)?;
        check("hourly", "wind_speed_10m", h.wind_speed.len(), n)?;
        check("hourly", "pressure_msl", h.pressure.len(), n)?;

        let d = &self.daily;
        let n = d.time.len();
        check("daily", "temperature_2m_max", d.temperature_max.len(), n)?;
        check("daily", "temperature_2m_min", d.temperature_min.len(), n)?;
        check("daily", "weather_code", d.weather_code.len(), n)?;
        check("daily", "precipitation_probability_max", d.precipitation_probability_max.len(), n)?;

        Ok(())
    }
}

/// Value of a nullable series at `index`, `None` when out of range or null.
pub fn value_at<T: Copy>(series: &[Option<T>], index: usize) -> Option<T> {
    series.get(index).copied().flatten()
}
