//! View models for the three weather panels.
//!
//! Everything here is a pure function of a [`WeatherSnapshot`]; turning a
//! view into markup or terminal text is up to the presenter.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::fmt::Display;

use crate::{
    codes::{UNKNOWN, WeatherInfo, weather_info},
    model::{Place, WeatherSnapshot, value_at},
};

/// How many days the forecast strip shows at most.
pub const FORECAST_DAYS: usize = 5;

/// Shown for any reading that could not be resolved.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub place: String,
    pub icon: &'static str,
    pub description: &'static str,
    pub temperature_c: i64,
    pub feels_like_c: i64,
    /// As reported, not rounded.
    pub humidity_pct: Option<f64>,
    pub wind_kmh: Option<i64>,
    pub pressure_hpa: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDayView {
    pub index: usize,
    pub label: String,
    pub icon: &'static str,
    pub description: &'static str,
    pub min_c: Option<i64>,
    pub max_c: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastStripView {
    pub days: Vec<ForecastDayView>,
    pub selected: Option<usize>,
}

/// Readings shown in the detail panel; `None` renders as [`PLACEHOLDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayDetails {
    pub humidity_pct: Option<i64>,
    pub wind_kmh: Option<i64>,
    pub pressure_hpa: Option<i64>,
    pub precipitation_pct: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayDetailView {
    pub index: usize,
    pub title: String,
    pub icon: &'static str,
    pub description: &'static str,
    pub min_c: Option<i64>,
    pub max_c: Option<i64>,
    pub details: DayDetails,
}

/// Round half toward positive infinity, so `-2.5` becomes `-2`.
pub fn round(value: f64) -> i64 {
    let r = value.round();
    // f64::round sends negative ties away from zero.
    if value - r == 0.5 { r as i64 + 1 } else { r as i64 }
}

fn daily_info(code: Option<i32>) -> WeatherInfo {
    code.map(weather_info).unwrap_or(UNKNOWN)
}

/// Number of entries in the forecast strip, which bounds day selection.
pub fn strip_len(snapshot: &WeatherSnapshot) -> usize {
    snapshot.day_count().min(FORECAST_DAYS)
}

/// `value` followed by `unit` (`"62%"`, `"14 km/h"`), or the placeholder.
pub fn reading<T: Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn current_view(place: &Place, snapshot: &WeatherSnapshot) -> CurrentView {
    let current = &snapshot.current;
    let info = weather_info(current.weather_code);

    CurrentView {
        place: place.display_name(),
        icon: info.icon,
        description: info.description,
        temperature_c: round(current.temperature),
        feels_like_c: round(current.feels_like),
        humidity_pct: current.humidity,
        wind_kmh: current.wind_speed.map(round),
        pressure_hpa: current.pressure.map(round),
    }
}

pub fn forecast_strip(snapshot: &WeatherSnapshot, selected: Option<usize>) -> ForecastStripView {
    let days = snapshot
        .daily_summaries()
        .into_iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(index, day)| {
            let info = daily_info(day.weather_code);
            ForecastDayView {
                index,
                label: short_day_label(&day.date),
                icon: info.icon,
                description: info.description,
                min_c: day.min_c.map(round),
                max_c: day.max_c.map(round),
            }
        })
        .collect::<Vec<_>>();

    let selected = selected.filter(|&i| i < days.len());
    ForecastStripView { days, selected }
}

/// Detail panel for one day, `None` if the snapshot has no such day.
pub fn day_detail(snapshot: &WeatherSnapshot, index: usize) -> Option<DayDetailView> {
    let day = snapshot.daily_summary(index)?;
    let info = daily_info(day.weather_code);

    Some(DayDetailView {
        index,
        title: long_date_label(&day.date),
        icon: info.icon,
        description: info.description,
        min_c: day.min_c.map(round),
        max_c: day.max_c.map(round),
        details: day_details(snapshot, index),
    })
}

/// Humidity, wind, pressure and chance of rain for a day.
///
/// Today reads the current conditions plus the day's maximum precipitation
/// probability. Later days read the hourly entry at noon, or the first
/// hourly entry of that date when there is no noon entry.
pub fn day_details(snapshot: &WeatherSnapshot, index: usize) -> DayDetails {
    let Some(date) = snapshot.daily.time.get(index).map(String::as_str).map(date_part) else {
        return DayDetails::default();
    };

    if index == 0 {
        let current = &snapshot.current;
        let daily = &snapshot.daily;
        let precipitation = daily
            .time
            .iter()
            .position(|t| t == date)
            .and_then(|i| value_at(&daily.precipitation_probability_max, i));

        return DayDetails {
            humidity_pct: current.humidity.map(round),
            wind_kmh: current.wind_speed.map(round),
            pressure_hpa: current.pressure.map(round),
            precipitation_pct: precipitation.map(round),
        };
    }

    let Some(hour) = representative_hour(&snapshot.hourly.time, date) else {
        return DayDetails::default();
    };
    let hourly = &snapshot.hourly;

    DayDetails {
        humidity_pct: value_at(&hourly.humidity, hour).map(round),
        wind_kmh: value_at(&hourly.wind_speed, hour).map(round),
        pressure_hpa: value_at(&hourly.pressure, hour).map(round),
        precipitation_pct: value_at(&hourly.precipitation_probability, hour).map(round),
    }
}

/// Index of the noon entry for `date`, else of its first entry.
fn representative_hour(times: &[String], date: &str) -> Option<usize> {
    let mut first = None;
    for (i, time) in times.iter().enumerate() {
        if !time.starts_with(date) {
            continue;
        }
        if hour_of(time) == Some(12) {
            return Some(i);
        }
        first.get_or_insert(i);
    }
    first
}

fn hour_of(time: &str) -> Option<u32> {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|t| t.hour())
}

fn date_part(time: &str) -> &str {
    time.get(..10).unwrap_or(time)
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_part(date), "%Y-%m-%d").ok()
}

/// "Sat 18"; the raw string if it is not a date.
pub fn short_day_label(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%a %-d").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// "Saturday, October 18, 2026"; the raw string if it is not a date.
pub fn long_date_label(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|| date.to_string())
}
