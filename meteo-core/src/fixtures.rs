//! Deterministic snapshots for unit tests.
//!
//! Hourly values are derived from (day, hour) so tests can compute the
//! expected reading: humidity `40 + 5d + h`, wind `10d + h/2`,
//! pressure `1000 + d + h/10`, precipitation `10d + h`.

use chrono::{Duration, NaiveDate};

use crate::model::{CurrentConditions, DailySeries, HourlySeries, Place, WeatherSnapshot};

pub fn lisbon() -> Place {
    Place {
        name: "Lisbon".into(),
        country: Some("Portugal".into()),
        latitude: 38.71667,
        longitude: -9.13333,
    }
}

pub fn date(day: usize) -> String {
    let first = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    (first + Duration::days(day as i64)).format("%Y-%m-%d").to_string()
}

pub fn humidity(day: usize, hour: usize) -> f64 {
    40.0 + 5.0 * day as f64 + hour as f64
}

pub fn wind(day: usize, hour: usize) -> f64 {
    10.0 * day as f64 + hour as f64 / 2.0
}

pub fn pressure(day: usize, hour: usize) -> f64 {
    1000.0 + day as f64 + hour as f64 / 10.0
}

pub fn precipitation(day: usize, hour: usize) -> f64 {
    10.0 * day as f64 + hour as f64
}

/// A snapshot with `days` days and 24 hourly entries per day.
pub fn snapshot(days: usize) -> WeatherSnapshot {
    snapshot_with_hours(days, 0..24)
}

pub fn snapshot_with_hours(days: usize, hours: std::ops::Range<usize>) -> WeatherSnapshot {
    const CODES: [i32; 7] = [0, 1, 2, 3, 61, 95, 45];

    let mut hourly = HourlySeries::default();
    for d in 0..days {
        for h in hours.clone() {
            hourly.time.push(format!("{}T{h:02}:00", date(d)));
            hourly.temperature.push(Some(15.0 + h as f64 / 2.0));
            hourly.weather_code.push(Some(CODES[d % CODES.len()]));
            hourly.precipitation_probability.push(Some(precipitation(d, h)));
            hourly.humidity.push(Some(humidity(d, h)));
            hourly.wind_speed.push(Some(wind(d, h)));
            hourly.pressure.push(Some(pressure(d, h)));
        }
    }

    let daily = DailySeries {
        time: (0..days).map(date).collect(),
        temperature_max: (0..days).map(|d| Some(20.4 + d as f64)).collect(),
        temperature_min: (0..days).map(|d| Some(12.5 + d as f64)).collect(),
        weather_code: (0..days).map(|d| Some(CODES[d % CODES.len()])).collect(),
        precipitation_probability_max: (0..days).map(|d| Some(10.0 * d as f64 + 5.0)).collect(),
    };

    WeatherSnapshot {
        timezone: Some("Europe/Lisbon".into()),
        current: CurrentConditions {
            time: Some(format!("{}T15:00", date(0))),
            temperature: 21.6,
            feels_like: 20.5,
            weather_code: 1,
            humidity: Some(68.0),
            wind_speed: Some(14.4),
            pressure: Some(1018.6),
        },
        hourly,
        daily,
    }
}
