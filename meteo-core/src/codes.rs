//! WMO weather interpretation codes as reported by Open-Meteo.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

/// One row of the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeEntry {
    pub code: i32,
    pub info: WeatherInfo,
}

/// Description and icon shown for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherInfo {
    pub description: &'static str,
    pub icon: &'static str,
}

/// Returned for any code missing from [`WEATHER_CODES`].
pub const UNKNOWN: WeatherInfo = WeatherInfo { description: "Unknown", icon: "❓" };

const fn entry(code: i32, description: &'static str, icon: &'static str) -> WeatherCodeEntry {
    WeatherCodeEntry { code, info: WeatherInfo { description, icon } }
}

pub const WEATHER_CODES: &[WeatherCodeEntry] = &[
    entry(0, "Clear sky", "☀️"),
    entry(1, "Mainly clear", "🌤️"),
    entry(2, "Partly cloudy", "⛅"),
    entry(3, "Overcast", "☁️"),
    entry(45, "Fog", "☁️"),
    entry(48, "Freezing fog", "❄️☁️"),
    entry(51, "Light drizzle", "🌦️"),
    entry(53, "Moderate drizzle", "🌧️"),
    entry(55, "Dense drizzle", "🌧️"),
    entry(61, "Light rain", "🌧️"),
    entry(63, "Moderate rain", "🌧️"),
    entry(65, "Heavy rain", "⛈️"),
    entry(71, "Light snow", "🌨️"),
    entry(73, "Moderate snow", "🌨️"),
    entry(75, "Heavy snow", "🌨️"),
    entry(77, "Snow grains", "🌨️"),
    entry(80, "Rain showers", "🌦️"),
    entry(81, "Moderate rain showers", "🌧️"),
    entry(82, "Violent rain showers", "⛈️"),
    entry(85, "Slight snow showers", "🌨️"),
    entry(86, "Heavy snow showers", "🌨️"),
    entry(95, "Thunderstorm", "⛈️"),
    entry(96, "Thunderstorm with hail", "⛈️"),
    entry(99, "Severe thunderstorm with hail", "⛈️"),
];

/// Look up description and icon for a WMO code.
pub fn weather_info(code: i32) -> WeatherInfo {
    WEATHER_CODES
        .iter()
        .find(|entry| entry.code == code)
        .map(|entry| entry.info)
        .unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_is_returned_verbatim() {
        for entry in WEATHER_CODES {
            assert_eq!(weather_info(entry.code), entry.info, "code {}", entry.code);
        }
    }

    #[test]
    fn table_codes_are_unique() {
        for (i, a) in WEATHER_CODES.iter().enumerate() {
            assert!(WEATHER_CODES[i + 1..].iter().all(|b| b.code != a.code));
        }
    }

    #[test]
    fn codes_outside_the_table_fall_back_to_unknown() {
        for code in -5..=150 {
            if WEATHER_CODES.iter().any(|e| e.code == code) {
                continue;
            }
            assert_eq!(weather_info(code), UNKNOWN, "code {code}");
        }
        assert_eq!(weather_info(i32::MAX), UNKNOWN);
    }

    #[test]
    fn known_samples() {
        assert_eq!(weather_info(0).description, "Clear sky");
        assert_eq!(weather_info(48).icon, "❄️☁️");
        assert_eq!(weather_info(99).description, "Severe thunderstorm with hail");
        assert_eq!(weather_info(56), WeatherInfo { description: "Unknown", icon: "❓" });
    }
}
