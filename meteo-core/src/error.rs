use thiserror::Error;

/// Everything that can go wrong between a search trigger and a rendered panel.
///
/// The `Display` text is the message shown to the user; the extra fields
/// are for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Please enter a city name.")]
    InputEmpty,

    #[error("Error fetching city")]
    GeocodeTransport { detail: String },

    #[error("City not found")]
    CityNotFound { query: String },

    #[error("Error fetching weather data")]
    ForecastTransport { detail: String },

    #[error("Speech recognition is not supported")]
    SpeechUnavailable,

    #[error("Error: {0}")]
    SpeechRecognition(String),
}

impl WeatherError {
    /// Diagnostic detail for logging, if the variant carries any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            WeatherError::GeocodeTransport { detail } | WeatherError::ForecastTransport { detail } => {
                Some(detail)
            }
            WeatherError::CityNotFound { query } => Some(query),
            WeatherError::SpeechRecognition(reason) => Some(reason),
            WeatherError::InputEmpty | WeatherError::SpeechUnavailable => None,
        }
    }
}
