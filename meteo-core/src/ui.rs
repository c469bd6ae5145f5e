//! Seams between the core and whatever draws the panels.

use crate::render::{CurrentView, DayDetailView, ForecastStripView};

/// The weather panels of the UI surface.
pub trait WeatherView {
    /// Short message next to the input, e.g. when the query is blank.
    fn show_notice(&mut self, message: &str);

    fn show_current(&mut self, view: &CurrentView);

    fn show_forecast(&mut self, view: &ForecastStripView);

    /// Put `message` in the current-conditions panel and clear the forecast.
    fn show_error(&mut self, message: &str);

    fn show_detail(&mut self, view: &DayDetailView);

    /// Highlight exactly one forecast-strip entry.
    fn mark_selected(&mut self, index: usize);
}

/// The voice control and its status line.
pub trait SpeechStatus {
    /// Status line text; an empty string clears it.
    fn set_voice_status(&mut self, status: &str);

    /// Replace the contents of the search field.
    fn set_query(&mut self, text: &str);

    /// Disable the voice control and explain why.
    fn disable_voice(&mut self, tooltip: &str);
}
