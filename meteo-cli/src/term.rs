//! Plain-text presenter for the terminal.

use meteo_core::{
    SpeechStatus, WeatherView,
    render::{CurrentView, DayDetailView, ForecastStripView, reading},
};

/// Prints panels to stdout and voice status to stderr.
#[derive(Debug, Default)]
pub struct TerminalView {
    forecast: Option<ForecastStripView>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_day(&self) -> Option<usize> {
        self.forecast.as_ref().and_then(|f| f.selected)
    }
}

pub fn format_current(view: &CurrentView) -> String {
    format!(
        "📍 {}\n{}  {}°C  {}\nFeels like {}°C · Humidity {} · Wind {} · Pressure {}",
        view.place,
        view.icon,
        view.temperature_c,
        view.description,
        view.feels_like_c,
        reading(view.humidity_pct, "%"),
        reading(view.wind_kmh, " km/h"),
        reading(view.pressure_hpa, " hPa"),
    )
}

pub fn format_forecast(view: &ForecastStripView) -> String {
    let mut out = format!("📅 {}-Day Forecast", view.days.len());
    for day in &view.days {
        let marker = if view.selected == Some(day.index) { '>' } else { ' ' };
        out.push_str(&format!(
            "\n{marker} [{}] {:<7} {}  {} - {}  {}",
            day.index,
            day.label,
            day.icon,
            reading(day.min_c, "°"),
            reading(day.max_c, "°"),
            day.description
        ));
    }
    out
}

pub fn format_detail(view: &DayDetailView) -> String {
    let d = &view.details;
    format!(
        "📅 {}\n{}  {}\nMin {} · Max {}\nHumidity {} · Wind {} · Pressure {} · Chance of Rain {}",
        view.title,
        view.icon,
        view.description,
        reading(view.min_c, "°C"),
        reading(view.max_c, "°C"),
        reading(d.humidity_pct, "%"),
        reading(d.wind_kmh, " km/h"),
        reading(d.pressure_hpa, " hPa"),
        reading(d.precipitation_pct, "%"),
    )
}

impl WeatherView for TerminalView {
    fn show_notice(&mut self, message: &str) {
        eprintln!("⚠️  {message}");
    }

    fn show_current(&mut self, view: &CurrentView) {
        println!("{}\n", format_current(view));
    }

    fn show_forecast(&mut self, view: &ForecastStripView) {
        println!("{}\n", format_forecast(view));
        self.forecast = Some(view.clone());
    }

    fn show_error(&mut self, message: &str) {
        println!("❌ Error: {message}");
        self.forecast = None;
    }

    fn show_detail(&mut self, view: &DayDetailView) {
        println!("{}\n", format_detail(view));
    }

    fn mark_selected(&mut self, index: usize) {
        if let Some(strip) = self.forecast.as_mut() {
            strip.selected = Some(index);
        }
    }
}

impl SpeechStatus for TerminalView {
    fn set_voice_status(&mut self, status: &str) {
        if !status.is_empty() {
            eprintln!("{status}");
        }
    }

    fn set_query(&mut self, text: &str) {
        eprintln!("🔎 {text}");
    }

    fn disable_voice(&mut self, tooltip: &str) {
        eprintln!("🎤 {tooltip}.\nHint: set a dictation command with `meteo configure`.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteo_core::render::{DayDetails, ForecastDayView};

    fn strip() -> ForecastStripView {
        ForecastStripView {
            days: vec![
                ForecastDayView {
                    index: 0,
                    label: "Sun 18".into(),
                    icon: "☀️",
                    description: "Clear sky",
                    min_c: Some(13),
                    max_c: Some(20),
                },
                ForecastDayView {
                    index: 1,
                    label: "Mon 19".into(),
                    icon: "⛅",
                    description: "Partly cloudy",
                    min_c: Some(14),
                    max_c: None,
                },
            ],
            selected: Some(1),
        }
    }

    #[test]
    fn current_lines() {
        let view = CurrentView {
            place: "Lisbon, Portugal".into(),
            icon: "🌤️",
            description: "Mainly clear",
            temperature_c: 22,
            feels_like_c: 21,
            humidity_pct: Some(68.0),
            wind_kmh: Some(14),
            pressure_hpa: None,
        };

        let text = format_current(&view);

        assert!(text.starts_with("📍 Lisbon, Portugal\n"));
        assert!(text.contains("22°C  Mainly clear"));
        assert!(text.contains("Humidity 68%"));
        assert!(text.contains("Pressure —"));
    }

    #[test]
    fn forecast_marks_selection() {
        let text = format_forecast(&strip());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "📅 2-Day Forecast");
        assert!(lines[1].starts_with("  [0] Sun 18"));
        assert!(lines[2].starts_with("> [1] Mon 19"));
        assert!(lines[1].contains("13° - 20°"));
        assert!(lines[2].contains("14° - —"));
    }

    #[test]
    fn detail_lines() {
        let view = DayDetailView {
            index: 2,
            title: "Tuesday, October 20, 2026".into(),
            icon: "☁️",
            description: "Overcast",
            min_c: Some(15),
            max_c: Some(22),
            details: DayDetails {
                humidity_pct: Some(62),
                wind_kmh: Some(26),
                pressure_hpa: Some(1003),
                precipitation_pct: None,
            },
        };

        let text = format_detail(&view);

        assert!(text.contains("Tuesday, October 20, 2026"));
        assert!(text.contains("Min 15°C · Max 22°C"));
        assert!(text.contains("Chance of Rain —"));
    }

    #[test]
    fn selection_follows_the_strip() {
        let mut term = TerminalView::new();
        term.mark_selected(1);
        assert_eq!(term.selected_day(), None);

        term.forecast = Some(strip());
        term.mark_selected(0);
        assert_eq!(term.selected_day(), Some(0));

        term.show_error("City not found");
        assert_eq!(term.selected_day(), None);
    }
}
