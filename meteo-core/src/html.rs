//! HTML presenter: one fragment per panel, and a page that holds them.
//!
//! Panels are addressed by the fixed ids in [`ids`].

use html_builder::{Buffer, Html5};
use std::fmt::{self, Write};

use crate::{
    render::{CurrentView, DayDetailView, ForecastStripView, reading},
    ui::{SpeechStatus, WeatherView},
};

pub mod ids {
    pub const CITY_INPUT: &str = "city-input";
    pub const SEARCH_BUTTON: &str = "search-button";
    pub const VOICE_BUTTON: &str = "voice-button";
    pub const VOICE_STATUS: &str = "voice-status";
    pub const NOTICE: &str = "notice";
    pub const CURRENT: &str = "current-weather";
    pub const FORECAST: &str = "forecast";
    pub const SELECTED_DAY: &str = "selected-day";
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn current_fragment(view: &CurrentView) -> Result<String, fmt::Error> {
    let mut buf = Buffer::new();
    {
        write!(buf.div().attr("class=\"city\""), "📍 {}", escape(&view.place))?;

        let mut main = buf.div().attr("class=\"main-temperature\"");
        write!(main.div().attr("class=\"icon\""), "{}", view.icon)?;
        write!(main.div(), "{}°C", view.temperature_c)?;
    }
    {
        write!(buf.div().attr("class=\"description\""), "{}", view.description)?;

        let mut grid = buf.div().attr("class=\"grid-info\"");
        info_item(&mut grid, "Feels Like", &format!("{}°C", view.feels_like_c))?;
        info_item(&mut grid, "Humidity", &reading(view.humidity_pct, "%"))?;
        info_item(&mut grid, "Wind", &reading(view.wind_kmh, " km/h"))?;
        info_item(&mut grid, "Pressure", &reading(view.pressure_hpa, " hPa"))?;
    }
    Ok(buf.finish())
}

pub fn forecast_fragment(view: &ForecastStripView) -> Result<String, fmt::Error> {
    let mut buf = Buffer::new();
    {
        write!(
            buf.div().attr("class=\"forecast-title\""),
            "📅 {}-Day Forecast",
            view.days.len()
        )?;

        let mut days = buf.div().attr("class=\"forecast-days\"");
        for day in &view.days {
            let class = if view.selected == Some(day.index) {
                "forecast-day selected"
            } else {
                "forecast-day"
            };
            let attrs = format!("class=\"{class}\" data-index=\"{}\"", day.index);
            let mut item = days.div().attr(&attrs);
            let href_attr = format!("class=\"day-name\" href=\"?day={}\"", day.index);
            write!(item.a().attr(&href_attr), "{}", escape(&day.label))?;
            write!(item.div().attr("class=\"icon\""), "{}", day.icon)?;
            write!(
                item.div().attr("class=\"day-temp\""),
                "{} - {}",
                reading(day.min_c, "°"),
                reading(day.max_c, "°")
            )?;
            write!(item.div().attr("class=\"day-desc\""), "{}", day.description)?;
        }
    }
    Ok(buf.finish())
}

pub fn detail_fragment(view: &DayDetailView) -> Result<String, fmt::Error> {
    let d = &view.details;
    let mut buf = Buffer::new();
    {
        write!(buf.div().attr("class=\"selected-day-title\""), "📅 {}", escape(&view.title))?;
        write!(buf.div().attr("class=\"selected-day-icon\""), "{}", view.icon)?;
        write!(buf.div().attr("class=\"description\""), "{}", view.description)?;

        let mut info = buf.div().attr("class=\"selected-day-info\"");
        info_item(&mut info, "Min", &reading(view.min_c, "°C"))?;
        info_item(&mut info, "Max", &reading(view.max_c, "°C"))?;
        info_item(&mut info, "Humidity", &reading(d.humidity_pct, "%"))?;
        info_item(&mut info, "Wind", &reading(d.wind_kmh, " km/h"))?;
        info_item(&mut info, "Pressure", &reading(d.pressure_hpa, " hPa"))?;
        info_item(&mut info, "Chance of Rain", &reading(d.precipitation_pct, "%"))?;
    }
    Ok(buf.finish())
}

pub fn error_fragment(message: &str) -> Result<String, fmt::Error> {
    let mut buf = Buffer::new();
    write!(buf.p().attr("class=\"error\""), "❌ Error: {}", escape(message))?;
    Ok(buf.finish())
}

fn info_item(parent: &mut html_builder::Node<'_>, label: &str, value: &str) -> fmt::Result {
    let mut item = parent.div().attr("class=\"info-item\"");
    write!(item.div().attr("class=\"info-label\""), "{label}")?;
    write!(item.div().attr("class=\"info-value\""), "{}", escape(value))
}

#[derive(Debug, Clone, Default, PartialEq)]
enum CurrentPanel {
    #[default]
    Empty,
    Weather(CurrentView),
    Error(String),
}

/// A whole page, filled in through [`WeatherView`] and [`SpeechStatus`].
#[derive(Debug, Clone, Default)]
pub struct HtmlPage {
    query: String,
    notice: String,
    voice_status: String,
    voice_disabled: Option<String>,
    current: CurrentPanel,
    forecast: Option<ForecastStripView>,
    detail: Option<DayDetailView>,
}

impl HtmlPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self) -> Result<String, fmt::Error> {
        let current = match &self.current {
            CurrentPanel::Empty => String::new(),
            CurrentPanel::Weather(view) => current_fragment(view)?,
            CurrentPanel::Error(message) => error_fragment(message)?,
        };
        let forecast = match &self.forecast {
            Some(view) => forecast_fragment(view)?,
            None => String::new(),
        };
        let detail = match &self.detail {
            Some(view) => detail_fragment(view)?,
            None => String::new(),
        };

        let mut buf = Buffer::new();
        {
            let mut html = buf.html().attr("lang=\"en\"");
            {
                let mut head = html.head();
                write!(head, "<meta charset=\"utf-8\">")?;
                write!(head.title(), "Weather")?;
            }

            let mut body = html.body();
            {
                let mut search = body.div().attr("class=\"search\"");
                write!(
                    search,
                    "<input id=\"{}\" type=\"text\" placeholder=\"City\" value=\"{}\">",
                    ids::CITY_INPUT,
                    escape(&self.query)
                )?;
                write!(search.button().attr(&id_attr(ids::SEARCH_BUTTON)), "Search")?;

                let voice_attrs = match &self.voice_disabled {
                    Some(tooltip) => format!(
                        "id=\"{}\" disabled title=\"{}\"",
                        ids::VOICE_BUTTON,
                        escape(tooltip)
                    ),
                    None => id_attr(ids::VOICE_BUTTON),
                };
                write!(search.button().attr(&voice_attrs), "🎤")?;
            }
            write!(body.div().attr(&id_attr(ids::VOICE_STATUS)), "{}", escape(&self.voice_status))?;
            write!(body.div().attr(&id_attr(ids::NOTICE)), "{}", escape(&self.notice))?;
            write!(body.section().attr(&id_attr(ids::CURRENT)), "{current}")?;
            write!(body.section().attr(&id_attr(ids::FORECAST)), "{forecast}")?;

            let detail_attrs = if detail.is_empty() {
                format!("id=\"{}\" style=\"display: none\"", ids::SELECTED_DAY)
            } else {
                id_attr(ids::SELECTED_DAY)
            };
            write!(body.section().attr(&detail_attrs), "{detail}")?;
        }
        Ok(buf.finish())
    }
}

fn id_attr(id: &str) -> String {
    format!("id=\"{id}\"")
}

impl WeatherView for HtmlPage {
    fn show_notice(&mut self, message: &str) {
        self.notice = message.to_string();
    }

    fn show_current(&mut self, view: &CurrentView) {
        self.notice.clear();
        self.current = CurrentPanel::Weather(view.clone());
    }

    fn show_forecast(&mut self, view: &ForecastStripView) {
        self.forecast = Some(view.clone());
        self.detail = None;
    }

    fn show_error(&mut self, message: &str) {
        self.notice.clear();
        self.current = CurrentPanel::Error(message.to_string());
        self.forecast = None;
        self.detail = None;
    }

    fn show_detail(&mut self, view: &DayDetailView) {
        self.detail = Some(view.clone());
    }

    fn mark_selected(&mut self, index: usize) {
        if let Some(strip) = self.forecast.as_mut() {
            strip.selected = Some(index);
        }
    }
}

impl SpeechStatus for HtmlPage {
    fn set_voice_status(&mut self, status: &str) {
        self.voice_status = status.to_string();
    }

    fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
    }

    fn disable_voice(&mut self, tooltip: &str) {
        self.voice_disabled = Some(tooltip.to_string());
    }
}
