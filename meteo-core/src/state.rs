use crate::{
    model::{Place, WeatherSnapshot},
    pipeline::SearchResult,
    render,
};

/// Everything the UI remembers between triggers.
///
/// The snapshot and its place are only ever replaced together through
/// [`AppState::store`], so readers never see a place paired with another
/// city's forecast.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    query: String,
    last: Option<SearchResult>,
    selected_day: Option<usize>,
}

impl AppState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Replace the stored snapshot. Clears the day selection.
    pub fn store(&mut self, result: SearchResult) {
        tracing::info!(
            place = %result.place.display_name(),
            days = result.snapshot.day_count(),
            "snapshot stored"
        );
        self.last = Some(result);
        self.selected_day = None;
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.last.as_ref().map(|r| &r.snapshot)
    }

    pub fn place(&self) -> Option<&Place> {
        self.last.as_ref().map(|r| &r.place)
    }

    pub fn selected_day(&self) -> Option<usize> {
        self.selected_day
    }

    /// Mark a day as selected if the forecast strip shows it.
    pub fn select_day(&mut self, index: usize) -> bool {
        let exists = self
            .snapshot()
            .is_some_and(|s| index < render::strip_len(s));
        if exists {
            self.selected_day = Some(index);
        }
        exists
    }
}
