use crate::{
    WeatherError, pipeline,
    provider::WeatherSource,
    render::{self, DayDetailView},
    speech::SpeechInput,
    state::AppState,
    ui::{SpeechStatus, WeatherView},
};

/// Ties the fetch pipeline, the stored state and the render layer together.
///
/// `search` takes `&mut self`, so triggers are handled one at a time and the
/// last one to finish is what stays on screen.
#[derive(Debug)]
pub struct WeatherApp {
    source: Box<dyn WeatherSource>,
    state: AppState,
}

impl WeatherApp {
    pub fn new(source: Box<dyn WeatherSource>) -> Self {
        Self { source, state: AppState::default() }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Search for `query` and render the outcome into `view`.
    ///
    /// Blank input only produces a notice. Any other failure replaces the
    /// current-conditions panel with the message and clears the forecast,
    /// leaving the previous snapshot stored.
    pub async fn search<V>(&mut self, query: &str, view: &mut V) -> Result<(), WeatherError>
    where
        V: WeatherView + ?Sized,
    {
        self.state.set_query(query);

        match pipeline::run(self.source.as_ref(), query).await {
            Ok(result) => {
                view.show_current(&render::current_view(&result.place, &result.snapshot));
                view.show_forecast(&render::forecast_strip(&result.snapshot, None));
                self.state.store(result);
                Ok(())
            }
            Err(WeatherError::InputEmpty) => {
                view.show_notice(&WeatherError::InputEmpty.to_string());
                Err(WeatherError::InputEmpty)
            }
            Err(err) => {
                tracing::warn!(error = %err, detail = err.detail().unwrap_or_default(), "search failed");
                view.show_error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Open the detail panel for a forecast strip entry of the stored snapshot.
    pub fn select_day<V>(&mut self, index: usize, view: &mut V) -> Option<DayDetailView>
    where
        V: WeatherView + ?Sized,
    {
        let snapshot = self.state.snapshot()?;
        if index >= render::strip_len(snapshot) {
            return None;
        }
        let detail = render::day_detail(snapshot, index)?;
        self.state.select_day(index);
        view.show_detail(&detail);
        view.mark_selected(index);
        Some(detail)
    }

    /// One voice session followed by a search for the transcript.
    pub async fn listen<V>(&mut self, speech: &mut SpeechInput, view: &mut V) -> Result<(), WeatherError>
    where
        V: WeatherView + SpeechStatus + ?Sized,
    {
        let transcript = speech.listen(view).await?;
        self.search(&transcript, view).await
    }
}
