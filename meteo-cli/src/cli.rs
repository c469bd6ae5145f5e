use std::{fmt, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use meteo_core::{
    CommandRecognizer, Config, Recognizer, SpeechInput, SpeechStatus, WeatherApp, WeatherView,
    html::HtmlPage,
    render::{self, reading},
    source_from_config, speech,
};

use crate::term::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Current weather and forecast for any city")]
pub struct Cli {
    /// Without a command, shows the weather for the configured default city.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Dictate a city name, then show its weather.
    Listen {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Search and pick forecast days interactively.
    Browse,

    /// Set the default city and the dictation command.
    Configure,
}

#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub struct OutputArgs {
    /// Also show details for this forecast day (0 is today).
    #[arg(long)]
    day: Option<usize>,

    /// Print an HTML page instead of text.
    #[arg(long)]
    html: bool,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let mut config = Config::load()?;

        match self.command {
            None => show(&config, None, OutputArgs::default()).await,
            Some(Command::Show { city, output }) => show(&config, city, output).await,
            Some(Command::Listen { output }) => listen(&config, output).await,
            Some(Command::Browse) => browse(&config).await,
            Some(Command::Configure) => configure(&mut config),
        }
    }
}

fn recognizer(config: &Config) -> Option<Box<dyn Recognizer>> {
    CommandRecognizer::from_config(config).map(|r| Box::new(r) as Box<dyn Recognizer>)
}

async fn show(config: &Config, city: Option<String>, output: OutputArgs) -> Result<ExitCode> {
    let mut app = WeatherApp::new(source_from_config(config)?);
    let query = city.unwrap_or_else(|| config.default_city.clone());

    if output.html {
        let mut page = page_for(config);
        page.set_query(&query);

        let code = search_and_select(&mut app, &query, output.day, &mut page).await;
        println!("{}", page.render()?);
        Ok(code)
    } else {
        let mut term = TerminalView::new();
        Ok(search_and_select(&mut app, &query, output.day, &mut term).await)
    }
}

/// Page with the voice control disabled when no dictation command is set.
fn page_for(config: &Config) -> HtmlPage {
    let mut page = HtmlPage::new();
    if config.speech_command().is_none() {
        page.disable_voice(speech::UNSUPPORTED_TOOLTIP);
    }
    page
}

async fn listen(config: &Config, output: OutputArgs) -> Result<ExitCode> {
    let mut app = WeatherApp::new(source_from_config(config)?);

    if output.html {
        let mut page = HtmlPage::new();
        let mut speech = SpeechInput::new(recognizer(config), &mut page);
        let mut code = ExitCode::FAILURE;
        if app.listen(&mut speech, &mut page).await.is_ok() {
            code = select(&mut app, output.day, &mut page);
        }
        println!("{}", page.render()?);
        Ok(code)
    } else {
        let mut term = TerminalView::new();
        let mut speech = SpeechInput::new(recognizer(config), &mut term);
        match app.listen(&mut speech, &mut term).await {
            Ok(()) => Ok(select(&mut app, output.day, &mut term)),
            Err(_) => Ok(ExitCode::FAILURE),
        }
    }
}

async fn search_and_select<V>(
    app: &mut WeatherApp,
    query: &str,
    day: Option<usize>,
    view: &mut V,
) -> ExitCode
where
    V: WeatherView + ?Sized,
{
    if app.search(query, view).await.is_err() {
        return ExitCode::FAILURE;
    }
    select(app, day, view)
}

fn select<V: WeatherView + ?Sized>(app: &mut WeatherApp, day: Option<usize>, view: &mut V) -> ExitCode {
    match day {
        Some(index) if app.select_day(index, view).is_none() => {
            view.show_notice(&format!("No forecast available for day {index}."));
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    }
}

/// Entry in the day picker.
enum DayChoice {
    Day { index: usize, text: String },
    NewSearch,
}

impl fmt::Display for DayChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayChoice::Day { text, .. } => f.write_str(text),
            DayChoice::NewSearch => f.write_str("🔎 New search"),
        }
    }
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

async fn browse(config: &Config) -> Result<ExitCode> {
    let mut app = WeatherApp::new(source_from_config(config)?);
    let mut term = TerminalView::new();
    let mut last_city = config.default_city.clone();

    loop {
        let query = match Text::new("City:").with_default(&last_city).prompt() {
            Ok(query) => query,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err.into()),
        };

        if app.search(&query, &mut term).await.is_err() {
            continue;
        }
        last_city = query.trim().to_string();

        if !pick_days(&mut app, &mut term)? {
            break;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Day picker for the stored forecast. `Ok(false)` means the user quit.
fn pick_days(app: &mut WeatherApp, term: &mut TerminalView) -> Result<bool> {
    loop {
        let Some(snapshot) = app.state().snapshot() else {
            return Ok(true);
        };
        let strip = render::forecast_strip(snapshot, term.selected_day());

        let mut choices: Vec<DayChoice> = strip
            .days
            .iter()
            .map(|d| DayChoice::Day {
                index: d.index,
                text: format!(
                    "{} {}  {} - {}  {}",
                    d.label,
                    d.icon,
                    reading(d.min_c, "°"),
                    reading(d.max_c, "°"),
                    d.description
                ),
            })
            .collect();
        choices.push(DayChoice::NewSearch);

        let cursor = strip.selected.unwrap_or(0);
        match Select::new("Forecast day:", choices).with_starting_cursor(cursor).prompt() {
            Ok(DayChoice::Day { index, .. }) => {
                app.select_day(index, term);
            }
            Ok(DayChoice::NewSearch) => return Ok(true),
            Err(err) if is_cancel(&err) => return Ok(false),
            Err(err) => return Err(err.into()),
        }
    }
}

fn configure(config: &mut Config) -> Result<ExitCode> {
    let path = Config::config_file_path()?;
    println!("Editing {}", path.display());

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()?;
    config.set_default_city(&city)?;

    let current = config.speech.command.join(" ");
    let command = Text::new("Dictation command (blank to disable voice input):")
        .with_default(&current)
        .with_help_message("A program that records one utterance and prints the transcript")
        .prompt()?;
    config.set_speech_command(&command);

    config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(ExitCode::SUCCESS)
}
