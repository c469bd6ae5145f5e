//! Core library for the `meteo` weather client.
//!
//! This crate defines:
//! - Configuration handling
//! - The Open-Meteo client behind the `WeatherSource` seam
//! - The two-stage search pipeline (geocode, then forecast)
//! - View models and an HTML presenter for the weather panels
//! - Voice input as a small state machine
//!
//! It is used by `meteo-cli`, but any other front end can drive
//! [`WeatherApp`] through the [`WeatherView`] and [`SpeechStatus`] traits.

pub mod app;
pub mod codes;
pub mod config;
pub mod error;
pub mod html;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod speech;
pub mod state;
pub mod ui;

#[cfg(test)]
mod fixtures;

pub use app::WeatherApp;
pub use config::Config;
pub use error::WeatherError;
pub use model::{Place, WeatherSnapshot};
pub use provider::{WeatherSource, source_from_config};
pub use speech::{CommandRecognizer, Recognizer, SpeechInput};
pub use ui::{SpeechStatus, WeatherView};
