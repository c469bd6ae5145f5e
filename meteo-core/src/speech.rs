//! Voice input: one recognition session turns an utterance into a query.
//!
//! A session walks `Idle -> Listening -> Done | Error -> Idle`. Each
//! transition has its own handler that updates the status line through
//! [`SpeechStatus`]; the handlers never touch the weather panels.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::{fmt::Debug, process::Stdio};
use tokio::process::Command;

use crate::{Config, WeatherError, ui::SpeechStatus};

pub const UNSUPPORTED_TOOLTIP: &str = "Speech recognition is not supported";
pub const LISTENING_STATUS: &str = "🎤 Listening...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpeechState {
    #[default]
    Idle,
    Listening,
    Done(String),
    Error(String),
}

/// A speech-to-text backend producing at most one transcript per call.
#[async_trait]
pub trait Recognizer: Send + Sync + Debug {
    async fn recognize(&self) -> Result<String>;
}

#[derive(Debug)]
pub struct SpeechInput {
    recognizer: Option<Box<dyn Recognizer>>,
    state: SpeechState,
}

impl SpeechInput {
    /// Without a recognizer the voice control is disabled right away.
    pub fn new<U>(recognizer: Option<Box<dyn Recognizer>>, ui: &mut U) -> Self
    where
        U: SpeechStatus + ?Sized,
    {
        if recognizer.is_none() {
            ui.disable_voice(UNSUPPORTED_TOOLTIP);
        }
        Self { recognizer, state: SpeechState::Idle }
    }

    pub fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn state(&self) -> &SpeechState {
        &self.state
    }

    pub fn on_start<U: SpeechStatus + ?Sized>(&mut self, ui: &mut U) {
        self.state = SpeechState::Listening;
        ui.set_voice_status(LISTENING_STATUS);
    }

    pub fn on_result<U: SpeechStatus + ?Sized>(&mut self, transcript: &str, ui: &mut U) {
        ui.set_query(transcript);
        ui.set_voice_status(&format!("You said: \"{transcript}\""));
        self.state = SpeechState::Done(transcript.to_string());
    }

    pub fn on_error<U: SpeechStatus + ?Sized>(&mut self, reason: &str, ui: &mut U) {
        ui.set_voice_status(&format!("❌ Error: {reason}"));
        self.state = SpeechState::Error(reason.to_string());
    }

    /// Close the session: clear the status line and return how it ended.
    pub fn on_end<U: SpeechStatus + ?Sized>(&mut self, ui: &mut U) -> SpeechState {
        ui.set_voice_status("");
        std::mem::take(&mut self.state)
    }

    /// Run one session and return the transcript.
    pub async fn listen<U: SpeechStatus + ?Sized>(&mut self, ui: &mut U) -> Result<String, WeatherError> {
        if !self.is_available() {
            return Err(WeatherError::SpeechUnavailable);
        }

        self.on_start(ui);
        let outcome = match self.recognizer.as_deref() {
            Some(recognizer) => recognizer.recognize().await,
            None => Err(anyhow!("recognizer went away")),
        };

        match outcome {
            Ok(transcript) if !transcript.trim().is_empty() => self.on_result(transcript.trim(), ui),
            Ok(_) => self.on_error("no-speech", ui),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "speech recognition failed");
                self.on_error(&e.to_string(), ui)
            }
        }

        match self.on_end(ui) {
            SpeechState::Done(transcript) => Ok(transcript),
            SpeechState::Error(reason) => Err(WeatherError::SpeechRecognition(reason)),
            SpeechState::Idle | SpeechState::Listening => {
                Err(WeatherError::SpeechRecognition("aborted".to_string()))
            }
        }
    }
}

/// Runs an external dictation program and reads the transcript from stdout.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .speech_command()
            .map(|(program, args)| Self::new(program, args.to_vec()))
    }
}

#[async_trait]
impl Recognizer for CommandRecognizer {
    async fn recognize(&self) -> Result<String> {
        tracing::debug!(program = %self.program, "starting speech command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("Failed to run speech command `{}`", self.program))?;

        if !output.status.success() {
            return Err(anyhow!(
                "speech command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        let transcript =
            String::from_utf8(output.stdout).context("Speech command printed invalid UTF-8")?;
        Ok(transcript.trim().to_string())
    }
}
