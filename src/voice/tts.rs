//! Text-to-speech playback.
//!
//! English uses the local system synthesizer so replies work offline; every
//! other language goes through a network synthesis call whose audio is
//! written to a temporary file and played to completion.

use std::fs::File;
use std::io::{BufReader, Write};
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde_json::json;

use crate::app_config::SpeechConfig;
use crate::errors::SpeechError;

/// Speech synthesizer for spoken explanations
pub struct SpeechSynthesizer {
    /// HTTP client for the synthesis service
    client: Client,
    /// Speech configuration
    config: SpeechConfig,
}

impl SpeechSynthesizer {
    /// Create a new synthesizer from the speech configuration
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Speak text aloud in the given two-letter language code
    ///
    /// Playback blocks until the audio finishes. Empty text is skipped.
    pub async fn speak(&self, text: &str, lang_code: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            warn!("Nothing to speak, skipping playback");
            return Ok(());
        }

        if lang_code == "en" {
            let utterance = text.to_string();
            tokio::task::spawn_blocking(move || speak_local(&utterance))
                .await
                .map_err(|e| SpeechError::Playback(format!("Playback task failed: {}", e)))?
        } else {
            self.speak_remote(text, lang_code).await
        }
    }

    /// Synthesize through the network service and play the resulting audio
    async fn speak_remote(&self, text: &str, lang_code: &str) -> Result<(), SpeechError> {
        debug!("Synthesizing {} chars ({})", text.len(), lang_code);

        let body = json!({
            "model": self.config.tts_model,
            "voice": self.config.tts_voice,
            "input": text,
            "language": lang_code,
            "response_format": "mp3",
        });

        let mut request = self.client.post(&self.config.tts_endpoint).json(&body);
        if !self.config.tts_api_key.is_empty() {
            request = request.bearer_auth(&self.config.tts_api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SpeechError::Service(format!("Synthesis request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(SpeechError::Service(format!(
                "Synthesis API error ({}): {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Service(format!("Failed to read audio body: {}", e)))?;

        // The temp file is removed when the handle drops, even on a playback
        // failure partway through.
        tokio::task::spawn_blocking(move || {
            let mut temp = tempfile::Builder::new()
                .prefix("legalens-tts-")
                .suffix(".mp3")
                .tempfile()
                .map_err(|e| SpeechError::Playback(format!("Failed to create temp file: {}", e)))?;
            temp.write_all(&audio)
                .map_err(|e| SpeechError::Playback(format!("Failed to write audio: {}", e)))?;

            play_file(temp.path())
        })
        .await
        .map_err(|e| SpeechError::Playback(format!("Playback task failed: {}", e)))?
    }
}

/// Speak English text through the local system synthesizer
fn speak_local(text: &str) -> Result<(), SpeechError> {
    let program = if cfg!(target_os = "macos") { "say" } else { "espeak" };

    let status = std::process::Command::new(program)
        .arg(text)
        .status()
        .map_err(|e| SpeechError::Playback(format!("Failed to run {}: {}", program, e)))?;

    if !status.success() {
        return Err(SpeechError::Playback(format!(
            "{} exited with status {}",
            program, status
        )));
    }

    Ok(())
}

/// Play an audio file to completion on the default output device
fn play_file(path: &std::path::Path) -> Result<(), SpeechError> {
    let (_stream, handle) = rodio::OutputStream::try_default()
        .map_err(|e| SpeechError::Playback(format!("No output device: {}", e)))?;
    let sink = rodio::Sink::try_new(&handle)
        .map_err(|e| SpeechError::Playback(format!("Failed to create sink: {}", e)))?;

    let file = File::open(path)
        .map_err(|e| SpeechError::Playback(format!("Failed to open audio file: {}", e)))?;
    let source = rodio::Decoder::new(BufReader::new(file))
        .map_err(|e| SpeechError::Playback(format!("Failed to decode audio: {}", e)))?;

    sink.append(source);
    sink.sleep_until_end();

    Ok(())
}
