//! Speech-to-text over an OpenAI-compatible transcription endpoint.

use std::time::Duration;

use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::app_config::SpeechConfig;
use crate::errors::SpeechError;
use crate::voice::capture;

/// Transcription response body
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    /// Transcribed text
    text: String,
}

/// Speech recognizer: capture a question from the microphone and transcribe it
pub struct SpeechRecognizer {
    /// HTTP client for the transcription service
    client: Client,
    /// Speech configuration (endpoints, timeouts, model names)
    config: SpeechConfig,
}

impl SpeechRecognizer {
    /// Create a new recognizer from the speech configuration
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Capture speech and return the transcribed text
    ///
    /// Capture runs up to the configured phrase limit, ending early once
    /// the speaker goes quiet. If nothing audible
    /// arrived within the listen timeout the result is
    /// `SpeechError::Unrecognized` without any network call; a transport or
    /// API failure is `SpeechError::Service`.
    pub async fn listen(&self, locale: &str) -> Result<String, SpeechError> {
        info!("Listening... please speak your question");

        let phrase_limit = Duration::from_secs(self.config.phrase_limit_secs);
        let listen_timeout = Duration::from_secs(self.config.listen_timeout_secs);

        let samples = tokio::task::spawn_blocking(move || capture::record_audio(phrase_limit))
            .await
            .map_err(|e| SpeechError::Device(format!("Capture task failed: {}", e)))??;

        if capture::starts_silent(&samples, listen_timeout) {
            return Err(SpeechError::Unrecognized);
        }

        let wav = capture::encode_wav(&samples)?;
        self.transcribe(wav, locale).await
    }

    /// Transcribe an in-memory WAV recording with a locale hint
    pub async fn transcribe(&self, wav: Vec<u8>, locale: &str) -> Result<String, SpeechError> {
        debug!("Transcribing {} bytes of audio (locale {})", wav.len(), locale);

        let part = Part::bytes(wav)
            .file_name("question.wav")
            .mime_str("audio/wav")
            .map_err(|e| SpeechError::Service(format!("Invalid audio part: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.config.stt_model.clone())
            .text("language", locale.to_string())
            .text("response_format", "json");

        let mut request = self.client.post(&self.config.stt_endpoint).multipart(form);
        if !self.config.stt_api_key.is_empty() {
            request = request.bearer_auth(&self.config.stt_api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SpeechError::Service(format!("Transcription request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(SpeechError::Service(format!(
                "Transcription API error ({}): {}",
                status, body
            )));
        }

        let transcription = response
            .json::<TranscriptionResponse>()
            .await
            .map_err(|e| SpeechError::Service(format!("Failed to parse transcription: {}", e)))?;

        let text = transcription.text.trim().to_string();
        if text.is_empty() {
            return Err(SpeechError::Unrecognized);
        }

        Ok(text)
    }
}
