use anyhow::{anyhow, Result};
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama client for interacting with a local Ollama server
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Creation timestamp
    pub created_at: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: None,
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the generation temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        let options = self.options.get_or_insert(GenerationOptions {
            temperature: None,
            num_predict: None,
        });
        options.temperature = Some(temperature);
        self
    }

    /// Cap the number of generated tokens
    pub fn num_predict(mut self, num_predict: u32) -> Self {
        let options = self.options.get_or_insert(GenerationOptions {
            temperature: None,
            num_predict: None,
        });
        options.num_predict = Some(num_predict);
        self
    }

    /// Disable response streaming; the full text arrives in one body
    pub fn no_stream(mut self) -> Self {
        self.stream = Some(false);
        self
    }
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Complete a generation request
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let api_url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send request to Ollama API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(anyhow!("Ollama API error ({}): {}", status, error_text));
        }

        let generation_response = response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| anyhow!("Failed to parse Ollama API response: {}", e))?;

        Ok(generation_response)
    }
}
