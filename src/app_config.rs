/*!
 * Application configuration module
 * This module handles the application configuration including loading,
 * validating and saving configuration settings.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default document language (full name, e.g. "English", "Tamil")
    #[serde(default = "default_language")]
    pub language: String,

    /// Assistant (text generation) config
    pub assistant: AssistantConfig,

    /// Speech capture and playback config
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text generation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssistantProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: Anthropic
    Anthropic,
}

impl AssistantProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }
}

// Implement Display trait for AssistantProvider
impl std::fmt::Display for AssistantProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for AssistantProvider
impl std::str::FromStr for AssistantProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: AssistantProvider) -> Self {
        match provider_type {
            AssistantProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            AssistantProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_anthropic_timeout_secs(),
            },
        }
    }
}

/// Assistant service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Text generation provider to use
    #[serde(default)]
    pub provider: AssistantProvider,

    /// Available text generation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common generation settings
    #[serde(default)]
    pub common: AssistantCommonConfig,
}

/// Common generation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssistantCommonConfig {
    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens to generate per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AssistantCommonConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Speech capture and playback configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Transcription service endpoint (OpenAI-compatible /audio/transcriptions)
    #[serde(default = "default_stt_endpoint")]
    pub stt_endpoint: String,

    /// Transcription model name
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// API key for the transcription service (empty for local servers)
    #[serde(default = "String::new")]
    pub stt_api_key: String,

    /// Seconds to wait for speech before giving up
    #[serde(default = "default_listen_timeout_secs")]
    pub listen_timeout_secs: u64,

    /// Maximum seconds captured for a single question
    #[serde(default = "default_phrase_limit_secs")]
    pub phrase_limit_secs: u64,

    /// Synthesis service endpoint (OpenAI-compatible /audio/speech)
    #[serde(default = "default_tts_endpoint")]
    pub tts_endpoint: String,

    /// Synthesis model name
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Synthesis voice name
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,

    /// API key for the synthesis service (empty for local servers)
    #[serde(default = "String::new")]
    pub tts_api_key: String,

    /// Whether playback of explanations starts enabled
    #[serde(default = "default_true")]
    pub tts_enabled: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_endpoint: default_stt_endpoint(),
            stt_model: default_stt_model(),
            stt_api_key: String::new(),
            listen_timeout_secs: default_listen_timeout_secs(),
            phrase_limit_secs: default_phrase_limit_secs(),
            tts_endpoint: default_tts_endpoint(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
            tts_api_key: String::new(),
            tts_enabled: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "English".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_anthropic_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_true() -> bool {
    true
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku".to_string()
}

fn default_stt_endpoint() -> String {
    "https://api.groq.com/openai/v1/audio/transcriptions".to_string()
}

fn default_stt_model() -> String {
    "whisper-large-v3-turbo".to_string()
}

fn default_listen_timeout_secs() -> u64 {
    5
}

fn default_phrase_limit_secs() -> u64 {
    20
}

fn default_tts_endpoint() -> String {
    "https://api.openai.com/v1/audio/speech".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_voice() -> String {
    "alloy".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(anyhow!("Document language must not be empty"));
        }

        // Validate API key for all providers except Ollama
        match self.assistant.provider {
            AssistantProvider::Anthropic => {
                let api_key = self.assistant.get_api_key();
                if api_key.is_empty() {
                    return Err(anyhow!("Assistant API key is required for Anthropic provider"));
                }
            }
            AssistantProvider::Ollama => {}
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            assistant: AssistantConfig::default(),
            speech: SpeechConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl AssistantConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            AssistantProvider::Ollama => default_ollama_model(),
            AssistantProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Set the model for the active provider
    pub fn set_model(&mut self, model: &str) {
        let provider_str = self.provider.to_lowercase_string();
        if let Some(provider_config) = self
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.model = model.to_string();
        } else {
            let mut provider_config = ProviderConfig::new(self.provider.clone());
            provider_config.model = model.to_string();
            self.available_providers.push(provider_config);
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        // Default fallback - Ollama doesn't use API keys
        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            AssistantProvider::Ollama => default_ollama_endpoint(),
            AssistantProvider::Anthropic => default_anthropic_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        match self.provider {
            AssistantProvider::Ollama => default_timeout_secs(),
            AssistantProvider::Anthropic => default_anthropic_timeout_secs(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: AssistantProvider::default(),
            available_providers: Vec::new(),
            common: AssistantCommonConfig::default(),
        };

        // Add default providers
        config
            .available_providers
            .push(ProviderConfig::new(AssistantProvider::Ollama));
        config
            .available_providers
            .push(ProviderConfig::new(AssistantProvider::Anthropic));

        config
    }
}
