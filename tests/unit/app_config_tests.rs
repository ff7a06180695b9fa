/*!
 * Tests for application configuration
 */

use std::str::FromStr;
use anyhow::Result;
use legalens::app_config::{Config, AssistantProvider, ProviderConfig};

/// Test the default configuration values
#[test]
fn test_defaultConfig_shouldUseOllamaAndEnglish() {
    let config = Config::default();

    assert_eq!(config.language, "English");
    assert_eq!(config.assistant.provider, AssistantProvider::Ollama);
    assert_eq!(config.assistant.available_providers.len(), 2);
    assert!(config.speech.tts_enabled);
    assert_eq!(config.speech.listen_timeout_secs, 5);
    assert_eq!(config.speech.phrase_limit_secs, 20);
}

/// Test provider getters resolve from the available_providers table
#[test]
fn test_assistantConfig_getters_shouldResolveActiveProvider() {
    let config = Config::default();

    assert_eq!(config.assistant.get_model(), "llama3.2:3b");
    assert_eq!(config.assistant.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.assistant.get_api_key(), "");
    assert_eq!(config.assistant.get_timeout_secs(), 30);
}

/// Test that switching the provider switches the resolved settings
#[test]
fn test_assistantConfig_withAnthropicProvider_shouldResolveAnthropicDefaults() {
    let mut config = Config::default();
    config.assistant.provider = AssistantProvider::Anthropic;

    assert_eq!(config.assistant.get_model(), "claude-3-haiku");
    assert_eq!(config.assistant.get_endpoint(), "https://api.anthropic.com");
    assert_eq!(config.assistant.get_timeout_secs(), 60);
}

/// Test validation of required values
#[test]
fn test_validate_withMissingAnthropicKey_shouldFail() {
    let mut config = Config::default();

    // Ollama needs no key
    assert!(config.validate().is_ok());

    config.assistant.provider = AssistantProvider::Anthropic;
    assert!(config.validate().is_err());

    // Providing the key makes it valid again
    if let Some(provider_config) = config
        .assistant
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "anthropic")
    {
        provider_config.api_key = "sk-test".to_string();
    }
    assert!(config.validate().is_ok());

    config.language = "  ".to_string();
    assert!(config.validate().is_err());
}

/// Test provider name parsing and display
#[test]
fn test_assistantProvider_fromStr_shouldAcceptLowercaseNames() -> Result<()> {
    assert_eq!(AssistantProvider::from_str("ollama")?, AssistantProvider::Ollama);
    assert_eq!(AssistantProvider::from_str("Anthropic")?, AssistantProvider::Anthropic);
    assert!(AssistantProvider::from_str("openai").is_err());

    assert_eq!(AssistantProvider::Ollama.to_string(), "ollama");
    assert_eq!(AssistantProvider::Anthropic.display_name(), "Anthropic");
    Ok(())
}

/// Test config JSON round trip with defaults filled in for missing fields
#[test]
fn test_config_fromJson_withMinimalInput_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "language": "Tamil",
        "assistant": {
            "provider": "ollama"
        }
    }"#;

    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.language, "Tamil");
    assert_eq!(config.assistant.provider, AssistantProvider::Ollama);
    assert_eq!(config.speech.stt_model, "whisper-large-v3-turbo");
    assert!(config.speech.tts_enabled);
    Ok(())
}

/// Test that a model override lands in the active provider's entry,
/// including on a config whose provider table does not list it yet
#[test]
fn test_setModel_shouldUpdateActiveProviderEntry() {
    let mut config = Config::default();

    config.assistant.set_model("llama3.3:70b");
    assert_eq!(config.assistant.get_model(), "llama3.3:70b");

    // The other provider's entry is untouched
    let anthropic = config
        .assistant
        .available_providers
        .iter()
        .find(|p| p.provider_type == "anthropic")
        .unwrap();
    assert_eq!(anthropic.model, "claude-3-haiku");

    // A provider missing from the table gets an entry created for it
    config.assistant.provider = AssistantProvider::Anthropic;
    config.assistant.available_providers.retain(|p| p.provider_type != "anthropic");
    config.assistant.set_model("claude-3-opus");
    assert_eq!(config.assistant.get_model(), "claude-3-opus");
}

/// Test the per-provider defaults built by ProviderConfig::new
#[test]
fn test_providerConfig_new_shouldSetTypeSpecificDefaults() {
    let ollama = ProviderConfig::new(AssistantProvider::Ollama);
    assert_eq!(ollama.provider_type, "ollama");
    assert_eq!(ollama.model, "llama3.2:3b");

    let anthropic = ProviderConfig::new(AssistantProvider::Anthropic);
    assert_eq!(anthropic.provider_type, "anthropic");
    assert_eq!(anthropic.endpoint, "https://api.anthropic.com");
}
