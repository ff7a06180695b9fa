use anyhow::{anyhow, Result};
use log::{error, warn};

use crate::app_config::{AssistantConfig, AssistantProvider as ConfigAssistantProvider};
use crate::language_utils;
use crate::prompts::{self, TranslationTask, EXPLANATION_HEADER, SOURCE_MARKER};
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::Provider;

// @module: Analysis service for multilingual document question answering

/// Sentinel returned when the model response carries no recognizable source marker
pub const SOURCE_NOT_FOUND: &str = "Source not found.";

/// Fixed explanation returned when the analysis call itself fails
pub const ANALYSIS_FAILED_EXPLANATION: &str = "Could not process the request.";

/// Fixed source returned when the analysis call itself fails
pub const ANALYSIS_FAILED_SOURCE: &str = "Error.";

/// Result of answering one question: an explanation in the user's language
/// and a verbatim quotation from the original document
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// Explanation text, translated back to the source language when needed
    pub explanation: String,
    /// Supporting quotation, always left in the document's own language
    pub source_quote: String,
}

// @enum: Available assistant provider implementations
enum AssistantClientImpl {
    // @variant: Ollama LLM service
    Ollama {
        // @field: Client instance
        client: Ollama,
    },

    // @variant: Anthropic API service
    Anthropic {
        // @field: Client instance
        client: Anthropic,
    },

    // @variant: Scripted mock, used by tests
    Mock {
        // @field: Client instance
        client: MockProvider,
    },
}

// @struct: Analysis service
pub struct AnalysisService {
    // @field: Provider implementation
    provider: AssistantClientImpl,

    // @field: Configuration
    config: AssistantConfig,
}

impl AnalysisService {
    /// Create a new analysis service from configuration
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let provider = match config.provider {
            ConfigAssistantProvider::Ollama => {
                let client = Ollama::new(config.get_endpoint(), config.get_timeout_secs());
                AssistantClientImpl::Ollama { client }
            }
            ConfigAssistantProvider::Anthropic => {
                let client = Anthropic::new(
                    config.get_api_key(),
                    config.get_endpoint(),
                    config.get_timeout_secs(),
                );
                AssistantClientImpl::Anthropic { client }
            }
        };

        Ok(Self { provider, config })
    }

    /// Create a service backed by a scripted mock provider
    pub fn with_mock(client: MockProvider) -> Self {
        Self {
            provider: AssistantClientImpl::Mock { client },
            config: AssistantConfig::default(),
        }
    }

    /// Send a single prompt and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String> {
        match &self.provider {
            AssistantClientImpl::Ollama { client } => {
                let request = GenerationRequest::new(self.config.get_model(), prompt)
                    .temperature(self.config.common.temperature)
                    .num_predict(self.config.common.max_tokens)
                    .no_stream();

                let response = client.generate(request).await?;
                Ok(response.response)
            }
            AssistantClientImpl::Anthropic { client } => {
                let request =
                    AnthropicRequest::new(self.config.get_model(), self.config.common.max_tokens)
                        .add_message("user", prompt)
                        .temperature(self.config.common.temperature);

                let response = client.complete(request).await?;
                Ok(Anthropic::extract_text_from_response(&response))
            }
            AssistantClientImpl::Mock { client } => {
                let response = client
                    .complete(MockRequest {
                        prompt: prompt.to_string(),
                    })
                    .await
                    .map_err(|e| anyhow!("Mock provider error: {}", e))?;
                Ok(MockProvider::extract_text(&response))
            }
        }
    }

    /// Translate text to a target language
    ///
    /// A failed call degrades to the untranslated input so the session can
    /// continue with whatever text is at hand.
    pub async fn translate(&self, text: &str, target_language: &str, task: TranslationTask) -> String {
        let prompt = prompts::translation_prompt(text, target_language, task);

        match self.generate(&prompt).await {
            Ok(translated) => translated.trim().to_string(),
            Err(e) => {
                error!("Translation to {} failed: {}", target_language, e);
                text.to_string()
            }
        }
    }

    /// Analyze the English document against a question, quoting from the original
    ///
    /// A failed call degrades to a fixed failure pair; the error is reported
    /// through the log, never raised to the menu.
    pub async fn analyze(
        &self,
        original_text: &str,
        english_text: &str,
        question: &str,
        source_language: &str,
    ) -> (String, String) {
        let prompt = prompts::analysis_prompt(original_text, english_text, question, source_language);

        match self.generate(&prompt).await {
            Ok(raw) => {
                let outcome = parse_analysis_response(&raw);
                if outcome.source_quote == SOURCE_NOT_FOUND {
                    warn!("Analysis response carried no source marker");
                }
                (outcome.explanation, outcome.source_quote)
            }
            Err(e) => {
                error!("Analysis failed: {}", e);
                (
                    ANALYSIS_FAILED_EXPLANATION.to_string(),
                    ANALYSIS_FAILED_SOURCE.to_string(),
                )
            }
        }
    }

    /// Answer a question about a document in its source language
    ///
    /// English documents are analyzed directly. Any other language is pivoted
    /// through English: the full document is translated for every question
    /// (no caching across a session), the analysis reasons over the English
    /// text, and the explanation is translated back with a simplify
    /// instruction. The quotation is never translated.
    pub async fn answer_question(
        &self,
        document_text: &str,
        question: &str,
        source_language: &str,
    ) -> AnalysisOutcome {
        let english_doc = if language_utils::is_english(source_language) {
            document_text.to_string()
        } else {
            self.translate(document_text, "English", TranslationTask::Translate)
                .await
        };

        let (explanation, source_quote) = self
            .analyze(document_text, &english_doc, question, source_language)
            .await;

        let explanation = if language_utils::is_english(source_language) {
            explanation
        } else {
            self.translate(&explanation, source_language, TranslationTask::TranslateAndSimplify)
                .await
        };

        AnalysisOutcome {
            explanation,
            source_quote,
        }
    }
}

/// Parse a raw analysis response into explanation and source quotation
///
/// The contract is textual: the response is split on the literal
/// `**Source from original document` marker, the explanation segment is
/// stripped of the `**Explanation (English):**` header, and the quoted
/// source is the last `**`-delimited segment of the remainder with any
/// trailing `**` markers and wrapping quotes removed. A response without the
/// source marker yields the `Source not found.` sentinel.
pub fn parse_analysis_response(raw: &str) -> AnalysisOutcome {
    match raw.split_once(SOURCE_MARKER) {
        Some((head, tail)) => {
            let trimmed = tail.trim().trim_end_matches("**").trim();
            let segment = trimmed.rsplit("**").next().unwrap_or("").trim();
            let quote = strip_wrapping_quotes(segment);

            let source_quote = if quote.is_empty() {
                SOURCE_NOT_FOUND.to_string()
            } else {
                quote.to_string()
            };

            AnalysisOutcome {
                explanation: strip_explanation_header(head),
                source_quote,
            }
        }
        None => AnalysisOutcome {
            explanation: strip_explanation_header(raw),
            source_quote: SOURCE_NOT_FOUND.to_string(),
        },
    }
}

/// Remove the explanation header literal and surrounding whitespace
fn strip_explanation_header(text: &str) -> String {
    text.replace(EXPLANATION_HEADER, "").trim().to_string()
}

/// Remove a single pair of wrapping double quotes, if present
fn strip_wrapping_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}
