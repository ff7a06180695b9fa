/*!
 * # LegaLens - Legal Document Assistant with AI
 *
 * A Rust library for interactive question answering over legal documents
 * using AI.
 *
 * ## Features
 *
 * - Load legal documents from plain text or PDF files
 * - Answer questions about a document using various AI providers:
 *   - Ollama (local LLM)
 *   - Anthropic API
 * - Answer in the user's language via pivot translation through English
 * - Every answer carries a verbatim quotation from the original document
 * - Optional voice input (speech-to-text) and spoken answers (text-to-speech)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Document loading and text extraction
 * - `analysis`: AI-powered question answering:
 *   - translation of documents and questions to English
 *   - legal analysis with structured explanation/source responses
 *   - back-translation of explanations to the user's language
 * - `prompts`: Prompt templates shared by the analysis workflow
 * - `session`: Interactive menu loop and per-session state
 * - `voice`: Audio capture, speech recognition and speech synthesis
 * - `language_utils`: Language name and locale code utilities
 * - `providers`: Client implementations for various LLM providers:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Scriptable provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod analysis;
pub mod document;
pub mod language_utils;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod voice;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use analysis::{AnalysisOutcome, AnalysisService};
pub use document::Document;
pub use session::{MenuChoice, Session, SessionState};
pub use language_utils::{is_english, speech_locale};
pub use errors::{AppError, DocumentError, ProviderError, SpeechError};
