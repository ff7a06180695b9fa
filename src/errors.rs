/*!
 * Error types for the legalens application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while loading a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read at all
    #[error("Failed to read document: {0}")]
    Unreadable(String),

    /// PDF parsing failed before any page could be extracted
    #[error("Failed to parse PDF: {0}")]
    Pdf(String),

    /// The document loaded but contained no usable text
    #[error("Document contains no text")]
    Empty,
}

/// Errors that can occur during speech capture or playback
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Audio was captured but nothing intelligible came back
    #[error("Could not understand audio")]
    Unrecognized,

    /// The recognition or synthesis service failed
    #[error("Speech service error: {0}")]
    Service(String),

    /// No usable audio device was available
    #[error("Audio device error: {0}")]
    Device(String),

    /// Local playback failed after synthesis succeeded
    #[error("Playback error: {0}")]
    Playback(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document loading
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from speech capture or playback
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
