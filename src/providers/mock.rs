/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds, echoing or scripting a response
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::fail_matching(prefix)` - Fails only for prompts with a given prefix
 *
 * Every prompt is recorded, so tests can assert how many translation or
 * analysis calls a workflow actually made.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The full prompt text
    pub prompt: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The generated text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an error
    Failing,
    /// Fails only when the prompt starts with the given prefix
    FailMatching(&'static str),
}

/// Mock provider for testing workflow behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Custom response generator (optional)
    responder: Option<fn(&str) -> String>,
    /// Log of every prompt seen, shared across clones
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            responder: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails only for prompts starting with `prefix`
    pub fn fail_matching(prefix: &'static str) -> Self {
        Self::new(MockBehavior::FailMatching(prefix))
    }

    /// Set a custom response generator
    pub fn with_responder(mut self, responder: fn(&str) -> String) -> Self {
        self.responder = Some(responder);
        self
    }

    /// All prompts the provider has seen so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of recorded prompts whose text starts with `prefix`
    pub fn count_prompts_starting_with(&self, prefix: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.starts_with(prefix))
            .count()
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            responder: self.responder,
            prompts: Arc::clone(&self.prompts),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());

        let fail = match self.behavior {
            MockBehavior::Working => false,
            MockBehavior::Failing => true,
            MockBehavior::FailMatching(prefix) => request.prompt.starts_with(prefix),
        };

        if fail {
            return Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            });
        }

        let text = if let Some(responder) = self.responder {
            responder(&request.prompt)
        } else {
            format!("[MOCK] {}", request.prompt)
        };

        Ok(MockResponse { text })
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
