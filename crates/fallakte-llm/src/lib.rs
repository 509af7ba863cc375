//! Fallakte Completion-Service Layer
//!
//! Implementations of the [`TextCompletion`] boundary from
//! `fallakte-domain`.
//!
//! # Providers
//!
//! - [`OllamaClient`]: local Ollama API integration
//! - [`MockCompletion`]: deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use fallakte_llm::MockCompletion;
//! use fallakte_domain::TextCompletion;
//!
//! # tokio_test::block_on(async {
//! let service = MockCompletion::new("KATEGORIE: Rechnung");
//! let completion = service.complete("egal", 100).await.unwrap();
//! assert_eq!(completion.text, "KATEGORIE: Rechnung");
//! # });
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use fallakte_domain::{Completion, CompletionError, TextCompletion};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub use ollama::OllamaClient;

/// Deterministic completion service for tests
///
/// Returns canned responses without any network call and records call and
/// concurrency accounting so scheduler tests can assert the backpressure
/// policy.
#[derive(Debug, Clone, Default)]
pub struct MockCompletion {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, CompletionError>>>>,
    call_count: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockCompletion {
    /// Create a mock returning a fixed response for every prompt
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            ..Default::default()
        }
    }

    /// Register a specific response for prompts containing `needle`
    pub fn respond_when(&self, needle: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(needle.into(), Ok(response.into()));
    }

    /// Register a failure for prompts containing `needle`
    pub fn fail_when(&self, needle: impl Into<String>, error: CompletionError) {
        self.responses.lock().unwrap().insert(needle.into(), Err(error));
    }

    /// Hold each call open for `delay`, so concurrency is observable
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of completed `complete` calls
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were ever in flight simultaneously
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for MockCompletion {
    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<Completion, CompletionError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = {
            let responses = self.responses.lock().unwrap();
            responses
                .iter()
                .find(|(needle, _)| prompt.contains(needle.as_str()))
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| Ok(self.default_response.clone()))
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.call_count.fetch_add(1, Ordering::SeqCst);

        result.map(|text| Completion {
            text,
            elapsed: Duration::from_millis(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response() {
        let mock = MockCompletion::new("Antwort");
        let completion = mock.complete("beliebiger Prompt", 10).await.unwrap();
        assert_eq!(completion.text, "Antwort");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_needle_matching() {
        let mock = MockCompletion::new("Standard");
        mock.respond_when("rechnung.pdf", "KATEGORIE: Rechnung");
        mock.fail_when("kaputt.txt", CompletionError::Timeout);

        let hit = mock.complete("Dokument (rechnung.pdf): ...", 10).await.unwrap();
        assert_eq!(hit.text, "KATEGORIE: Rechnung");

        let err = mock.complete("Dokument (kaputt.txt): ...", 10).await.unwrap_err();
        assert_eq!(err, CompletionError::Timeout);

        let miss = mock.complete("anderes Dokument", 10).await.unwrap();
        assert_eq!(miss.text, "Standard");
    }

    #[tokio::test]
    async fn test_in_flight_accounting() {
        let mock = MockCompletion::new("x").with_delay(Duration::from_millis(20));
        let a = mock.clone();
        let b = mock.clone();
        let (ra, rb) = tokio::join!(a.complete("1", 1), b.complete("2", 1));
        ra.unwrap();
        rb.unwrap();
        assert_eq!(mock.call_count(), 2);
        assert!(mock.max_in_flight() >= 1);
    }
}
