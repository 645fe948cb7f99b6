//! LegiFlow Assist - generative-AI drafting collaborator
//!
//! A single async boundary for the workflow tool:
//! - `DraftAssistant` trait: one prompt in, one completion out
//! - `MockAssistant`: deterministic keyword-routed fallback
//! - `HttpAssistant`: live Gemini-style backend over `reqwest`
//!
//! # Example
//!
//! ```rust
//! use legiflow_assist::{DraftAssistant, MockAssistant};
//!
//! # async fn example() -> Result<(), legiflow_assist::AssistError> {
//! let assistant = MockAssistant::new();
//! let summary = assistant.complete("Summarize ORD-2023-001").await?;
//! assert!(!summary.is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

use async_trait::async_trait;

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;

pub use config::{AssistConfig, API_KEY_ENV, DEFAULT_MODEL, SYSTEM_INSTRUCTION};
pub use error::AssistError;
pub use gemini::HttpAssistant;
pub use mock::MockAssistant;

/// A drafting assistant
///
/// Fire-and-forget request/response: implementations perform no retries,
/// impose no timeout policy, and coordinate no concurrent requests.
#[async_trait]
pub trait DraftAssistant: Send + Sync {
    /// Complete a free-text prompt
    ///
    /// # Errors
    /// Communication failure or an empty backend response.
    async fn complete(&self, prompt: &str) -> Result<String, AssistError>;
}

/// Assistant selected by the environment
///
/// Returns the live backend when an API key is configured and falls back to
/// the deterministic mock otherwise.
#[must_use]
pub fn assistant_from_env() -> Box<dyn DraftAssistant> {
    let config = AssistConfig::from_env();
    match HttpAssistant::new(config) {
        Ok(live) => Box::new(live),
        Err(_) => {
            tracing::warn!("{API_KEY_ENV} is not set, using mock assistant responses");
            Box::new(MockAssistant::new())
        }
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn boxed_assistant_is_usable_through_the_trait() {
        let assistant: Box<dyn DraftAssistant> = Box::new(MockAssistant::new());
        let response = assistant.complete("summarize the park resolution").await;
        assert!(response.is_ok());
    }
}
