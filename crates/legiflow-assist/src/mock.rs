//! Deterministic mock assistant
//!
//! Routes on keywords in the lowercased prompt, standing in for the live
//! backend whenever no API key is configured. Responses are fixed so tests
//! and offline development are reproducible.

use crate::error::AssistError;
use crate::DraftAssistant;
use async_trait::async_trait;

const MOCK_SUMMARY: &str = "This ordinance updates zoning for commercial districts, \
focusing on operating hours for businesses near residential areas to balance \
economic activity and community welfare.";

const MOCK_SUGGESTION: &str = "Suggestion for Section 3.2: 'To mitigate noise \
disturbances, businesses in commercial districts that are adjacent to any \
residential zone must cease public operations between 10:00 PM and 7:00 AM \
daily. The Planning Commission may grant a special permit to extend these \
hours upon a public hearing.' This provides more concrete language than \
'reasonable hours'.";

const MOCK_NOTICE: &str = "The AI assistant is configured in mock mode. This is a \
sample response. For real interaction, please provide a valid API key.";

/// Keyword-routed mock backend
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAssistant;

impl MockAssistant {
    /// Create a mock assistant
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DraftAssistant for MockAssistant {
    async fn complete(&self, prompt: &str) -> Result<String, AssistError> {
        let lowered = prompt.to_lowercase();

        let response = if lowered.contains("summarize") {
            MOCK_SUMMARY
        } else if lowered.contains("clarity") || lowered.contains("wording") {
            MOCK_SUGGESTION
        } else {
            MOCK_NOTICE
        };

        Ok(response.to_string())
    }
}
