//! Assistant configuration

/// Environment variable holding the backend API key
pub const API_KEY_ENV: &str = "LEGIFLOW_API_KEY";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// System instruction sent with every completion request
pub const SYSTEM_INSTRUCTION: &str = "You are an expert legislative assistant. Your \
role is to analyze legal documents, provide clear summaries, identify potential \
issues, and suggest improvements in a professional, neutral tone.";

/// Drafting assistant configuration
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// API key for the live backend; absent selects the mock
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// API endpoint base URL
    pub endpoint: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// System instruction for every request
    pub system_instruction: String,
}

impl AssistConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from the environment
    ///
    /// Reads the API key from `LEGIFLOW_API_KEY`; everything else keeps its
    /// default.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// With an API key
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// With a model identifier
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With an endpoint base URL
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: 0.7,
            top_p: 1.0,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        }
    }
}
