//! Error types for the drafting assistant

/// Assistant error type
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// Transport-level failure talking to the backend
    #[error("assistant backend error: {0}")]
    Backend(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("assistant request failed with status {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
    },

    /// Backend answered but produced no text
    #[error("assistant returned an empty response")]
    EmptyResponse,

    /// Live backend requested without an API key
    #[error("no API key configured for the assistant")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AssistError::RequestFailed { status: 429 };
        assert_eq!(err.to_string(), "assistant request failed with status 429");

        assert!(AssistError::EmptyResponse.to_string().contains("empty"));
    }
}
