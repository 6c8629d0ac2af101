mod gemini;

pub use gemini::{DEFAULT_API_URL, DEFAULT_PROMPT, GeminiRecognizer};

/// Image-to-text provider interface
#[async_trait::async_trait]
pub trait Recognizer: Send + Sync {
    /// Extract the text shown in a PNG image
    async fn recognize(&self, png: &[u8]) -> Result<String, RecognizeError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("API key is empty")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request blocked: {0}")]
    Blocked(String),

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),
}
