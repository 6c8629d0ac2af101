use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::{ProviderMetadata, RecognizeError, Recognizer};

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_PROMPT: &str = "Extract the text precisely as it appears in this image. \
Do not add any extra commentary, explanation, or formatting.";

/// Google Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiRecognizer {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    prompt: String,
}

impl GeminiRecognizer {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: model.into(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Bound each request, requests wait indefinitely otherwise
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, RecognizeError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl Recognizer for GeminiRecognizer {
    async fn recognize(&self, png: &[u8]) -> Result<String, RecognizeError> {
        if self.api_key.is_empty() {
            return Err(RecognizeError::MissingApiKey);
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: &self.prompt,
                    },
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: "image/png",
                            data: STANDARD.encode(png),
                        },
                    },
                ],
            }],
        };

        tracing::debug!("POST {} ({} byte image)", self.endpoint(), png.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);

            return Err(match status.as_u16() {
                401 | 403 => RecognizeError::Authentication(message),
                429 => RecognizeError::RateLimitExceeded,
                code => RecognizeError::Api {
                    status: code,
                    message,
                },
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RecognizeError::InvalidResponse(e.to_string()))?;

        extract_text(body)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
        }
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, RecognizeError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => RecognizeError::Blocked(reason),
            None => RecognizeError::EmptyResponse,
        });
    };

    if let Some(reason) = candidate.finish_reason.as_deref()
        && reason != "STOP"
    {
        tracing::warn!("Gemini finished with reason {}", reason);
    }

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    Ok(text.trim().to_string())
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: Blob },
}

#[derive(Serialize)]
struct Blob {
    mime_type: &'static str,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}
