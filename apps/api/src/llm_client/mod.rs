/// LLM client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: no other module may call the Gemini API directly.
/// All model interactions MUST go through this module, behind the
/// `ChatModel` trait carried in `AppState` as `Arc<dyn ChatModel>`.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::chat::{ChatRole, ChatTurn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Text model answering visitor questions.
pub const CHAT_MODEL: &str = "gemini-2.5-flash";
/// Image-capable model behind the avatar edit feature.
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Model returned no usable content")]
    EmptyContent,
}

/// The chat backend seam. Implement this to swap providers without
/// touching handler or prompt code; tests use a scripted stub.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// One grounded conversational reply: system prompt, prior turns, and
    /// the new visitor message.
    async fn reply(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, LlmError>;

    /// Applies `instruction` to a base64-encoded image and returns the
    /// edited image as a data URL.
    async fn edit_image(
        &self,
        mime_type: &str,
        data_base64: &str,
        instruction: &str,
    ) -> Result<String, LlmError>;
}

// ── Wire types for the generateContent endpoint ─────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate's first text part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.as_slice())
            .and_then(|parts| parts.iter().find_map(|p| p.text.as_deref()))
    }

    /// Extracts the first inline image across all candidate parts.
    fn inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .iter()
            .flat_map(|c| c.content.iter())
            .flat_map(|content| content.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

fn role_name(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

/// Splits a `data:<mime>;base64,<payload>` URL into mime type and payload.
pub fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    if mime.is_empty() || payload.is_empty() {
        return None;
    }
    Some((mime, payload))
}

/// The production Gemini-backed chat model.
/// Wraps the generateContent API with retry logic on 429/5xx.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a raw generateContent call against `model`.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, LlmError> {
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent");
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(request)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse the structured error message
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let generate_response: GenerateResponse = response.json().await?;
            debug!(
                "Gemini call succeeded: {} candidate(s)",
                generate_response.candidates.len()
            );
            return Ok(generate_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn reply(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, LlmError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: Some(role_name(turn.role).to_string()),
                parts: vec![Part {
                    text: Some(turn.text.clone()),
                    inline_data: None,
                }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(message.to_string()),
                inline_data: None,
            }],
        });

        let request = GenerateRequest {
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: Some(system_prompt.to_string()),
                    inline_data: None,
                }],
            }),
            contents,
        };

        let response = self.generate(CHAT_MODEL, &request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }

    async fn edit_image(
        &self,
        mime_type: &str,
        data_base64: &str,
        instruction: &str,
    ) -> Result<String, LlmError> {
        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_string(),
                            data: data_base64.to_string(),
                        }),
                    },
                    Part {
                        text: Some(instruction.to_string()),
                        inline_data: None,
                    },
                ],
            }],
        };

        let response = self.generate(IMAGE_MODEL, &request).await?;
        let image = response.inline_image().ok_or(LlmError::EmptyContent)?;
        let mime = if image.mime_type.is_empty() {
            "image/png"
        } else {
            &image.mime_type
        };
        Ok(format!("data:{};base64,{}", mime, image.data))
    }
}
