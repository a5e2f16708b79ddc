use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chat::prompts;
use crate::errors::AppError;
use crate::llm_client::split_data_url;
use crate::models::chat::ChatTurn;
use crate::session::require_admin;
use crate::state::AppState;

/// Shown in the chat window whenever the provider call fails. Provider
/// errors never surface as HTTP failures on this path — the conversation
/// degrades to this message instead.
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again later.";

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub is_error: bool,
}

#[derive(Deserialize)]
pub struct AvatarEditRequest {
    /// The current avatar as a base64 data URL.
    pub image: String,
    pub instruction: String,
}

#[derive(Serialize)]
pub struct AvatarEditResponse {
    pub image: String,
}

/// POST /api/v1/chat
/// Answers a visitor question grounded in a point-in-time snapshot of the
/// content store.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatReply> {
    // Snapshot under the lock, then release it before awaiting the model.
    let system_prompt = {
        let store = state.content();
        prompts::system_prompt(&store.view())
    };

    match state
        .chat
        .reply(&system_prompt, &req.history, &req.message)
        .await
    {
        Ok(text) => Json(ChatReply {
            reply: text,
            is_error: false,
        }),
        Err(e) => {
            warn!("Chat model call failed: {e}");
            Json(ChatReply {
                reply: FALLBACK_REPLY.to_string(),
                is_error: true,
            })
        }
    }
}

/// POST /api/v1/profile/avatar/edit
/// Admin-only: sends the avatar plus an edit instruction to the image
/// model and returns the edited image as a data URL. The caller decides
/// whether to save the result to the profile.
pub async fn handle_avatar_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AvatarEditRequest>,
) -> Result<Json<AvatarEditResponse>, AppError> {
    require_admin(&state.session, &headers)?;

    let (mime_type, data) = split_data_url(&req.image).ok_or_else(|| {
        AppError::Validation("image must be a base64 data URL".to_string())
    })?;

    let edited = state
        .chat
        .edit_image(mime_type, data, &req.instruction)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(AvatarEditResponse { image: edited }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::content::defaults;
    use crate::llm_client::testing::ScriptedModel;
    use crate::session::SessionGate;

    fn state_with(model: ScriptedModel) -> AppState {
        AppState::new(
            defaults::content_store(),
            SessionGate::new(Some("secret".to_string())),
            Arc::new(model),
        )
    }

    #[tokio::test]
    async fn test_chat_returns_model_reply() {
        let state = state_with(ScriptedModel::replying("He knows Power BI."));
        let req = ChatRequest {
            history: vec![],
            message: "What BI tools does he know?".to_string(),
        };
        let Json(reply) = handle_chat(State(state), Json(req)).await;
        assert_eq!(reply.reply, "He knows Power BI.");
        assert!(!reply.is_error);
    }

    #[tokio::test]
    async fn test_chat_degrades_to_fallback_on_provider_error() {
        let state = state_with(ScriptedModel::failing());
        let req = ChatRequest {
            history: vec![],
            message: "Hello?".to_string(),
        };
        let Json(reply) = handle_chat(State(state), Json(req)).await;
        assert_eq!(reply.reply, FALLBACK_REPLY);
        assert!(reply.is_error);
    }

    #[tokio::test]
    async fn test_avatar_edit_rejects_non_data_url() {
        let state = state_with(ScriptedModel::replying("unused"));
        let mut headers = HeaderMap::new();
        headers.insert("x-admin-key", "secret".parse().unwrap());
        let req = AvatarEditRequest {
            image: "https://example.com/avatar.png".to_string(),
            instruction: "make it professional".to_string(),
        };
        let result = handle_avatar_edit(State(state), headers, Json(req)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_avatar_edit_requires_admin() {
        let state = state_with(ScriptedModel::replying("unused"));
        let req = AvatarEditRequest {
            image: "data:image/png;base64,QUJD".to_string(),
            instruction: "brighten".to_string(),
        };
        let result = handle_avatar_edit(State(state), HeaderMap::new(), Json(req)).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
