use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::session::{require_admin, MIN_KEY_LEN};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionStatus {
    pub provisioned: bool,
}

#[derive(Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

fn validate_key(key: &str) -> Result<(), AppError> {
    if key.len() < MIN_KEY_LEN {
        return Err(AppError::Validation(format!(
            "Admin key must be at least {MIN_KEY_LEN} characters"
        )));
    }
    Ok(())
}

/// GET /api/v1/session
/// Tells the client whether an admin secret exists yet (drives the
/// login-vs-setup choice in the settings UI).
pub async fn handle_session_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(SessionStatus {
        provisioned: state.session.is_provisioned(),
    })
}

/// POST /api/v1/session/provision
/// First-time setup: claims the admin secret. Refused once provisioned —
/// rotation goes through the authenticated key route.
pub async fn handle_provision(
    State(state): State<AppState>,
    Json(req): Json<KeyRequest>,
) -> Result<StatusCode, AppError> {
    validate_key(&req.key)?;
    if state.session.is_provisioned() {
        return Err(AppError::Validation(
            "Admin key is already provisioned".to_string(),
        ));
    }
    state.session.provision(req.key);
    info!("Admin key provisioned");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/session/verify
/// Checks a candidate secret. A miss is a normal answer, not an error —
/// the client shows its own "incorrect password" notice.
pub async fn handle_verify(
    State(state): State<AppState>,
    Json(req): Json<KeyRequest>,
) -> Json<VerifyResponse> {
    let valid = state.session.verify(&req.key);
    if !valid {
        warn!("Admin key verification failed");
    }
    Json(VerifyResponse { valid })
}

/// PUT /api/v1/session/key
/// Rotates the admin secret. Requires the current secret in the header.
pub async fn handle_rotate_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<KeyRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&state.session, &headers)?;
    validate_key(&req.key)?;
    state.session.provision(req.key);
    info!("Admin key rotated");
    Ok(StatusCode::NO_CONTENT)
}
