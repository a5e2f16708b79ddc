use axum::{
    extract::{Path, State},
    http::header::CONTENT_DISPOSITION,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::content::snapshot::SnapshotDocument;
use crate::content::store::ContentView;
use crate::errors::AppError;
use crate::models::content::{Certification, Education, Experience, Profile, Project, Skill};
use crate::session::require_admin;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// `applied: false` means the addressed entity no longer exists; the
/// mutation was absorbed as a no-op. Speculative calls stay safe.
#[derive(Serialize)]
pub struct AppliedResponse {
    pub applied: bool,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<i64>,
}

fn validate_skill(skill: &Skill) -> Result<(), AppError> {
    if skill.level > 100 {
        return Err(AppError::Validation(
            "Skill level must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

// ── Reads ───────────────────────────────────────────────────────────────────

/// GET /api/v1/content
/// The full public projection: profile plus all five collections in
/// display order.
pub async fn handle_get_content(State(state): State<AppState>) -> Json<ContentView> {
    Json(state.content().view())
}

// ── Profile ─────────────────────────────────────────────────────────────────

/// PUT /api/v1/profile
/// Wholesale profile replacement.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(profile): Json<Profile>,
) -> Result<StatusCode, AppError> {
    require_admin(&state.session, &headers)?;
    state.content_mut().set_profile(profile);
    Ok(StatusCode::NO_CONTENT)
}

// ── Skills ──────────────────────────────────────────────────────────────────

/// POST /api/v1/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(skill): Json<Skill>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    require_admin(&state.session, &headers)?;
    validate_skill(&skill)?;
    let id = state.content_mut().skills.add(skill);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/v1/skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(skill): Json<Skill>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    validate_skill(&skill)?;
    let outcome = state.content_mut().skills.update(id, skill);
    if !outcome.applied() {
        debug!("Update for missing skill {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// DELETE /api/v1/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().skills.remove(id);
    if !outcome.applied() {
        debug!("Delete for missing skill {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// PUT /api/v1/skills/order
pub async fn handle_reorder_skills(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&state.session, &headers)?;
    state.content_mut().skills.reorder(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Experiences ─────────────────────────────────────────────────────────────

/// POST /api/v1/experiences
pub async fn handle_add_experience(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(experience): Json<Experience>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    require_admin(&state.session, &headers)?;
    let id = state.content_mut().experiences.add(experience);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/v1/experiences/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(experience): Json<Experience>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().experiences.update(id, experience);
    if !outcome.applied() {
        debug!("Update for missing experience {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// DELETE /api/v1/experiences/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().experiences.remove(id);
    if !outcome.applied() {
        debug!("Delete for missing experience {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// PUT /api/v1/experiences/order
pub async fn handle_reorder_experiences(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&state.session, &headers)?;
    state.content_mut().experiences.reorder(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Educations ──────────────────────────────────────────────────────────────

/// POST /api/v1/educations
pub async fn handle_add_education(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(education): Json<Education>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    require_admin(&state.session, &headers)?;
    let id = state.content_mut().educations.add(education);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/v1/educations/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(education): Json<Education>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().educations.update(id, education);
    if !outcome.applied() {
        debug!("Update for missing education {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// DELETE /api/v1/educations/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().educations.remove(id);
    if !outcome.applied() {
        debug!("Delete for missing education {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// PUT /api/v1/educations/order
pub async fn handle_reorder_educations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&state.session, &headers)?;
    state.content_mut().educations.reorder(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Projects ────────────────────────────────────────────────────────────────

/// POST /api/v1/projects
pub async fn handle_add_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(project): Json<Project>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    require_admin(&state.session, &headers)?;
    let id = state.content_mut().projects.add(project);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/v1/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(project): Json<Project>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().projects.update(id, project);
    if !outcome.applied() {
        debug!("Update for missing project {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// DELETE /api/v1/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().projects.remove(id);
    if !outcome.applied() {
        debug!("Delete for missing project {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// PUT /api/v1/projects/order
pub async fn handle_reorder_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&state.session, &headers)?;
    state.content_mut().projects.reorder(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Certifications ──────────────────────────────────────────────────────────

/// POST /api/v1/certifications
/// Certifications display most-recent-first, so adds prepend.
pub async fn handle_add_certification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(certification): Json<Certification>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    require_admin(&state.session, &headers)?;
    let id = state.content_mut().certifications.add_front(certification);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/v1/certifications/:id
pub async fn handle_update_certification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(certification): Json<Certification>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().certifications.update(id, certification);
    if !outcome.applied() {
        debug!("Update for missing certification {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// DELETE /api/v1/certifications/:id
pub async fn handle_delete_certification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppliedResponse>, AppError> {
    require_admin(&state.session, &headers)?;
    let outcome = state.content_mut().certifications.remove(id);
    if !outcome.applied() {
        debug!("Delete for missing certification {id} absorbed as no-op");
    }
    Ok(Json(AppliedResponse {
        applied: outcome.applied(),
    }))
}

/// PUT /api/v1/certifications/order
pub async fn handle_reorder_certifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&state.session, &headers)?;
    state.content_mut().certifications.reorder(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Backup / restore ────────────────────────────────────────────────────────

/// GET /api/v1/content/export
/// Captures the full store as one snapshot document, served as a dated
/// backup download.
pub async fn handle_export(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state.session, &headers)?;
    let document = SnapshotDocument::capture(&state.content());
    let filename = format!("portfolio-backup-{}.json", Utc::now().format("%Y-%m-%d"));
    Ok((
        [(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )],
        Json(document),
    ))
}

/// POST /api/v1/content/import
/// Restores from raw backup text. Parse failure leaves the store
/// untouched; a parsed document replaces exactly the collections it
/// carries.
pub async fn handle_import(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<StatusCode, AppError> {
    require_admin(&state.session, &headers)?;
    let document = SnapshotDocument::parse(&body)?;
    state.content_mut().import(document);
    info!("Snapshot restored from uploaded backup");
    Ok(StatusCode::NO_CONTENT)
}
