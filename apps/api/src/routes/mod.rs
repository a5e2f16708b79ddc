pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::chat::handlers as chat_handlers;
use crate::content::handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public read surface
        .route("/api/v1/content", get(handlers::handle_get_content))
        // Profile
        .route("/api/v1/profile", put(handlers::handle_update_profile))
        .route(
            "/api/v1/profile/avatar/edit",
            post(chat_handlers::handle_avatar_edit),
        )
        // Skills
        .route("/api/v1/skills", post(handlers::handle_add_skill))
        .route("/api/v1/skills/order", put(handlers::handle_reorder_skills))
        .route(
            "/api/v1/skills/:id",
            put(handlers::handle_update_skill).delete(handlers::handle_delete_skill),
        )
        // Experiences
        .route("/api/v1/experiences", post(handlers::handle_add_experience))
        .route(
            "/api/v1/experiences/order",
            put(handlers::handle_reorder_experiences),
        )
        .route(
            "/api/v1/experiences/:id",
            put(handlers::handle_update_experience).delete(handlers::handle_delete_experience),
        )
        // Educations
        .route("/api/v1/educations", post(handlers::handle_add_education))
        .route(
            "/api/v1/educations/order",
            put(handlers::handle_reorder_educations),
        )
        .route(
            "/api/v1/educations/:id",
            put(handlers::handle_update_education).delete(handlers::handle_delete_education),
        )
        // Projects
        .route("/api/v1/projects", post(handlers::handle_add_project))
        .route(
            "/api/v1/projects/order",
            put(handlers::handle_reorder_projects),
        )
        .route(
            "/api/v1/projects/:id",
            put(handlers::handle_update_project).delete(handlers::handle_delete_project),
        )
        // Certifications
        .route(
            "/api/v1/certifications",
            post(handlers::handle_add_certification),
        )
        .route(
            "/api/v1/certifications/order",
            put(handlers::handle_reorder_certifications),
        )
        .route(
            "/api/v1/certifications/:id",
            put(handlers::handle_update_certification)
                .delete(handlers::handle_delete_certification),
        )
        // Backup / restore
        .route("/api/v1/content/export", get(handlers::handle_export))
        .route("/api/v1/content/import", post(handlers::handle_import))
        // Session gate
        .route(
            "/api/v1/session",
            get(session_handlers::handle_session_status),
        )
        .route(
            "/api/v1/session/provision",
            post(session_handlers::handle_provision),
        )
        .route(
            "/api/v1/session/verify",
            post(session_handlers::handle_verify),
        )
        .route("/api/v1/session/key", put(session_handlers::handle_rotate_key))
        // Visitor chat
        .route("/api/v1/chat", post(chat_handlers::handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::content::defaults;
    use crate::llm_client::testing::ScriptedModel;
    use crate::session::SessionGate;
    use crate::state::AppState;

    fn test_app(model: ScriptedModel) -> Router {
        let state = AppState::new(
            defaults::content_store(),
            SessionGate::new(None),
            Arc::new(model),
        );
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, key: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header("x-admin-key", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app(ScriptedModel::replying("unused"));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_public_content_read() {
        let app = test_app(ScriptedModel::replying("unused"));
        let response = app
            .oneshot(Request::get("/api/v1/content").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["profile"]["name"], "Anantkumar Saunshi");
        assert_eq!(body["skills"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_mutations_rejected_without_admin_key() {
        let app = test_app(ScriptedModel::replying("unused"));
        let request = json_request(
            "POST",
            "/api/v1/skills",
            None,
            json!({"name": "Rust", "level": 50}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_provision_then_mutate_flow() {
        let app = test_app(ScriptedModel::replying("unused"));

        // Gate starts unprovisioned.
        let response = app
            .clone()
            .oneshot(Request::get("/api/v1/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["provisioned"], false);

        // Claim the admin key.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/session/provision",
                None,
                json!({"key": "hunter2"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Verify answers with a boolean rather than failing.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/session/verify",
                None,
                json!({"key": "wrong"}),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["valid"], false);

        // Mutations now work with the key.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/skills",
                Some("hunter2"),
                json!({"name": "Rust", "level": 60}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["id"], 7);

        let response = app
            .oneshot(Request::get("/api/v1/content").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["skills"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_second_provision_is_rejected() {
        let app = test_app(ScriptedModel::replying("unused"));
        let first = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/session/provision",
                None,
                json!({"key": "hunter2"}),
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::NO_CONTENT);

        let second = app
            .oneshot(json_request(
                "POST",
                "/api/v1/session/provision",
                None,
                json!({"key": "usurper"}),
            ))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_reorder_returns_validation_error() {
        let app = test_app(ScriptedModel::replying("unused"));
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/session/provision",
                None,
                json!({"key": "hunter2"}),
            ))
            .await
            .unwrap();

        // Six seeded skills; two ids is not a permutation.
        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/v1/skills/order",
                Some("hunter2"),
                json!({"ids": [1, 2]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chat_fallback_over_http() {
        let app = test_app(ScriptedModel::failing());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/chat",
                None,
                json!({"history": [], "message": "hello"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["is_error"], true);
    }
}
