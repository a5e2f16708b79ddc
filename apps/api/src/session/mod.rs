//! Session gate — the single-secret switch between the public read-only
//! view and the admin content-management surface.
//!
//! One shared secret, held in memory (optionally seeded from `ADMIN_KEY`).
//! Admin routes check the `x-admin-key` request header against it. This is
//! deliberately a single-operator mechanism: no users, no sessions, no
//! token expiry.

pub mod handlers;

use std::sync::{Arc, RwLock};

use axum::http::HeaderMap;

use crate::errors::AppError;

/// Request header carrying the admin secret on gated routes.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Minimum accepted secret length, matching the settings-page rule.
pub const MIN_KEY_LEN: usize = 4;

#[derive(Clone, Default)]
pub struct SessionGate {
    secret: Arc<RwLock<Option<String>>>,
}

impl SessionGate {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            secret: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn is_provisioned(&self) -> bool {
        self.secret
            .read()
            .expect("session gate lock poisoned")
            .is_some()
    }

    /// Compares a candidate against the provisioned secret. Always false
    /// while unprovisioned.
    pub fn verify(&self, candidate: &str) -> bool {
        self.secret
            .read()
            .expect("session gate lock poisoned")
            .as_deref()
            .is_some_and(|secret| secret == candidate)
    }

    /// Installs (or rotates) the secret.
    pub fn provision(&self, secret: String) {
        *self.secret.write().expect("session gate lock poisoned") = Some(secret);
    }
}

/// Guard for admin-gated handlers: the request must carry the provisioned
/// secret in `x-admin-key`.
pub fn require_admin(gate: &SessionGate, headers: &HeaderMap) -> Result<(), AppError> {
    let candidate = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    if gate.verify(candidate) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_unprovisioned_gate_rejects_everything() {
        let gate = SessionGate::new(None);
        assert!(!gate.is_provisioned());
        assert!(!gate.verify(""));
        assert!(!gate.verify("anything"));
    }

    #[test]
    fn test_verify_after_provision() {
        let gate = SessionGate::new(None);
        gate.provision("hunter2".to_string());
        assert!(gate.is_provisioned());
        assert!(gate.verify("hunter2"));
        assert!(!gate.verify("hunter3"));
    }

    #[test]
    fn test_env_seeded_gate_is_provisioned() {
        let gate = SessionGate::new(Some("seeded".to_string()));
        assert!(gate.is_provisioned());
        assert!(gate.verify("seeded"));
    }

    #[test]
    fn test_rotation_invalidates_old_secret() {
        let gate = SessionGate::new(Some("old".to_string()));
        gate.provision("new".to_string());
        assert!(!gate.verify("old"));
        assert!(gate.verify("new"));
    }

    #[test]
    fn test_require_admin_without_header() {
        let gate = SessionGate::new(Some("secret".to_string()));
        let headers = HeaderMap::new();
        assert!(matches!(
            require_admin(&gate, &headers),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_require_admin_with_wrong_key() {
        let gate = SessionGate::new(Some("secret".to_string()));
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_KEY_HEADER, HeaderValue::from_static("nope"));
        assert!(matches!(
            require_admin(&gate, &headers),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_require_admin_with_correct_key() {
        let gate = SessionGate::new(Some("secret".to_string()));
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_KEY_HEADER, HeaderValue::from_static("secret"));
        assert!(require_admin(&gate, &headers).is_ok());
    }
}
