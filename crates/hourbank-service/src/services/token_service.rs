//! Session Issuer: validates credentials and issues bearer tokens.

use crate::config::Config;
use crate::crypto::{self, Claims};
use crate::errors::HbError;
use crate::models::{Role, TokenResponse};
use crate::observability::metrics::record_login;
use crate::store::{CredentialStore, Store};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

/// Login request body. The identity key field doubles as the role claim:
/// `fid` selects the faculty namespace, `roll` the student namespace.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub roll: Option<String>,
    #[serde(default)]
    pub fid: Option<String>,
    pub password: String,
}

/// Authenticate and issue a session token.
///
/// The error is uniform across "identity key not found" and "wrong password",
/// and a dummy bcrypt verification runs on lookup misses so response timing
/// does not reveal which case occurred.
pub async fn login(
    store: &dyn Store,
    config: &Config,
    request: LoginRequest,
) -> Result<TokenResponse, HbError> {
    let result = authenticate(store, config, &request).await;
    record_login(if result.is_ok() { "success" } else { "failure" });
    result
}

async fn authenticate(
    store: &dyn Store,
    config: &Config,
    request: &LoginRequest,
) -> Result<TokenResponse, HbError> {
    let (identity_key, role, password_hash) = if let Some(fid) = &request.fid {
        let hash = store.find_faculty(fid).await?.map(|f| f.password_hash);
        (fid.clone(), Role::Faculty, hash)
    } else if let Some(roll) = &request.roll {
        let hash = store.find_student(roll).await?.map(|s| s.password_hash);
        (roll.clone(), Role::Student, hash)
    } else {
        return Err(HbError::Validation(
            "Either roll or fid is required".to_string(),
        ));
    };

    let Some(hash) = password_hash else {
        crypto::verify_dummy_password(&request.password);
        return Err(HbError::InvalidCredentials);
    };

    if !crypto::verify_password(&request.password, &hash)? {
        return Err(HbError::InvalidCredentials);
    }

    let token = issue_token(&identity_key, role, config)?;
    tracing::info!(role = role.as_str(), "Issued session token");

    Ok(TokenResponse {
        access_token: token,
        role,
    })
}

/// Build and sign session claims for an authenticated identity.
pub fn issue_token(identity_key: &str, role: Role, config: &Config) -> Result<String, HbError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: identity_key.to_string(),
        role,
        iat: now,
        exp: now + config.token_expiry_seconds,
        jti: Uuid::new_v4().to_string(),
    };
    crypto::sign_token(&claims, &config.token_secret)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::MIN_BCRYPT_COST;
    use crate::models::{NewFaculty, NewStudent};
    use crate::store::MemoryStore;
    use std::collections::HashMap;

    fn test_config() -> Config {
        let secret = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            [0x42u8; 32],
        );
        let vars = HashMap::from([
            ("HB_TOKEN_SECRET".to_string(), secret),
            ("BCRYPT_COST".to_string(), MIN_BCRYPT_COST.to_string()),
        ]);
        Config::from_vars(&vars).unwrap()
    }

    async fn seeded_store(config: &Config) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_student(NewStudent {
                roll: "S1".to_string(),
                name: "Alice".to_string(),
                password_hash: crypto::hash_password("student-pass", config.bcrypt_cost).unwrap(),
                course: "CS".to_string(),
                year: 2,
            })
            .await
            .unwrap();
        store
            .insert_faculty(NewFaculty {
                fid: "F1".to_string(),
                name: "Dr. A".to_string(),
                password_hash: crypto::hash_password("faculty-pass", config.bcrypt_cost).unwrap(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_student_login_issues_student_token() {
        let config = test_config();
        let store = seeded_store(&config).await;

        let response = login(
            &store,
            &config,
            LoginRequest {
                roll: Some("S1".to_string()),
                fid: None,
                password: "student-pass".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.role, Role::Student);
        let claims = crypto::verify_token(&response.access_token, &config.token_secret).unwrap();
        assert_eq!(claims.sub, "S1");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.exp - claims.iat, config.token_expiry_seconds);
    }

    #[tokio::test]
    async fn test_faculty_login_issues_faculty_token() {
        let config = test_config();
        let store = seeded_store(&config).await;

        let response = login(
            &store,
            &config,
            LoginRequest {
                roll: None,
                fid: Some("F1".to_string()),
                password: "faculty-pass".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.role, Role::Faculty);
        let claims = crypto::verify_token(&response.access_token, &config.token_secret).unwrap();
        assert_eq!(claims.role, Role::Faculty);
    }

    #[tokio::test]
    async fn test_unknown_key_and_wrong_password_fail_uniformly() {
        let config = test_config();
        let store = seeded_store(&config).await;

        let unknown = login(
            &store,
            &config,
            LoginRequest {
                roll: Some("ghost".to_string()),
                fid: None,
                password: "whatever".to_string(),
            },
        )
        .await;

        let wrong_password = login(
            &store,
            &config,
            LoginRequest {
                roll: Some("S1".to_string()),
                fid: None,
                password: "wrong".to_string(),
            },
        )
        .await;

        assert!(matches!(unknown, Err(HbError::InvalidCredentials)));
        assert!(matches!(wrong_password, Err(HbError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_role_namespaces_are_separate() {
        let config = test_config();
        let store = seeded_store(&config).await;

        // S1 exists as a student; the same key in the faculty namespace is
        // an authentication failure, not a cross-namespace match.
        let result = login(
            &store,
            &config,
            LoginRequest {
                roll: None,
                fid: Some("S1".to_string()),
                password: "student-pass".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(HbError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_missing_identity_key_is_validation_error() {
        let config = test_config();
        let store = MemoryStore::new();

        let result = login(
            &store,
            &config,
            LoginRequest {
                roll: None,
                fid: None,
                password: "p".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(HbError::Validation(_))));
    }
}
