//! Identity Resolver: maps verified session claims to a role and profile.
//!
//! Token verification itself happens in the authentication middleware; this
//! service completes resolution against the credential store. Pure read, no
//! mutation.

use crate::crypto::Claims;
use crate::errors::HbError;
use crate::models::{IdentityResponse, Profile, Role};
use crate::store::{CredentialStore, Store};

/// Resolve verified claims to the subject's role and profile.
///
/// Fails with `HbError::NotFound` when the record behind a still-valid token
/// no longer exists. Password hashes never appear in the result.
pub async fn resolve(store: &dyn Store, claims: &Claims) -> Result<IdentityResponse, HbError> {
    let user = match claims.role {
        Role::Student => store
            .find_student(&claims.sub)
            .await?
            .map(|record| Profile::Student(record.into())),
        Role::Faculty => store
            .find_faculty(&claims.sub)
            .await?
            .map(|record| Profile::Faculty(record.into())),
    }
    .ok_or(HbError::NotFound("user"))?;

    Ok(IdentityResponse {
        role: claims.role,
        user,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::models::{NewFaculty, NewStudent};
    use crate::store::{CredentialStore, MemoryStore};

    fn claims_for(sub: &str, role: Role) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: sub.to_string(),
            role,
            iat: now,
            exp: now + 3600,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolve_student_includes_credits() {
        let store = MemoryStore::new();
        store
            .insert_student(NewStudent {
                roll: "S1".to_string(),
                name: "Alice".to_string(),
                password_hash: "hash".to_string(),
                course: "CS".to_string(),
                year: 2,
            })
            .await
            .unwrap();

        let response = resolve(&store, &claims_for("S1", Role::Student)).await.unwrap();
        assert_eq!(response.role, Role::Student);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["role"], "student");
        assert_eq!(json["user"]["credits"], 0);
        assert!(json["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_resolve_faculty_profile() {
        let store = MemoryStore::new();
        store
            .insert_faculty(NewFaculty {
                fid: "F1".to_string(),
                name: "Dr. A".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        let response = resolve(&store, &claims_for("F1", Role::Faculty)).await.unwrap();
        assert_eq!(response.role, Role::Faculty);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user"]["fid"], "F1");
        assert!(json["user"].get("credits").is_none());
    }

    #[tokio::test]
    async fn test_resolve_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let result = resolve(&store, &claims_for("ghost", Role::Student)).await;
        assert!(matches!(result, Err(HbError::NotFound("user"))));
    }

    #[tokio::test]
    async fn test_resolve_does_not_cross_role_namespaces() {
        let store = MemoryStore::new();
        store
            .insert_student(NewStudent {
                roll: "X1".to_string(),
                name: "Alice".to_string(),
                password_hash: "hash".to_string(),
                course: "CS".to_string(),
                year: 2,
            })
            .await
            .unwrap();

        // A faculty-role token for a key that only exists as a student must
        // not resolve.
        let result = resolve(&store, &claims_for("X1", Role::Faculty)).await;
        assert!(matches!(result, Err(HbError::NotFound("user"))));
    }
}
