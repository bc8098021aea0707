//! Credit-award transactions.
//!
//! A faculty member awards credits to a student; the ledger entry and the
//! balance increment are one atomic store operation. Listings are scoped by
//! role: faculty see what they sent, students see what they received.

use crate::crypto::Claims;
use crate::errors::HbError;
use crate::models::{NewTransaction, Role, Transaction};
use crate::observability::metrics::record_credit_award;
use crate::store::{Store, TransactionLedger};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub receiver_id: String,
    pub credits: i64,
    #[serde(default)]
    pub prg_name: Option<String>,
}

/// Award credits to a student on behalf of the authenticated faculty member.
pub async fn create_transaction(
    store: &dyn Store,
    claims: &Claims,
    request: CreateTransactionRequest,
) -> Result<Transaction, HbError> {
    if claims.role != Role::Faculty {
        return Err(HbError::RoleNotPermitted {
            required: Role::Faculty,
        });
    }

    if request.credits <= 0 {
        return Err(HbError::Validation(
            "Credits must be a positive integer".to_string(),
        ));
    }

    let receiver_id = request.receiver_id.trim();
    if receiver_id.is_empty() {
        return Err(HbError::Validation("Receiver is required".to_string()));
    }

    let transaction = store
        .record_award(NewTransaction {
            sender_id: claims.sub.clone(),
            receiver_id: receiver_id.to_string(),
            credits: request.credits,
            prg_name: request.prg_name,
        })
        .await?;

    record_credit_award();
    tracing::info!(
        transaction_id = %transaction.id,
        credits = transaction.credits,
        "Credits awarded"
    );

    Ok(transaction)
}

/// List the transactions visible to the authenticated user.
pub async fn list_transactions(
    store: &dyn Store,
    claims: &Claims,
) -> Result<Vec<Transaction>, HbError> {
    match claims.role {
        Role::Faculty => store.list_by_sender(&claims.sub).await,
        Role::Student => store.list_by_receiver(&claims.sub).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::models::NewStudent;
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

    async fn store_with_student(roll: &str) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_student(NewStudent {
                roll: roll.to_string(),
                name: "Alice".to_string(),
                password_hash: "hash".to_string(),
                course: "CS".to_string(),
                year: 2,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_award_updates_student_balance() {
        let store = store_with_student("S1").await;
        let faculty = claims_for("F1", Role::Faculty);

        create_transaction(
            &store,
            &faculty,
            CreateTransactionRequest {
                receiver_id: "S1".to_string(),
                credits: 5,
                prg_name: Some("Workshop".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(store.find_student("S1").await.unwrap().unwrap().credits, 5);
    }

    #[tokio::test]
    async fn test_listings_are_scoped_by_role() {
        let store = store_with_student("S1").await;
        let faculty = claims_for("F1", Role::Faculty);

        create_transaction(
            &store,
            &faculty,
            CreateTransactionRequest {
                receiver_id: "S1".to_string(),
                credits: 3,
                prg_name: None,
            },
        )
        .await
        .unwrap();

        let sent = list_transactions(&store, &faculty).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].receiver_id, "S1");

        let received = list_transactions(&store, &claims_for("S1", Role::Student))
            .await
            .unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].sender_id, "F1");

        let other_faculty = list_transactions(&store, &claims_for("F2", Role::Faculty))
            .await
            .unwrap();
        assert!(other_faculty.is_empty());
    }

    #[tokio::test]
    async fn test_student_cannot_award_credits() {
        let store = store_with_student("S1").await;

        let result = create_transaction(
            &store,
            &claims_for("S1", Role::Student),
            CreateTransactionRequest {
                receiver_id: "S1".to_string(),
                credits: 5,
                prg_name: None,
            },
        )
        .await;

        assert!(matches!(result, Err(HbError::RoleNotPermitted { .. })));
        assert_eq!(store.find_student("S1").await.unwrap().unwrap().credits, 0);
    }

    #[tokio::test]
    async fn test_non_positive_credits_rejected() {
        let store = store_with_student("S1").await;
        let faculty = claims_for("F1", Role::Faculty);

        for credits in [0, -5] {
            let result = create_transaction(
                &store,
                &faculty,
                CreateTransactionRequest {
                    receiver_id: "S1".to_string(),
                    credits,
                    prg_name: None,
                },
            )
            .await;
            assert!(matches!(result, Err(HbError::Validation(_))));
        }

        assert!(list_transactions(&store, &faculty).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_receiver_is_not_found() {
        let store = MemoryStore::new();

        let result = create_transaction(
            &store,
            &claims_for("F1", Role::Faculty),
            CreateTransactionRequest {
                receiver_id: "ghost".to_string(),
                credits: 5,
                prg_name: None,
            },
        )
        .await;

        assert!(matches!(result, Err(HbError::NotFound("student"))));
    }
}
