//! In-memory store adapter.
//!
//! Default backend when no `DATABASE_URL` is configured, and the backbone of
//! the test suite. All collections live behind a single `RwLock` so the
//! check-and-insert and award operations are trivially atomic.

use super::{CredentialStore, ProgramRegistry, TransactionLedger};
use crate::errors::HbError;
use crate::models::{
    FacultyRecord, NewFaculty, NewProgram, NewStudent, NewTransaction, Program, StudentRecord,
    Transaction,
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    // Vecs keep insertion order for the listing endpoints; lookups are
    // linear, which is fine at campus scale.
    students: Vec<StudentRecord>,
    faculty: Vec<FacultyRecord>,
    programs: Vec<Program>,
    transactions: Vec<Transaction>,
}

/// In-memory implementation of all storage ports.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_student(&self, roll: &str) -> Result<Option<StudentRecord>, HbError> {
        let inner = self.inner.read().await;
        Ok(inner.students.iter().find(|s| s.roll == roll).cloned())
    }

    async fn find_faculty(&self, fid: &str) -> Result<Option<FacultyRecord>, HbError> {
        let inner = self.inner.read().await;
        Ok(inner.faculty.iter().find(|f| f.fid == fid).cloned())
    }

    async fn insert_student(&self, new: NewStudent) -> Result<StudentRecord, HbError> {
        let mut inner = self.inner.write().await;
        if inner.students.iter().any(|s| s.roll == new.roll) {
            return Err(HbError::DuplicateIdentity);
        }
        let record = StudentRecord {
            roll: new.roll,
            name: new.name,
            password_hash: new.password_hash,
            course: new.course,
            year: new.year,
            credits: 0,
        };
        inner.students.push(record.clone());
        Ok(record)
    }

    async fn insert_faculty(&self, new: NewFaculty) -> Result<FacultyRecord, HbError> {
        let mut inner = self.inner.write().await;
        if inner.faculty.iter().any(|f| f.fid == new.fid) {
            return Err(HbError::DuplicateIdentity);
        }
        let record = FacultyRecord {
            fid: new.fid,
            name: new.name,
            password_hash: new.password_hash,
        };
        inner.faculty.push(record.clone());
        Ok(record)
    }

    async fn list_students(&self) -> Result<Vec<StudentRecord>, HbError> {
        let inner = self.inner.read().await;
        Ok(inner.students.clone())
    }

    async fn list_faculty(&self) -> Result<Vec<FacultyRecord>, HbError> {
        let inner = self.inner.read().await;
        Ok(inner.faculty.clone())
    }
}

#[async_trait]
impl ProgramRegistry for MemoryStore {
    async fn insert_program(&self, new: NewProgram) -> Result<Program, HbError> {
        let mut inner = self.inner.write().await;
        let program = Program {
            id: Uuid::new_v4(),
            prg_name: new.prg_name,
            credits: new.credits,
            event_date: new.event_date,
            faculty_id: new.faculty_id,
        };
        inner.programs.push(program.clone());
        Ok(program)
    }

    async fn list_programs(&self) -> Result<Vec<Program>, HbError> {
        let inner = self.inner.read().await;
        Ok(inner.programs.clone())
    }
}

#[async_trait]
impl TransactionLedger for MemoryStore {
    async fn record_award(&self, new: NewTransaction) -> Result<Transaction, HbError> {
        let mut inner = self.inner.write().await;

        let student = inner
            .students
            .iter_mut()
            .find(|s| s.roll == new.receiver_id)
            .ok_or(HbError::NotFound("student"))?;
        student.credits += new.credits;

        let transaction = Transaction {
            id: Uuid::new_v4(),
            sender_id: new.sender_id,
            receiver_id: new.receiver_id,
            credits: new.credits,
            prg_name: new.prg_name,
            date: Utc::now(),
        };
        inner.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn list_by_sender(&self, fid: &str) -> Result<Vec<Transaction>, HbError> {
        let inner = self.inner.read().await;
        Ok(inner
            .transactions
            .iter()
            .filter(|t| t.sender_id == fid)
            .cloned()
            .collect())
    }

    async fn list_by_receiver(&self, roll: &str) -> Result<Vec<Transaction>, HbError> {
        let inner = self.inner.read().await;
        Ok(inner
            .transactions
            .iter()
            .filter(|t| t.receiver_id == roll)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn student(roll: &str) -> NewStudent {
        NewStudent {
            roll: roll.to_string(),
            name: "Alice".to_string(),
            password_hash: "hash".to_string(),
            course: "CS".to_string(),
            year: 2,
        }
    }

    fn faculty(fid: &str) -> NewFaculty {
        NewFaculty {
            fid: fid.to_string(),
            name: "Dr. A".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_student_insert_leaves_store_unchanged() {
        let store = MemoryStore::new();
        store.insert_student(student("S1")).await.unwrap();

        let result = store.insert_student(student("S1")).await;
        assert!(matches!(result, Err(HbError::DuplicateIdentity)));
        assert_eq!(store.list_students().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_faculty_insert_rejected() {
        let store = MemoryStore::new();
        store.insert_faculty(faculty("F1")).await.unwrap();

        let result = store.insert_faculty(faculty("F1")).await;
        assert!(matches!(result, Err(HbError::DuplicateIdentity)));
        assert_eq!(store.list_faculty().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_key_in_different_role_namespaces_is_allowed() {
        let store = MemoryStore::new();
        store.insert_student(student("X1")).await.unwrap();
        store.insert_faculty(faculty("X1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_programs_listed_in_insertion_order() {
        let store = MemoryStore::new();
        for name in ["first", "second", "third"] {
            store
                .insert_program(NewProgram {
                    prg_name: name.to_string(),
                    credits: 1,
                    event_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                    faculty_id: "F1".to_string(),
                })
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_programs()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.prg_name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_record_award_updates_balance_and_ledger() {
        let store = MemoryStore::new();
        store.insert_student(student("S1")).await.unwrap();

        store
            .record_award(NewTransaction {
                sender_id: "F1".to_string(),
                receiver_id: "S1".to_string(),
                credits: 5,
                prg_name: Some("Workshop".to_string()),
            })
            .await
            .unwrap();

        let balance = store.find_student("S1").await.unwrap().unwrap().credits;
        assert_eq!(balance, 5);
        assert_eq!(store.list_by_sender("F1").await.unwrap().len(), 1);
        assert_eq!(store.list_by_receiver("S1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_award_unknown_receiver_inserts_nothing() {
        let store = MemoryStore::new();

        let result = store
            .record_award(NewTransaction {
                sender_id: "F1".to_string(),
                receiver_id: "ghost".to_string(),
                credits: 5,
                prg_name: None,
            })
            .await;

        assert!(matches!(result, Err(HbError::NotFound("student"))));
        assert!(store.list_by_sender("F1").await.unwrap().is_empty());
    }
}
