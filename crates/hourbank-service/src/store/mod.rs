//! Storage ports and adapters.
//!
//! Persistence is an external collaborator reached only through these traits.
//! Adapters map their backend failures into `HbError` variants so the service
//! layer never sees backend-specific error types.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::errors::HbError;
use crate::models::{
    FacultyRecord, NewFaculty, NewProgram, NewStudent, NewTransaction, Program, StudentRecord,
    Transaction,
};
use async_trait::async_trait;

/// Credential storage: user records keyed by role-specific identity keys.
///
/// Inserts are atomic check-and-inserts. Two concurrent registrations of the
/// same identity key must produce exactly one record and one
/// `HbError::DuplicateIdentity`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_student(&self, roll: &str) -> Result<Option<StudentRecord>, HbError>;

    async fn find_faculty(&self, fid: &str) -> Result<Option<FacultyRecord>, HbError>;

    async fn insert_student(&self, new: NewStudent) -> Result<StudentRecord, HbError>;

    async fn insert_faculty(&self, new: NewFaculty) -> Result<FacultyRecord, HbError>;

    /// All students in registration order, for the directory listing.
    async fn list_students(&self) -> Result<Vec<StudentRecord>, HbError>;

    /// All faculty members in registration order, for the directory listing.
    async fn list_faculty(&self) -> Result<Vec<FacultyRecord>, HbError>;
}

/// Program storage. Listing order is registry insertion order and stable.
#[async_trait]
pub trait ProgramRegistry: Send + Sync {
    async fn insert_program(&self, new: NewProgram) -> Result<Program, HbError>;

    async fn list_programs(&self) -> Result<Vec<Program>, HbError>;
}

/// Credit-award ledger.
#[async_trait]
pub trait TransactionLedger: Send + Sync {
    /// Record a ledger entry and credit the receiving student as one atomic
    /// operation. Fails with `HbError::NotFound("student")` when the receiver
    /// is unknown, inserting nothing.
    async fn record_award(&self, new: NewTransaction) -> Result<Transaction, HbError>;

    async fn list_by_sender(&self, fid: &str) -> Result<Vec<Transaction>, HbError>;

    async fn list_by_receiver(&self, roll: &str) -> Result<Vec<Transaction>, HbError>;
}

/// Everything the service needs from persistence.
pub trait Store: CredentialStore + ProgramRegistry + TransactionLedger {}

impl<T: CredentialStore + ProgramRegistry + TransactionLedger> Store for T {}
