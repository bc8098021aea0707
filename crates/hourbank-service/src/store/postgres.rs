//! Postgres store adapter (sqlx).
//!
//! Identity-key uniqueness is backed by unique constraints, so the
//! check-and-insert requirement holds under concurrent registrations.
//! Credit awards run inside a database transaction.

use super::{CredentialStore, ProgramRegistry, TransactionLedger};
use crate::errors::HbError;
use crate::models::{
    FacultyRecord, NewFaculty, NewProgram, NewStudent, NewTransaction, Program, StudentRecord,
    Transaction,
};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to Postgres and run pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, HbError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| HbError::Database(format!("Failed to connect: {}", e)))?;

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .map_err(|e| HbError::Database(format!("Migration failed: {}", e)))?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error, context: &str) -> HbError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => HbError::DuplicateIdentity,
        _ => HbError::Database(format!("{}: {}", context, e)),
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_student(&self, roll: &str) -> Result<Option<StudentRecord>, HbError> {
        sqlx::query_as::<_, StudentRecord>(
            r#"
            SELECT roll, name, password_hash, course, year, credits
            FROM students
            WHERE roll = $1
            "#,
        )
        .bind(roll)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| HbError::Database(format!("Failed to fetch student: {}", e)))
    }

    async fn find_faculty(&self, fid: &str) -> Result<Option<FacultyRecord>, HbError> {
        sqlx::query_as::<_, FacultyRecord>(
            r#"
            SELECT fid, name, password_hash
            FROM faculty
            WHERE fid = $1
            "#,
        )
        .bind(fid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| HbError::Database(format!("Failed to fetch faculty member: {}", e)))
    }

    async fn insert_student(&self, new: NewStudent) -> Result<StudentRecord, HbError> {
        sqlx::query_as::<_, StudentRecord>(
            r#"
            INSERT INTO students (roll, name, password_hash, course, year, credits)
            VALUES ($1, $2, $3, $4, $5, 0)
            RETURNING roll, name, password_hash, course, year, credits
            "#,
        )
        .bind(&new.roll)
        .bind(&new.name)
        .bind(&new.password_hash)
        .bind(&new.course)
        .bind(new.year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "Failed to insert student"))
    }

    async fn insert_faculty(&self, new: NewFaculty) -> Result<FacultyRecord, HbError> {
        sqlx::query_as::<_, FacultyRecord>(
            r#"
            INSERT INTO faculty (fid, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING fid, name, password_hash
            "#,
        )
        .bind(&new.fid)
        .bind(&new.name)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "Failed to insert faculty member"))
    }

    async fn list_students(&self) -> Result<Vec<StudentRecord>, HbError> {
        sqlx::query_as::<_, StudentRecord>(
            r#"
            SELECT roll, name, password_hash, course, year, credits
            FROM students
            ORDER BY registered_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HbError::Database(format!("Failed to list students: {}", e)))
    }

    async fn list_faculty(&self) -> Result<Vec<FacultyRecord>, HbError> {
        sqlx::query_as::<_, FacultyRecord>(
            r#"
            SELECT fid, name, password_hash
            FROM faculty
            ORDER BY registered_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HbError::Database(format!("Failed to list faculty: {}", e)))
    }
}

#[async_trait]
impl ProgramRegistry for PgStore {
    async fn insert_program(&self, new: NewProgram) -> Result<Program, HbError> {
        sqlx::query_as::<_, Program>(
            r#"
            INSERT INTO programs (prg_name, credits, event_date, faculty_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, prg_name, credits, event_date, faculty_id
            "#,
        )
        .bind(&new.prg_name)
        .bind(new.credits)
        .bind(new.event_date)
        .bind(&new.faculty_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| HbError::Database(format!("Failed to insert program: {}", e)))
    }

    async fn list_programs(&self) -> Result<Vec<Program>, HbError> {
        sqlx::query_as::<_, Program>(
            r#"
            SELECT id, prg_name, credits, event_date, faculty_id
            FROM programs
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HbError::Database(format!("Failed to list programs: {}", e)))
    }
}

#[async_trait]
impl TransactionLedger for PgStore {
    async fn record_award(&self, new: NewTransaction) -> Result<Transaction, HbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| HbError::Database(format!("Failed to begin transaction: {}", e)))?;

        let updated = sqlx::query(
            r#"
            UPDATE students
            SET credits = credits + $1
            WHERE roll = $2
            "#,
        )
        .bind(new.credits)
        .bind(&new.receiver_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| HbError::Database(format!("Failed to award credits: {}", e)))?;

        if updated.rows_affected() == 0 {
            // Dropping the open transaction rolls it back.
            return Err(HbError::NotFound("student"));
        }

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (sender_id, receiver_id, credits, prg_name, date)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, sender_id, receiver_id, credits, prg_name, date
            "#,
        )
        .bind(&new.sender_id)
        .bind(&new.receiver_id)
        .bind(new.credits)
        .bind(&new.prg_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| HbError::Database(format!("Failed to insert transaction: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| HbError::Database(format!("Failed to commit transaction: {}", e)))?;

        Ok(transaction)
    }

    async fn list_by_sender(&self, fid: &str) -> Result<Vec<Transaction>, HbError> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, sender_id, receiver_id, credits, prg_name, date
            FROM transactions
            WHERE sender_id = $1
            ORDER BY date
            "#,
        )
        .bind(fid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HbError::Database(format!("Failed to list transactions: {}", e)))
    }

    async fn list_by_receiver(&self, roll: &str) -> Result<Vec<Transaction>, HbError> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, sender_id, receiver_id, credits, prg_name, date
            FROM transactions
            WHERE receiver_id = $1
            ORDER BY date
            "#,
        )
        .bind(roll)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HbError::Database(format!("Failed to list transactions: {}", e)))
    }
}
