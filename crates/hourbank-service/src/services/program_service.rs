//! Role-gated program listing and creation.

use crate::crypto::Claims;
use crate::errors::HbError;
use crate::models::{NewProgram, Program, Role};
use crate::observability::metrics::record_program_created;
use crate::store::{ProgramRegistry, Store};
use chrono::NaiveDate;
use serde::Deserialize;

/// Program creation request. `event_date` arrives as a string and is parsed
/// here so a malformed date surfaces as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateProgramRequest {
    pub prg_name: String,
    pub credits: i64,
    pub event_date: String,
}

/// List all programs in registry insertion order. Available to both roles.
pub async fn list_programs(store: &dyn Store) -> Result<Vec<Program>, HbError> {
    store.list_programs().await
}

/// Create a program owned by the authenticated faculty member.
///
/// Students are refused outright; no validation or storage work happens for
/// them. Fails with a validation error when credits are not positive or the
/// event date is not a well-formed `YYYY-MM-DD` calendar date, inserting
/// nothing.
pub async fn create_program(
    store: &dyn Store,
    claims: &Claims,
    request: CreateProgramRequest,
) -> Result<Program, HbError> {
    if claims.role != Role::Faculty {
        return Err(HbError::RoleNotPermitted {
            required: Role::Faculty,
        });
    }

    let prg_name = request.prg_name.trim();
    if prg_name.is_empty() {
        return Err(HbError::Validation("Program name is required".to_string()));
    }

    if request.credits <= 0 {
        return Err(HbError::Validation(
            "Credits must be a positive integer".to_string(),
        ));
    }

    let event_date = NaiveDate::parse_from_str(&request.event_date, "%Y-%m-%d").map_err(|_| {
        HbError::Validation(format!(
            "Event date must be a YYYY-MM-DD calendar date, got {:?}",
            request.event_date
        ))
    })?;

    let program = store
        .insert_program(NewProgram {
            prg_name: prg_name.to_string(),
            credits: request.credits,
            event_date,
            faculty_id: claims.sub.clone(),
        })
        .await?;

    record_program_created();
    tracing::info!(program_id = %program.id, "Program created");

    Ok(program)
}
