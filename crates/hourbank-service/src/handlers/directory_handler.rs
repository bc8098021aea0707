//! Directory lookups over registered users. Read-only and thin enough that
//! they go straight to the store without a service layer.

use crate::errors::HbError;
use crate::handlers::AppState;
use crate::models::{FacultyProfile, StudentProfile};
use crate::store::CredentialStore;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// GET /students
pub async fn handle_list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudentProfile>>, HbError> {
    let students = state.store.list_students().await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// GET /students/:roll
pub async fn handle_get_student(
    State(state): State<Arc<AppState>>,
    Path(roll): Path<String>,
) -> Result<Json<StudentProfile>, HbError> {
    let student = state
        .store
        .find_student(&roll)
        .await?
        .ok_or(HbError::NotFound("student"))?;
    Ok(Json(student.into()))
}

/// GET /faculty
pub async fn handle_list_faculty(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FacultyProfile>>, HbError> {
    let faculty = state.store.list_faculty().await?;
    Ok(Json(faculty.into_iter().map(Into::into).collect()))
}

/// GET /faculty/:fid
pub async fn handle_get_faculty(
    State(state): State<Arc<AppState>>,
    Path(fid): Path<String>,
) -> Result<Json<FacultyProfile>, HbError> {
    let member = state
        .store
        .find_faculty(&fid)
        .await?
        .ok_or(HbError::NotFound("faculty"))?;
    Ok(Json(member.into()))
}
