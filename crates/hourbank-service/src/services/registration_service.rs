//! Role-specific account registration.

use crate::config::Config;
use crate::crypto;
use crate::errors::HbError;
use crate::models::{NewFaculty, NewStudent, RegisterResponse, Role};
use crate::observability::metrics::record_registration;
use crate::store::{CredentialStore, Store};
use serde::Deserialize;

/// Registration request body. `role` selects which identity fields apply;
/// it defaults to student when absent, matching the mobile client.
///
/// `year` accepts either a JSON number or a numeric string because the
/// client submits free-form text input.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub roll: Option<String>,
    #[serde(default)]
    pub fid: Option<String>,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub year: Option<serde_json::Value>,
}

/// Register a new user. The identity-key uniqueness check and the insert are
/// a single atomic store operation, so a duplicate registration performs no
/// mutation.
pub async fn register(
    store: &dyn Store,
    config: &Config,
    request: RegisterRequest,
) -> Result<RegisterResponse, HbError> {
    let role = request.role.unwrap_or(Role::Student);
    let result = register_role(store, config, role, request).await;
    record_registration(
        role.as_str(),
        if result.is_ok() { "success" } else { "failure" },
    );
    result
}

async fn register_role(
    store: &dyn Store,
    config: &Config,
    role: Role,
    request: RegisterRequest,
) -> Result<RegisterResponse, HbError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(HbError::Validation("Name is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(HbError::Validation("Password is required".to_string()));
    }

    let password_hash = crypto::hash_password(&request.password, config.bcrypt_cost)?;

    match role {
        Role::Faculty => {
            let fid = require_key(request.fid.as_deref(), "fid")?;
            store
                .insert_faculty(NewFaculty {
                    fid,
                    name: name.to_string(),
                    password_hash,
                })
                .await?;
            tracing::info!(role = "faculty", "Registered new user");
            Ok(RegisterResponse {
                message: "Faculty registered successfully".to_string(),
                role,
            })
        }
        Role::Student => {
            let roll = require_key(request.roll.as_deref(), "roll")?;
            let course = request
                .course
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| HbError::Validation("Course is required".to_string()))?
                .to_string();
            let year = parse_year(request.year.as_ref())?;
            store
                .insert_student(NewStudent {
                    roll,
                    name: name.to_string(),
                    password_hash,
                    course,
                    year,
                })
                .await?;
            tracing::info!(role = "student", "Registered new user");
            Ok(RegisterResponse {
                message: "Student registered successfully".to_string(),
                role,
            })
        }
    }
}

fn require_key(value: Option<&str>, field: &str) -> Result<String, HbError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| HbError::Validation(format!("{field} is required")))
}

/// Parse the enrollment year from a JSON number or numeric string.
/// Must be a positive integer.
fn parse_year(value: Option<&serde_json::Value>) -> Result<i32, HbError> {
    let value = value.ok_or_else(|| HbError::Validation("Year is required".to_string()))?;

    let year = match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| HbError::Validation("Year must be a positive integer".to_string()))?;

    if year <= 0 || year > i64::from(i32::MAX) {
        return Err(HbError::Validation(
            "Year must be a positive integer".to_string(),
        ));
    }

    Ok(year as i32)
}
