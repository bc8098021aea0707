use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// User role. The role namespaces the identity key: students are keyed by
/// roll number, faculty by faculty ID. Role is immutable after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Student credential record (maps to the students table).
///
/// `credits` is only mutated through the transaction ledger.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRecord {
    pub roll: String,
    pub name: String,
    pub password_hash: String,
    pub course: String,
    pub year: i32,
    pub credits: i64,
}

/// Faculty credential record (maps to the faculty table).
#[derive(Debug, Clone, FromRow)]
pub struct FacultyRecord {
    pub fid: String,
    pub name: String,
    pub password_hash: String,
}

/// Parameters for a student insert (check-and-insert on `roll`).
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub roll: String,
    pub name: String,
    pub password_hash: String,
    pub course: String,
    pub year: i32,
}

/// Parameters for a faculty insert (check-and-insert on `fid`).
#[derive(Debug, Clone)]
pub struct NewFaculty {
    pub fid: String,
    pub name: String,
    pub password_hash: String,
}

/// Program record. Wire field names follow the client contract
/// (`_id`, `prg_name`, `event_date`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Program {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub prg_name: String,
    pub credits: i64,
    pub event_date: NaiveDate,
    pub faculty_id: String,
}

/// Parameters for a program insert. Ownership is fixed at creation.
#[derive(Debug, Clone)]
pub struct NewProgram {
    pub prg_name: String,
    pub credits: i64,
    pub event_date: NaiveDate,
    pub faculty_id: String,
}

/// Credit-award transaction record: a faculty member (sender) awards credits
/// to a student (receiver).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub sender_id: String,
    pub receiver_id: String,
    pub credits: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prg_name: Option<String>,
    pub date: DateTime<Utc>,
}

/// Parameters for a ledger insert. The store records the entry and credits
/// the receiver as a single atomic operation.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub sender_id: String,
    pub receiver_id: String,
    pub credits: i64,
    pub prg_name: Option<String>,
}

/// Student profile as exposed over the wire (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub roll: String,
    pub name: String,
    pub course: String,
    pub year: i32,
    pub credits: i64,
}

impl From<StudentRecord> for StudentProfile {
    fn from(record: StudentRecord) -> Self {
        StudentProfile {
            roll: record.roll,
            name: record.name,
            course: record.course,
            year: record.year,
            credits: record.credits,
        }
    }
}

/// Faculty profile as exposed over the wire (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyProfile {
    pub fid: String,
    pub name: String,
}

impl From<FacultyRecord> for FacultyProfile {
    fn from(record: FacultyRecord) -> Self {
        FacultyProfile {
            fid: record.fid,
            name: record.name,
        }
    }
}

/// Role-discriminated profile payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Student(StudentProfile),
    Faculty(FacultyProfile),
}

/// Response for identity resolution (`GET /user`).
#[derive(Debug, Clone, Serialize)]
pub struct IdentityResponse {
    pub role: Role,
    pub user: Profile,
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub role: Role,
}

/// Response for a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub role: Role,
}
