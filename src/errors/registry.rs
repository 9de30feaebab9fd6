use thiserror::Error;

use super::DatabaseError;
use crate::types::db::account::Role;

/// Domain errors of the account registry. Store and service operations
/// return these; infrastructure failures arrive wrapped in [`DatabaseError`].
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Username already registered: {0}")]
    DuplicateUsername(String),

    #[error("No account with registration id: {0}")]
    AccountNotFound(String),

    #[error("Account {registration_id} is registered as {stored}, not {requested}")]
    RoleMismatch {
        registration_id: String,
        stored: Role,
        requested: Role,
    },

    #[error("Required field is missing or empty: {field}")]
    MissingField { field: &'static str },

    #[error("Registration id space exhausted for prefix {prefix} in {year}")]
    RegistrationIdExhausted { prefix: &'static str, year: i32 },

    #[error("Credential hashing failed: {0}")]
    Hashing(String),

    #[error("Department not found: {0}")]
    DepartmentNotFound(i32),

    #[error("Department already exists: {0}")]
    DuplicateDepartment(String),

    #[error("Grade not found: {0}")]
    GradeNotFound(i32),

    #[error("Grade already exists: {0}")]
    DuplicateGrade(String),

    #[error("Grade {id} still has {students} student(s) assigned")]
    GradeInUse { id: i32, students: u64 },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl RegistryError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> RegistryError {
        RegistryError::Database(DatabaseError {
            operation: operation.to_string(),
            source,
        })
    }
}
