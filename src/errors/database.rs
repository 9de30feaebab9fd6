use thiserror::Error;

/// A failed database access, tagged with the operation that ran it. Every
/// store reports failures through this one shape, transaction begin/commit
/// included, so the operation name always says where the failure happened.
#[derive(Error, Debug)]
#[error("Database error: {operation} failed: {source}")]
pub struct DatabaseError {
    pub operation: String,
    #[source]
    pub source: sea_orm::DbErr,
}
