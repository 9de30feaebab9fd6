// Stores layer - Data access over the registry schema
pub mod account_store;
pub mod department_store;
pub mod grade_store;

pub use account_store::AccountStore;
pub use department_store::DepartmentStore;
pub use grade_store::GradeStore;

/// Whether a database error is a unique-constraint violation on the given
/// column. SQLite reports `UNIQUE constraint failed: table.column`, which is
/// enough to tell a username collision from a raced registration id.
pub(crate) fn unique_violation(err: &sea_orm::DbErr, column: &str) -> bool {
    let message = err.to_string();
    message.contains("UNIQUE") && message.contains(column)
}
