// Errors layer - Error type definitions
pub mod database;
pub mod registry;

// Re-exports for convenience
pub use database::DatabaseError;
pub use registry::RegistryError;
