// Database entities - SeaORM models
pub mod account;
pub mod department;
pub mod grade;
