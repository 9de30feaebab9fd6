// Types layer - persisted entities and the domain model
pub mod db;
pub mod domain;
