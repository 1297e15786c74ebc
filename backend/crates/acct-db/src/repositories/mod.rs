pub mod user_fields_update;
pub mod user_repository;
