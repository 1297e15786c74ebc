#![allow(dead_code)]

pub mod fixtures;
pub mod test_db;

pub use fixtures::create_test_user;
pub use test_db::create_test_database;
