use acct_db::Database;

/// Creates an in-memory SQLite database with migrations run
pub async fn create_test_database() -> Database {
    Database::in_memory()
        .await
        .expect("Failed to create test database")
}
