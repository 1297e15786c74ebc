use acct_core::User;

/// Creates a logged-out test user with sensible defaults
pub fn create_test_user(username: &str) -> User {
    User::new(
        username,
        &format!("{}@example.com", username),
        "Test User",
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        format!("https://media.local/{}.png", username),
        None,
    )
}
