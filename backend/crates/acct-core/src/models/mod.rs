pub mod public_user;
pub mod user;
