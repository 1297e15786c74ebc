pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::public_user::PublicUser;
pub use models::user::User;
pub use validation::{normalize_identifier, require_non_blank};
