use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        /// Names of the offending input fields
        fields: Vec<String>,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
