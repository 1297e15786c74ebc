use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Uploaded file is empty {location}")]
    EmptyFile { location: ErrorLocation },

    #[error("Unsupported media type '{content_type}' {location}")]
    UnsupportedType {
        content_type: String,
        location: ErrorLocation,
    },

    #[error("File of {size} bytes exceeds the {limit} byte limit {location}")]
    TooLarge {
        size: usize,
        limit: usize,
        location: ErrorLocation,
    },

    #[error("'{url}' was not issued by this store {location}")]
    UnknownUrl { url: String, location: ErrorLocation },

    #[error("Failed to store media at {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, MediaError>;
