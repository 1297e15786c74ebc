pub mod error;
pub mod local_media_uploader;
pub mod media_file;
pub mod media_uploader;

pub use error::{MediaError, Result};
pub use local_media_uploader::LocalMediaUploader;
pub use media_file::MediaFile;
pub use media_uploader::{MediaUploader, UploadedMedia};
