use bytes::Bytes;

/// A file received from the client, held in memory until uploaded
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Client-supplied file name, used only for its extension
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl MediaFile {
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lower-cased alphanumeric extension of the client file name, if any
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.as_deref()?;
        let (_, ext) = name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();

        if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }

        Some(ext)
    }
}
