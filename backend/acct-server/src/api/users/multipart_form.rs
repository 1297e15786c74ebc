use crate::ApiResult;

use acct_media::MediaFile;

use std::collections::HashMap;

use axum::extract::Multipart;

/// A fully read multipart body: text fields and file parts by field name.
///
/// A file part with no file name and no content counts as absent, which is
/// what browsers send for an untouched file input.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, MediaFile>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files
                        .insert(name, MediaFile::new(Some(file_name), content_type, bytes));
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub fn take_file(&mut self, name: &str) -> Option<MediaFile> {
        self.files.remove(name)
    }
}
