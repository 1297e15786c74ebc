/// Partial update of a user's profile columns. `None` leaves the column
/// untouched.
///
/// Credentials are not part of it: the password hash and refresh token only
/// change through the compare-and-swap writes on the repository.
///
/// `cover_image` is nullable, so it uses a nested option: `Some(None)`
/// writes NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFieldsUpdate {
    pub email: Option<String>,
    pub fullname: Option<String>,
    pub avatar: Option<String>,
    pub cover_image: Option<Option<String>>,
}

impl UserFieldsUpdate {
    pub fn avatar(url: impl Into<String>) -> Self {
        Self {
            avatar: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn cover_image(url: impl Into<String>) -> Self {
        Self {
            cover_image: Some(Some(url.into())),
            ..Self::default()
        }
    }
}
