use async_trait::async_trait;
use shared::catalog::Album;
use std::fmt;

use crate::error::Result;

/// Tokens for one catalog, passed into every call that talks to it.
///
/// For Spotify `access_token` is the user's OAuth token. For Apple Music it is
/// the developer token and `user_token` carries the Music-User-Token needed
/// for library writes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub user_token: Option<String>,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
            user_token: None,
        }
    }

    pub fn with_user_token(mut self, token: impl Into<String>) -> Self {
        self.user_token = Some(token.into());
        self
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("user_token", &self.user_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;

    /// First page of album matches for a free-text query, in relevance order.
    async fn search_albums(
        &self,
        query: &str,
        credential: &Credential,
        limit: Option<usize>,
    ) -> Result<Vec<Album>>;

    /// Saves an album to the user's library. Any non-success answer is an error.
    async fn add_to_library(&self, album: &Album, credential: &Credential) -> Result<()>;
}
