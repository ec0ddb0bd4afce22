use async_trait::async_trait;
use reqwest::Client;
use shared::catalog::Album;
use tracing::{debug, info};
use url::Url;

use super::models::SearchResponse;
use crate::{
    error::{Error, Result},
    http,
    traits::{CatalogProvider, Credential},
};

const DEFAULT_BASE_URL: &str = "https://api.music.apple.com/";
const DEFAULT_STOREFRONT: &str = "us";
const MUSIC_USER_TOKEN_HEADER: &str = "Music-User-Token";

/// Apple Music API: catalog search in one storefront and library writes.
#[derive(Debug, Clone)]
pub struct AppleMusicClient {
    base_url: Url,
    storefront: String,
    client: Client,
}

#[derive(Default)]
pub struct AppleMusicClientBuilder {
    base_url: Option<String>,
    storefront: Option<String>,
    client: Option<Client>,
}

impl AppleMusicClientBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn storefront(mut self, storefront: &str) -> Self {
        self.storefront = Some(storefront.to_lowercase());
        self
    }

    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<AppleMusicClient> {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(&format!("{}/", base.trim_end_matches('/')))?;

        let storefront = self
            .storefront
            .unwrap_or_else(|| DEFAULT_STOREFRONT.to_string());
        if storefront.is_empty() || !storefront.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::Config(format!("invalid storefront: {storefront:?}")));
        }

        Ok(AppleMusicClient {
            base_url,
            storefront,
            client: self.client.unwrap_or_default(),
        })
    }
}

impl AppleMusicClient {
    pub fn new() -> Result<Self> {
        AppleMusicClientBuilder::new().build()
    }

    pub fn storefront(&self) -> &str {
        &self.storefront
    }

    fn search_url(&self, query: &str, limit: Option<usize>) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("v1/catalog/{}/search", self.storefront))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("term", query).append_pair("types", "albums");
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }

    fn library_url(&self, album_id: &str) -> Result<Url> {
        let mut url = self.base_url.join("v1/me/library")?;
        url.query_pairs_mut().append_pair("ids[albums]", album_id);
        Ok(url)
    }
}

#[async_trait]
impl CatalogProvider for AppleMusicClient {
    fn id(&self) -> &'static str {
        "apple-music"
    }

    fn name(&self) -> &'static str {
        "Apple Music"
    }

    async fn search_albums(
        &self,
        query: &str,
        credential: &Credential,
        limit: Option<usize>,
    ) -> Result<Vec<Album>> {
        let url = self.search_url(query, limit)?;
        debug!("Request: GET {}", url);
        let request = self
            .client
            .get(url)
            .bearer_auth(&credential.access_token);
        let response: SearchResponse = http::fetch_json(request).await?;
        Ok(response.into_albums())
    }

    async fn add_to_library(&self, album: &Album, credential: &Credential) -> Result<()> {
        let user_token = credential
            .user_token
            .as_deref()
            .ok_or(Error::NotConfigured)?;
        let url = self.library_url(&album.id)?;
        debug!("Request: POST {}", url);
        let request = self
            .client
            .post(url)
            .bearer_auth(&credential.access_token)
            .header(MUSIC_USER_TOKEN_HEADER, user_token);
        // Apple acknowledges library writes with 202 Accepted.
        http::send_expecting(request, |status| status.is_success()).await?;
        info!("Saved '{}' to Apple Music library", album.title);
        Ok(())
    }
}
