use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::catalog::Album;
use tracing::{debug, info};
use url::Url;

use super::models::SearchResponse;
use crate::{
    error::{Error, Result},
    http,
    traits::{CatalogProvider, Credential},
};

const DEFAULT_BASE_URL: &str = "https://api.spotify.com/";

/// Spotify Web API: album search and the user's saved albums.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    base_url: Url,
    market: Option<String>,
    client: Client,
}

#[derive(Default)]
pub struct SpotifyClientBuilder {
    base_url: Option<String>,
    market: Option<String>,
    client: Option<Client>,
}

impl SpotifyClientBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Restricts search results to albums playable in this country (ISO 3166-1 alpha-2).
    pub fn market(mut self, market: &str) -> Self {
        self.market = Some(market.to_string());
        self
    }

    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<SpotifyClient> {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(&format!("{}/", base.trim_end_matches('/')))?;

        Ok(SpotifyClient {
            base_url,
            market: self.market,
            client: self.client.unwrap_or_default(),
        })
    }
}

impl SpotifyClient {
    pub fn new() -> Result<Self> {
        SpotifyClientBuilder::new().build()
    }

    fn search_url(&self, query: &str, limit: Option<usize>) -> Result<Url> {
        let mut url = self.base_url.join("v1/search")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query).append_pair("type", "album");
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(market) = &self.market {
                pairs.append_pair("market", market);
            }
        }
        Ok(url)
    }

    fn save_album_url(&self, album_id: &str) -> Result<Url> {
        let mut url = self.base_url.join("v1/me/albums")?;
        url.query_pairs_mut().append_pair("ids", album_id);
        Ok(url)
    }
}

#[async_trait]
impl CatalogProvider for SpotifyClient {
    fn id(&self) -> &'static str {
        "spotify"
    }

    fn name(&self) -> &'static str {
        "Spotify"
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
        if credential.access_token.is_empty() {
            return Err(Error::NotConfigured);
        }
        let url = self.save_album_url(&album.id)?;
        debug!("Request: PUT {}", url);
        let request = self
            .client
            .put(url)
            .bearer_auth(&credential.access_token)
            .header(reqwest::header::CONTENT_LENGTH, "0");
        http::send_expecting(request, |status| status == StatusCode::OK).await?;
        info!("Saved '{}' to Spotify library", album.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        let client = SpotifyClient::new().unwrap();
        let url = client.search_url("Pink Floyd The Wall", Some(5)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.spotify.com/v1/search?q=Pink+Floyd+The+Wall&type=album&limit=5"
        );
    }

    #[test]
    fn market_is_appended() {
        let client = SpotifyClientBuilder::new().market("GB").build().unwrap();
        let url = client.search_url("Blur", None).unwrap();
        assert_eq!(url.query(), Some("q=Blur&type=album&market=GB"));
    }

    #[test]
    fn custom_base_url_keeps_its_path() {
        let client = SpotifyClientBuilder::new()
            .base_url("http://localhost:8080/proxy/")
            .build()
            .unwrap();
        let url = client.save_album_url("abc").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/v1/me/albums?ids=abc");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SpotifyClientBuilder::new().base_url("not a url").build();
        assert!(matches!(result, Err(Error::Url(_))));
    }

    #[tokio::test]
    async fn saving_without_token_is_not_configured() {
        let client = SpotifyClient::new().unwrap();
        let album = Album {
            id: "abc".to_string(),
            title: "Abc".to_string(),
            artist: None,
            cover_image_url: None,
        };
        let result = client.add_to_library(&album, &Credential::default()).await;
        assert!(matches!(result, Err(Error::NotConfigured)));
    }
}
