//! Centralized configuration management.
//!
//! Every environment variable the app reads is loaded here, once, so that
//! tokens travel as explicit values instead of being looked up ad hoc.

use shared::catalog::CatalogKind;
use shared::ocr::ExtractionMode;

use crate::apple_music::AppleMusicClientBuilder;
use crate::error::{Error, Result};
use crate::extraction::DEFAULT_DISC_THRESHOLD;
use crate::pipeline::Scanner;
use crate::spotify::SpotifyClientBuilder;
use crate::traits::Credential;
use crate::{Services, ServicesBuilder};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Spotify OAuth access token (SPOTIFY_ACCESS_TOKEN)
    pub spotify_access_token: Option<String>,
    /// Spotify market filter, e.g. "GB" (SPOTIFY_MARKET)
    pub spotify_market: Option<String>,
    /// Apple Music developer token (APPLE_DEVELOPER_TOKEN)
    pub apple_developer_token: Option<String>,
    /// Apple Music user token, needed for library writes (APPLE_MUSIC_USER_TOKEN)
    pub apple_music_user_token: Option<String>,
    /// Apple Music storefront (APPLE_STOREFRONT, default: "us")
    pub apple_storefront: String,
    /// Catalog used when none is requested (CDSAVER_CATALOG, default: "spotify")
    pub default_catalog: CatalogKind,
    /// Page size requested from the catalog (CDSAVER_SEARCH_LIMIT, default: provider's)
    pub search_limit: Option<usize>,
    /// Same-disc vertical distance in pixels (CDSAVER_DISC_THRESHOLD, default: 50)
    pub disc_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spotify_access_token: None,
            spotify_market: None,
            apple_developer_token: None,
            apple_music_user_token: None,
            apple_storefront: "us".to_string(),
            default_catalog: CatalogKind::Spotify,
            search_limit: None,
            disc_threshold: DEFAULT_DISC_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let default_catalog = match var("CDSAVER_CATALOG") {
            Some(value) => value.parse::<CatalogKind>().map_err(Error::Config)?,
            None => defaults.default_catalog,
        };

        let search_limit = var("CDSAVER_SEARCH_LIMIT")
            .map(|value| {
                value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| Error::Config(format!("invalid CDSAVER_SEARCH_LIMIT: {value}")))
            })
            .transpose()?;

        let disc_threshold = var("CDSAVER_DISC_THRESHOLD")
            .map(|value| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|px| px.is_finite() && *px > 0.0)
                    .ok_or_else(|| {
                        Error::Config(format!("invalid CDSAVER_DISC_THRESHOLD: {value}"))
                    })
            })
            .transpose()?
            .unwrap_or(defaults.disc_threshold);

        Ok(Self {
            spotify_access_token: var("SPOTIFY_ACCESS_TOKEN"),
            spotify_market: var("SPOTIFY_MARKET"),
            apple_developer_token: var("APPLE_DEVELOPER_TOKEN"),
            apple_music_user_token: var("APPLE_MUSIC_USER_TOKEN"),
            apple_storefront: var("APPLE_STOREFRONT").unwrap_or(defaults.apple_storefront),
            default_catalog,
            search_limit,
            disc_threshold,
        })
    }

    /// Credential for one catalog. Fails if the catalog's token is missing.
    pub fn credential(&self, kind: CatalogKind) -> Result<Credential> {
        match kind {
            CatalogKind::Spotify => self
                .spotify_access_token
                .as_deref()
                .map(Credential::bearer)
                .ok_or_else(|| Error::Config("SPOTIFY_ACCESS_TOKEN is not set".to_string())),
            CatalogKind::AppleMusic => {
                let developer = self.apple_developer_token.as_deref().ok_or_else(|| {
                    Error::Config("APPLE_DEVELOPER_TOKEN is not set".to_string())
                })?;
                let credential = Credential::bearer(developer);
                Ok(match &self.apple_music_user_token {
                    Some(user) => credential.with_user_token(user.as_str()),
                    None => credential,
                })
            }
        }
    }

    /// Registry with both catalog clients, the configured one as default.
    pub fn services(&self) -> Result<Services> {
        let mut spotify = SpotifyClientBuilder::new();
        if let Some(market) = &self.spotify_market {
            spotify = spotify.market(market);
        }
        let apple = AppleMusicClientBuilder::new().storefront(&self.apple_storefront);

        ServicesBuilder::new()
            .add_catalog(spotify.build()?)
            .add_catalog(apple.build()?)
            .default_catalog(self.default_catalog.id())
            .build()
            .map_err(|e| Error::Config(e.to_string()))
    }

    pub fn scanner(&self, mode: ExtractionMode) -> Scanner {
        Scanner::new(mode)
            .threshold(self.disc_threshold)
            .limit(self.search_limit)
    }
}
