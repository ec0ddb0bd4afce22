use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::CatalogProvider;

/// The catalogs available to the app, keyed by provider id.
pub struct Services {
    catalogs: HashMap<String, Arc<dyn CatalogProvider>>,
    default_catalog: Option<String>,
}

impl Services {
    pub fn catalog(&self, id: Option<&str>) -> Option<&Arc<dyn CatalogProvider>> {
        let key = id.or(self.default_catalog.as_deref())?;
        self.catalogs.get(key)
    }

    /// Like [`Services::catalog`], but a missing provider is an error.
    pub fn require_catalog(&self, id: Option<&str>) -> Result<Arc<dyn CatalogProvider>> {
        self.catalog(id).cloned().ok_or_else(|| {
            Error::UnknownCatalog(
                id.or(self.default_catalog.as_deref())
                    .unwrap_or_default()
                    .to_string(),
            )
        })
    }

    pub fn list_catalogs(&self) -> Vec<(&str, &str)> {
        let mut catalogs: Vec<_> = self
            .catalogs
            .values()
            .map(|p| (p.id(), p.name()))
            .collect();
        catalogs.sort();
        catalogs
    }
}

pub struct ServicesBuilder {
    catalogs: HashMap<String, Arc<dyn CatalogProvider>>,
    default_catalog: Option<String>,
}

impl ServicesBuilder {
    pub fn new() -> Self {
        Self {
            catalogs: HashMap::new(),
            default_catalog: None,
        }
    }

    pub fn add_catalog(mut self, provider: impl CatalogProvider + 'static) -> Self {
        let id = provider.id().to_string();
        if self.default_catalog.is_none() {
            self.default_catalog = Some(id.clone());
        }
        self.catalogs.insert(id, Arc::new(provider));
        self
    }

    pub fn default_catalog(mut self, id: &str) -> Self {
        self.default_catalog = Some(id.to_string());
        self
    }

    pub fn build(self) -> std::result::Result<Services, &'static str> {
        if self.catalogs.is_empty() {
            return Err("at least one catalog provider required");
        }
        if let Some(default) = &self.default_catalog {
            if !self.catalogs.contains_key(default) {
                return Err("default catalog is not registered");
            }
        }

        Ok(Services {
            catalogs: self.catalogs,
            default_catalog: self.default_catalog,
        })
    }
}

impl Default for ServicesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
