use shared::ocr::{ExtractionMode, RawTextBlock};
use tracing::info;

use crate::error::Result;
use crate::extraction::{self, clusterer_for, DEFAULT_DISC_THRESHOLD};
use crate::results::ResultSet;
use crate::search;
use crate::traits::{CatalogProvider, Credential};

/// Runs one photo's OCR output through extraction and catalog search.
#[derive(Debug, Clone, Copy)]
pub struct Scanner {
    mode: ExtractionMode,
    threshold: f64,
    limit: Option<usize>,
}

impl Scanner {
    pub fn new(mode: ExtractionMode) -> Self {
        Self {
            mode,
            threshold: DEFAULT_DISC_THRESHOLD,
            limit: None,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Unique candidate titles for the blocks, without touching the network.
    pub fn titles(&self, blocks: &[RawTextBlock]) -> Result<Vec<String>> {
        let clusterer = clusterer_for(self.mode, self.threshold);
        extraction::extract_titles(blocks, clusterer.as_ref())
    }

    /// Extracts titles and resolves them against the catalog.
    ///
    /// Fails only with `NoDetections`; search failures for single titles are
    /// absorbed and simply produce fewer groups.
    pub async fn scan(
        &self,
        blocks: &[RawTextBlock],
        provider: &dyn CatalogProvider,
        credential: &Credential,
    ) -> Result<ResultSet> {
        let titles = self.titles(blocks)?;
        info!("Scanning {:?}: {} titles to search", self.mode, titles.len());
        let groups = search::search_all(provider, &titles, credential, self.limit).await;
        Ok(ResultSet::new(groups))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ExtractionMode::default())
    }
}
