//! Candidate title extraction from OCR output.
//!
//! normalize → cluster → dedup. The clustering step is pluggable through
//! [`TitleClusterer`].

pub mod cluster;
pub mod dedup;
pub mod normalize;

pub use cluster::{clusterer_for, StackedDiscs, TitleClusterer, WholePhoto, DEFAULT_DISC_THRESHOLD};
pub use dedup::dedup;
pub use normalize::{normalize, normalize_block};

use shared::ocr::RawTextBlock;
use tracing::info;

use crate::error::{Error, Result};

/// Produces the unique search queries for one photo.
///
/// Fails with [`Error::NoDetections`] when the OCR engine found nothing or when
/// every block was discarded as noise.
pub fn extract_titles(blocks: &[RawTextBlock], clusterer: &dyn TitleClusterer) -> Result<Vec<String>> {
    if blocks.is_empty() {
        return Err(Error::NoDetections);
    }

    let candidates = clusterer.cluster(blocks);
    let candidate_count = candidates.len();
    let titles = dedup(candidates);
    info!(
        "Extracted {} unique titles ({} candidates) from {} text blocks",
        titles.len(),
        candidate_count,
        blocks.len()
    );

    if titles.is_empty() {
        return Err(Error::NoDetections);
    }
    Ok(titles)
}
