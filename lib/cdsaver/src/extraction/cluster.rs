use shared::ocr::{ExtractionMode, RawTextBlock};
use tracing::debug;

use super::normalize::normalize_block;

/// Vertical distance, in pixels, under which two blocks belong to the same disc.
pub const DEFAULT_DISC_THRESHOLD: f64 = 50.0;

/// Turns the OCR blocks of one photo into candidate titles.
pub trait TitleClusterer: Send + Sync {
    fn cluster(&self, blocks: &[RawTextBlock]) -> Vec<String>;
}

/// Treats every readable block as its own candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholePhoto;

impl TitleClusterer for WholePhoto {
    fn cluster(&self, blocks: &[RawTextBlock]) -> Vec<String> {
        blocks.iter().filter_map(normalize_block).collect()
    }
}

/// Groups blocks into discs by the vertical position of consecutive blocks.
///
/// Blocks are consumed in the order the OCR engine returned them. While blocks
/// stay within `threshold` of the previous one they are taken to be on the same
/// spine, and every fragment seen so far on that spine is combined with the new
/// one, so the catalog gets queried with each plausible "artist title" joining.
/// A larger jump closes the disc. Blocks without geometry are skipped.
#[derive(Debug, Clone, Copy)]
pub struct StackedDiscs {
    pub threshold: f64,
}

impl Default for StackedDiscs {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DISC_THRESHOLD,
        }
    }
}

impl StackedDiscs {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl TitleClusterer for StackedDiscs {
    fn cluster(&self, blocks: &[RawTextBlock]) -> Vec<String> {
        let mut titles = Vec::new();
        let mut disc: Vec<String> = Vec::new();
        let mut previous_y: Option<f64> = None;

        for block in blocks {
            let Some(y) = block.top_left_y else {
                debug!("Skipping block without geometry: {:?}", block.text);
                continue;
            };
            let Some(fragment) = normalize_block(block) else {
                continue;
            };

            match previous_y {
                Some(prev) if (y - prev).abs() < self.threshold => {
                    let combined: Vec<String> = disc
                        .iter()
                        .rev()
                        .map(|existing| format!("{existing} {fragment}"))
                        .collect();
                    disc.splice(0..0, combined);
                    disc.push(fragment);
                }
                Some(_) => {
                    titles.append(&mut disc);
                    disc.push(fragment);
                }
                None => disc.push(fragment),
            }
            previous_y = Some(y);
        }

        titles.append(&mut disc);
        titles
    }
}

impl From<ExtractionMode> for Box<dyn TitleClusterer> {
    fn from(mode: ExtractionMode) -> Self {
        clusterer_for(mode, DEFAULT_DISC_THRESHOLD)
    }
}

pub fn clusterer_for(mode: ExtractionMode, threshold: f64) -> Box<dyn TitleClusterer> {
    match mode {
        ExtractionMode::WholePhoto => Box::new(WholePhoto),
        ExtractionMode::StackedDiscs => Box::new(StackedDiscs::new(threshold)),
    }
}
