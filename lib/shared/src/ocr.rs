use serde::{Deserialize, Serialize};

/// One text detection as reported by the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTextBlock {
    pub text: String,
    /// Vertical position of the block's top-left corner, in image coordinates.
    /// `None` when the engine reported no corner points.
    #[serde(default)]
    pub top_left_y: Option<f64>,
}

impl RawTextBlock {
    pub fn new(text: impl Into<String>, top_left_y: f64) -> Self {
        Self {
            text: text.into(),
            top_left_y: Some(top_left_y),
        }
    }

    pub fn without_geometry(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            top_left_y: None,
        }
    }
}

/// How text blocks from a photo are turned into candidate titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Every block is its own candidate (a single album cover).
    #[default]
    WholePhoto,
    /// Blocks are grouped per disc by vertical proximity (a stack of spines).
    StackedDiscs,
}

impl std::str::FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "whole" | "whole-photo" | "cover" => Ok(Self::WholePhoto),
            "stack" | "stacked" | "stacked-discs" => Ok(Self::StackedDiscs),
            other => Err(format!("unknown extraction mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_without_geometry_deserializes() {
        let block: RawTextBlock = serde_json::from_str(r#"{"text":"Abbey Road"}"#).unwrap();
        assert_eq!(block, RawTextBlock::without_geometry("Abbey Road"));
    }

    #[test]
    fn mode_parses_aliases() {
        assert_eq!("stack".parse::<ExtractionMode>(), Ok(ExtractionMode::StackedDiscs));
        assert_eq!("Whole".parse::<ExtractionMode>(), Ok(ExtractionMode::WholePhoto));
        assert!("sideways".parse::<ExtractionMode>().is_err());
    }
}
