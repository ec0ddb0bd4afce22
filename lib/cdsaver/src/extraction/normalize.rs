use itertools::Itertools;
use regex::Regex;
use shared::ocr::RawTextBlock;
use std::sync::LazyLock;

// Anything that is not a letter, combining mark, digit, whitespace or hyphen.
static RE_SYMBOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\s-]").expect("symbol pattern is valid"));

/// Cleans one OCR text block into a candidate title.
///
/// Returns `None` for blocks that are empty after cleaning or that only hold
/// digits, spaces and hyphens (barcodes, catalog numbers, track listings).
pub fn normalize(text: &str) -> Option<String> {
    let cleaned = RE_SYMBOLS.replace_all(text, "");

    let joined = if cleaned.contains('\n') {
        cleaned
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .unique()
            .join(" ")
    } else {
        cleaned.into_owned()
    };

    let title = joined.trim();
    if title.is_empty() || is_numeric(title) {
        return None;
    }
    Some(title.to_string())
}

pub fn normalize_block(block: &RawTextBlock) -> Option<String> {
    normalize(&block.text)
}

fn is_numeric(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
}
