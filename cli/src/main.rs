use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cdsaver::{config::AppConfig, Error, ResultSet};
use clap::Parser;
use serde::Serialize;
use shared::catalog::{CatalogKind, ResultGroup};
use shared::library::CommitSummary;
use shared::ocr::{ExtractionMode, RawTextBlock};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Find the albums in a photo of CD spines or covers and save them to a streaming library.
///
/// Takes the OCR output of the photo as JSON: an array of
/// `{"text": "...", "top_left_y": 123.0}` objects in the order the OCR
/// engine returned them.
#[derive(Parser)]
#[command(name = "cdsaver", version)]
struct Cli {
    /// OCR output for one photo
    blocks: PathBuf,

    /// "whole" for a single cover, "stack" for a pile of spines
    #[arg(long, default_value = "whole")]
    mode: ExtractionMode,

    /// Catalog to search (spotify, apple-music). Defaults to CDSAVER_CATALOG.
    #[arg(long)]
    catalog: Option<CatalogKind>,

    /// Albums to request per title
    #[arg(long)]
    limit: Option<usize>,

    /// Same-disc vertical distance in pixels (stack mode)
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<f64>,

    /// Only print the titles that would be searched
    #[arg(long)]
    dry_run: bool,

    /// Add every primary match to the library after searching
    #[arg(long)]
    commit: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    catalog: CatalogKind,
    groups: &'a [ResultGroup],
    #[serde(skip_serializing_if = "Option::is_none")]
    commit: Option<&'a CommitSummary>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cdsaver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(limit) = cli.limit {
        config.search_limit = Some(limit);
    }
    if let Some(threshold) = cli.threshold {
        config.disc_threshold = threshold;
    }
    let kind = cli.catalog.unwrap_or(config.default_catalog);

    let blocks = read_blocks(&cli.blocks).await?;
    info!("Loaded {} text blocks from {}", blocks.len(), cli.blocks.display());

    let scanner = config.scanner(cli.mode);
    if cli.dry_run {
        match scanner.titles(&blocks) {
            Ok(titles) => titles.iter().for_each(|t| println!("{t}")),
            Err(Error::NoDetections) => eprintln!("No album titles found in the photo."),
            Err(e) => return Err(e.into()),
        }
        return Ok(());
    }

    let services = config.services()?;
    let provider = services.require_catalog(Some(kind.id()))?;
    let credential = config.credential(kind)?;

    let mut results = match scanner.scan(&blocks, provider.as_ref(), &credential).await {
        Ok(results) => results,
        Err(Error::NoDetections) => {
            eprintln!("No album titles found in the photo.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if results.is_empty() {
        warn!("{} returned no matches", provider.name());
    }

    let groups = results.groups().to_vec();
    if !cli.json {
        print_results(kind, &results);
    }

    let summary = if cli.commit && !results.is_empty() {
        Some(results.commit_to_library(provider.as_ref(), &credential).await)
    } else {
        None
    };

    if cli.json {
        let report = Report {
            catalog: kind,
            groups: &groups,
            commit: summary.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(summary) = &summary {
        print_summary(kind, summary);
    }
    Ok(())
}

fn parse_threshold(value: &str) -> std::result::Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|px| px.is_finite() && *px > 0.0)
        .ok_or_else(|| format!("expected a positive number of pixels, got {value:?}"))
}

async fn read_blocks(path: &Path) -> Result<Vec<RawTextBlock>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing OCR blocks in {}", path.display()))
}

fn print_results(kind: CatalogKind, results: &ResultSet) {
    println!("{} albums found on {}:", results.len(), kind);
    for (index, group) in results.groups().iter().enumerate() {
        println!("{:>3}. {}  [searched: {}]", index, group.primary().display_name(), group.query());
        for alternative in group.alternatives() {
            println!("       alt: {} ({})", alternative.display_name(), alternative.id);
        }
    }
}

fn print_summary(kind: CatalogKind, summary: &CommitSummary) {
    println!();
    println!("All done. {} albums added to your {} library.", summary.added, kind);
    if !summary.failed.is_empty() {
        println!("{} failed to add:", summary.failed.len());
        for label in &summary.failed {
            println!("  {label}");
        }
    }
}
