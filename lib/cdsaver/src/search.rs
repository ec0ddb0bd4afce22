use futures::stream::{FuturesUnordered, StreamExt};
use shared::catalog::{Album, ResultGroup};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::traits::{CatalogProvider, Credential};

/// Searches the catalog for every title at once and merges the answers.
///
/// Every request is started immediately. Responses are folded in as they
/// complete, so groups come back in completion order rather than title order.
/// An album already attributed to an earlier response is dropped from later
/// ones, and responses left empty produce no group. A failed request is logged
/// and counts as an empty answer. Returns after every request has settled.
pub async fn search_all(
    provider: &dyn CatalogProvider,
    titles: &[String],
    credential: &Credential,
    limit: Option<usize>,
) -> Vec<ResultGroup> {
    info!(
        "Searching {} for {} titles",
        provider.name(),
        titles.len()
    );

    let mut pending: FuturesUnordered<_> = titles
        .iter()
        .map(|title| async move {
            let result = provider.search_albums(title, credential, limit).await;
            (title, result)
        })
        .collect();

    let mut seen_ids = HashSet::new();
    let mut groups = Vec::new();
    let mut failures = 0usize;

    while let Some((title, result)) = pending.next().await {
        let albums = match result {
            Ok(albums) => albums,
            Err(e) => {
                warn!(
                    status = ?e.status(),
                    "{} search for '{}' failed: {}",
                    provider.name(),
                    title,
                    e
                );
                failures += 1;
                continue;
            }
        };

        let fresh = retain_unseen(albums, &mut seen_ids);
        debug!("'{}' returned {} new albums", title, fresh.len());
        if let Some(group) = ResultGroup::new(title.as_str(), fresh) {
            groups.push(group);
        }
    }

    info!(
        "Search complete: {} groups from {} titles ({} failed)",
        groups.len(),
        titles.len(),
        failures
    );
    groups
}

fn retain_unseen(albums: Vec<Album>, seen_ids: &mut HashSet<String>) -> Vec<Album> {
    albums
        .into_iter()
        .filter(|album| seen_ids.insert(album.id.clone()))
        .collect()
}
