use futures::stream::{FuturesUnordered, StreamExt};
use shared::{
    catalog::ResultGroup,
    library::{CommitOutcome, CommitSummary},
};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::traits::{CatalogProvider, Credential};

/// The search results of one review session.
///
/// Owns the pending groups, the user's selection, and the outcome of library
/// commits. All mutation goes through `&mut self`, so completions arriving from
/// concurrent library requests are applied one at a time.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    groups: Vec<ResultGroup>,
    selected: BTreeSet<usize>,
    failed: Vec<String>,
    added_count: usize,
}

impl ResultSet {
    pub fn new(groups: Vec<ResultGroup>) -> Self {
        Self {
            groups,
            ..Default::default()
        }
    }

    pub fn groups(&self) -> &[ResultGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn added_count(&self) -> usize {
        self.added_count
    }

    pub fn summary(&self) -> CommitSummary {
        CommitSummary {
            added: self.added_count,
            failed: self.failed.clone(),
        }
    }

    /// Makes `album_id` the primary match of the group at `group_index`.
    pub fn promote(&mut self, group_index: usize, album_id: &str) -> bool {
        self.groups
            .get_mut(group_index)
            .is_some_and(|group| group.promote(album_id))
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn select(&mut self, index: usize) -> bool {
        index < self.groups.len() && self.selected.insert(index)
    }

    pub fn deselect(&mut self, index: usize) -> bool {
        self.selected.remove(&index)
    }

    /// Flips the selection of one group and returns whether it is now selected.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.selected.remove(&index) {
            false
        } else {
            self.select(index)
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Deletes the groups at `indices`, all interpreted against the current order.
    ///
    /// Out of range indices are ignored. Any selection is cleared since its
    /// indices would no longer line up.
    pub fn remove<I>(&mut self, indices: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        let mut removed = 0;
        for index in indices.into_iter().rev() {
            if index < self.groups.len() {
                self.groups.remove(index);
                removed += 1;
            }
        }
        self.selected.clear();
        removed
    }

    pub fn remove_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.selected);
        self.remove(selected)
    }

    /// Adds every group's primary album to the user's library.
    ///
    /// All requests are issued at once. Each group leaves the pending set once
    /// its request settles, whatever the outcome: successes are counted,
    /// failures are recorded by display name. Returns after every group has
    /// been attempted exactly once.
    pub async fn commit_to_library(
        &mut self,
        provider: &dyn CatalogProvider,
        credential: &Credential,
    ) -> CommitSummary {
        let pending_groups = std::mem::take(&mut self.groups);
        self.selected.clear();
        info!(
            "Adding {} albums to {} library",
            pending_groups.len(),
            provider.name()
        );

        let mut pending: FuturesUnordered<_> = pending_groups
            .into_iter()
            .map(|group| async move {
                let album = group.primary().clone();
                match provider.add_to_library(&album, credential).await {
                    Ok(()) => CommitOutcome::Added { album },
                    Err(e) => {
                        warn!(status = ?e.status(), "Failed to add '{}': {}", album.title, e);
                        CommitOutcome::Failed {
                            label: album.display_name(),
                        }
                    }
                }
            })
            .collect();

        while let Some(outcome) = pending.next().await {
            self.record(outcome);
        }

        info!(
            "Library commit finished: {} added, {} failed",
            self.added_count,
            self.failed.len()
        );
        self.summary()
    }

    fn record(&mut self, outcome: CommitOutcome) {
        match outcome {
            CommitOutcome::Added { album } => {
                info!("'{}' added to library", album.title);
                self.added_count += 1;
            }
            CommitOutcome::Failed { label } => self.failed.push(label),
        }
    }
}
