use serde::{Deserialize, Serialize};

use crate::catalog::Album;

/// Result of adding one group's primary album to the user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommitOutcome {
    Added { album: Album },
    Failed { label: String },
}

/// Aggregate of a library commit, surfaced once the whole batch has settled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub added: usize,
    pub failed: Vec<String>,
}

impl CommitSummary {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}
