//! Commit message derivation.
//!
//! The pipeline reads a change summary, classifies it, and composes a
//! conventional commit message. Only the cheap summary is read; no diff
//! text is fetched.

pub mod classifier;
pub mod composer;

pub use classifier::classify;
pub use composer::compose;

use crate::error::RepositoryAccessError;
use crate::models::{ChangeSummary, CommitMessageOutcome, CommitType};
use crate::vcs;
use std::path::Path;
use tracing::info;

/// Derive a commit message for the pending changes at `root`.
pub fn generate_commit_message(
    root: &Path,
    explicit: Option<CommitType>,
) -> Result<CommitMessageOutcome, RepositoryAccessError> {
    let summary = vcs::summarize(root)?;
    Ok(message_for_summary(&summary, explicit))
}

/// Run classification and composition over an existing summary.
///
/// The empty check runs before the explicit type is considered.
pub fn message_for_summary(
    summary: &ChangeSummary,
    explicit: Option<CommitType>,
) -> CommitMessageOutcome {
    if summary.is_empty() {
        info!("No changes to describe");
        return CommitMessageOutcome::NoChanges;
    }

    match classify(summary, explicit) {
        Some(commit_type) => {
            info!("Composing {} message for {} files", commit_type, summary.files.len());
            CommitMessageOutcome::Composed(compose(summary, commit_type))
        }
        None => CommitMessageOutcome::NoChanges,
    }
}
