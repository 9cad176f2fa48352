//! Conventional-commit classification.
//!
//! Classification is an ordered rule table over a change summary. The
//! first rule whose predicate matches decides the category.

use crate::models::{ChangeSummary, CommitType};
use tracing::debug;

/// Path substrings that mark a project manifest.
pub const MANIFEST_MARKERS: &[&str] = &["package.json", "Cargo.toml", "pyproject.toml", "go.mod"];

/// A classification rule: predicate and the category it yields.
pub type Rule = (fn(&ChangeSummary) -> bool, CommitType);

/// Rules in priority order. `Fix` applies when none match.
pub const RULES: &[Rule] = &[
    (touches_tests, CommitType::Test),
    (touches_docs, CommitType::Docs),
    (touches_manifest, CommitType::Chore),
    (adds_more_than_removes, CommitType::Feat),
];

const FALLBACK: CommitType = CommitType::Fix;

fn touches_tests(summary: &ChangeSummary) -> bool {
    summary
        .paths()
        .any(|p| p.contains("test") || p.contains("spec"))
}

fn touches_docs(summary: &ChangeSummary) -> bool {
    summary
        .paths()
        .any(|p| p.contains("README") || p.ends_with(".md"))
}

fn touches_manifest(summary: &ChangeSummary) -> bool {
    summary
        .paths()
        .any(|p| MANIFEST_MARKERS.iter().any(|marker| p.contains(marker)))
}

fn adds_more_than_removes(summary: &ChangeSummary) -> bool {
    summary.total_insertions > summary.total_deletions
}

/// Classify a summary.
///
/// An explicit type is returned as-is. Otherwise returns `None` for an empty
/// summary, or the category of the first matching rule.
pub fn classify(summary: &ChangeSummary, explicit: Option<CommitType>) -> Option<CommitType> {
    if let Some(commit_type) = explicit {
        return Some(commit_type);
    }

    if summary.is_empty() {
        return None;
    }

    let commit_type = RULES
        .iter()
        .find(|(matches, _)| matches(summary))
        .map(|(_, commit_type)| *commit_type)
        .unwrap_or(FALLBACK);

    debug!("Classified {} files as {}", summary.files.len(), commit_type);
    Some(commit_type)
}
