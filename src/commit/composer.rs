//! Commit message composition.

use crate::models::{ChangeSummary, CommitStats, CommitType, ComposedCommitMessage};

/// Canonical description for each commit type.
pub fn description(commit_type: CommitType) -> &'static str {
    match commit_type {
        CommitType::Feat => "add new functionality",
        CommitType::Fix => "resolve issues",
        CommitType::Docs => "update documentation",
        CommitType::Refactor => "improve code structure",
        CommitType::Test => "add/update tests",
        CommitType::Chore => "update dependencies/config",
        CommitType::Style | CommitType::Perf => "make changes",
    }
}

/// Scope for a single-file change: the first `/`-separated segment of its path.
///
/// Multi-file changes and top-level paths have no scope.
pub fn derive_scope(summary: &ChangeSummary) -> Option<&str> {
    let [only] = summary.files.as_slice() else {
        return None;
    };

    let first = only.path.split('/').next()?;
    (first != only.path).then_some(first)
}

/// Build the message and statistics for an already-classified summary.
pub fn compose(summary: &ChangeSummary, commit_type: CommitType) -> ComposedCommitMessage {
    let scope = derive_scope(summary)
        .map(|s| format!("({})", s))
        .unwrap_or_default();

    let headline = format!(
        "{}{}: {}\n\n{} file(s) changed, {} insertion(s), {} deletion(s)",
        commit_type,
        scope,
        description(commit_type),
        summary.files.len(),
        summary.total_insertions,
        summary.total_deletions,
    );

    ComposedCommitMessage {
        headline,
        stats: CommitStats {
            files_changed: summary.files.len(),
            insertions: summary.total_insertions,
            deletions: summary.total_deletions,
            commit_type,
        },
        affected_files: summary.paths().map(String::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileChangeStat;

    fn summary(files: &[(&str, usize, usize)]) -> ChangeSummary {
        ChangeSummary::from_files(
            files
                .iter()
                .map(|(path, insertions, deletions)| FileChangeStat {
                    path: path.to_string(),
                    insertions: *insertions,
                    deletions: *deletions,
                })
                .collect(),
        )
    }

    #[test]
    fn test_manifest_headline() {
        let message = compose(&summary(&[("package.json", 3, 1)]), CommitType::Chore);
        assert_eq!(
            message.headline,
            "chore: update dependencies/config\n\n1 file(s) changed, 3 insertion(s), 1 deletion(s)"
        );
        assert_eq!(message.stats.files_changed, 1);
        assert_eq!(message.stats.insertions, 3);
        assert_eq!(message.stats.deletions, 1);
        assert_eq!(message.stats.commit_type, CommitType::Chore);
        assert_eq!(message.affected_files, vec!["package.json"]);
    }

    #[test]
    fn test_single_nested_file_has_scope() {
        let message = compose(&summary(&[("src/tools.ts", 4, 0)]), CommitType::Feat);
        assert!(message
            .headline
            .starts_with("feat(src): add new functionality\n\n"));
    }

    #[test]
    fn test_top_level_file_has_no_scope() {
        let s = summary(&[("README.md", 2, 0)]);
        assert_eq!(derive_scope(&s), None);
        assert!(compose(&s, CommitType::Docs)
            .headline
            .starts_with("docs: update documentation"));
    }

    #[test]
    fn test_multi_file_has_no_scope() {
        let s = summary(&[("a/x.ts", 6, 1), ("b/y.ts", 4, 1)]);
        assert_eq!(derive_scope(&s), None);

        let message = compose(&s, CommitType::Feat);
        assert_eq!(
            message.headline,
            "feat: add new functionality\n\n2 file(s) changed, 10 insertion(s), 2 deletion(s)"
        );
        assert_eq!(message.affected_files, vec!["a/x.ts", "b/y.ts"]);
    }

    #[test]
    fn test_scope_uses_first_segment_only() {
        let s = summary(&[("crates/core/src/lib.rs", 1, 1)]);
        assert_eq!(derive_scope(&s), Some("crates"));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(description(CommitType::Fix), "resolve issues");
        assert_eq!(description(CommitType::Refactor), "improve code structure");
        assert_eq!(description(CommitType::Test), "add/update tests");
        assert_eq!(description(CommitType::Style), "make changes");
        assert_eq!(description(CommitType::Perf), "make changes");
    }

    #[test]
    fn test_compose_is_idempotent() {
        let s = summary(&[("src/a.rs", 1, 2)]);
        assert_eq!(compose(&s, CommitType::Fix), compose(&s, CommitType::Fix));
    }
}
