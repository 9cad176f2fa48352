//! Data models for change analysis and review output.
//!
//! This module contains the value types passed between the repository
//! reader, the commit classifier and composer, and the review writer.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Text returned in place of a commit message when nothing changed.
pub const NO_CHANGES_MESSAGE: &str = "No changes detected in the repository";

/// Insertion/deletion counts for a single changed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChangeStat {
    /// Path relative to the repository root, `/`-separated.
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

/// Aggregate statistics for all pending changes in a working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Changed paths in the order the repository lists them.
    pub files: Vec<FileChangeStat>,
    pub total_insertions: usize,
    pub total_deletions: usize,
}

impl ChangeSummary {
    /// Build a summary whose totals are the sums over `files`.
    pub fn from_files(files: Vec<FileChangeStat>) -> Self {
        let total_insertions = files.iter().map(|f| f.insertions).sum();
        let total_deletions = files.iter().map(|f| f.deletions).sum();
        Self {
            files,
            total_insertions,
            total_deletions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over the changed paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }
}

/// Unified diff text for one path. Empty text is valid (binary files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    #[serde(rename = "file")]
    pub path: String,
    #[serde(rename = "diff")]
    pub diff_text: String,
}

/// Conventional-commit category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
}

impl CommitType {
    pub const ALL: [CommitType; 8] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Chore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommitType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown commit type: {}", s))
    }
}

/// Counts reported alongside a composed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitStats {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
    #[serde(rename = "type")]
    pub commit_type: CommitType,
}

/// A finished conventional commit message with its statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedCommitMessage {
    /// Headline, blank line, and the counts line.
    #[serde(rename = "message")]
    pub headline: String,
    pub stats: CommitStats,
    /// Every changed path, in summary order.
    #[serde(rename = "files")]
    pub affected_files: Vec<String>,
}

/// Result of the commit-message pipeline.
///
/// `NoChanges` is a success variant, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitMessageOutcome {
    NoChanges,
    Composed(ComposedCommitMessage),
}

impl Serialize for CommitMessageOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CommitMessageOutcome::NoChanges => serializer.serialize_str(NO_CHANGES_MESSAGE),
            CommitMessageOutcome::Composed(message) => message.serialize(serializer),
        }
    }
}

/// Structured outcome of writing a review document. Never an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWriteResult {
    pub success: bool,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReviewWriteResult {
    pub fn written(file_path: String, size: usize) -> Self {
        Self {
            message: Some(format!("Review saved to {}", file_path)),
            success: true,
            file_path,
            size: Some(size),
            error: None,
        }
    }

    pub fn failed(file_path: String, error: String) -> Self {
        Self {
            success: false,
            file_path,
            message: None,
            size: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stat(path: &str, insertions: usize, deletions: usize) -> FileChangeStat {
        FileChangeStat {
            path: path.to_string(),
            insertions,
            deletions,
        }
    }

    #[test]
    fn test_summary_totals() {
        let summary = ChangeSummary::from_files(vec![stat("a.rs", 3, 1), stat("b.rs", 4, 0)]);
        assert_eq!(summary.total_insertions, 7);
        assert_eq!(summary.total_deletions, 1);
        assert!(!summary.is_empty());
        assert_eq!(summary.paths().collect::<Vec<_>>(), vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_commit_type_from_str() {
        assert_eq!("feat".parse::<CommitType>(), Ok(CommitType::Feat));
        assert_eq!("chore".parse::<CommitType>(), Ok(CommitType::Chore));
        assert!("Feature".parse::<CommitType>().is_err());
        for t in CommitType::ALL {
            assert_eq!(t.to_string().parse::<CommitType>(), Ok(t));
        }
    }

    #[test]
    fn test_no_changes_serializes_as_string() {
        let value = serde_json::to_value(CommitMessageOutcome::NoChanges).unwrap();
        assert_eq!(value, json!("No changes detected in the repository"));
    }

    #[test]
    fn test_composed_message_wire_format() {
        let outcome = CommitMessageOutcome::Composed(ComposedCommitMessage {
            headline: "feat: add new functionality".to_string(),
            stats: CommitStats {
                files_changed: 1,
                insertions: 2,
                deletions: 0,
                commit_type: CommitType::Feat,
            },
            affected_files: vec!["src/lib.rs".to_string()],
        });

        let value = serde_json::to_value(outcome).unwrap();
        assert_eq!(value["message"], "feat: add new functionality");
        assert_eq!(value["stats"]["filesChanged"], 1);
        assert_eq!(value["stats"]["type"], "feat");
        assert_eq!(value["files"], json!(["src/lib.rs"]));
    }

    #[test]
    fn test_review_result_shapes() {
        let ok = serde_json::to_value(ReviewWriteResult::written("r.md".to_string(), 42)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["filePath"], "r.md");
        assert_eq!(ok["size"], 42);
        assert!(ok.get("error").is_none());

        let failed =
            serde_json::to_value(ReviewWriteResult::failed("r.md".to_string(), "boom".into()))
                .unwrap();
        assert_eq!(failed["success"], false);
        assert_eq!(failed["error"], "boom");
        assert!(failed.get("size").is_none());
    }

    #[test]
    fn test_file_diff_wire_format() {
        let diff = FileDiff {
            path: "src/main.rs".to_string(),
            diff_text: String::new(),
        };
        assert_eq!(
            serde_json::to_value(diff).unwrap(),
            json!({"file": "src/main.rs", "diff": ""})
        );
    }
}
