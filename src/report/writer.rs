//! Markdown review document writer.
//!
//! This module renders review text into a titled Markdown document and
//! saves it to disk. Failures are reported as a structured result.

use crate::error::PersistenceError;
use crate::models::ReviewWriteResult;
use chrono::{SecondsFormat, Utc};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "Code Review";

/// Options for a single review write.
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    pub title: String,
    pub include_timestamp: bool,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            include_timestamp: true,
        }
    }
}

/// Render and save a review document. Never returns an error.
pub fn write_review(file_path: &Path, content: &str, options: &ReviewOptions) -> ReviewWriteResult {
    let path_str = file_path.display().to_string();
    let document = render_document(content, options);

    match persist(file_path, &document) {
        Ok(()) => {
            info!("Saved review to {} ({} bytes)", path_str, document.len());
            ReviewWriteResult::written(path_str, document.len())
        }
        Err(e) => {
            warn!("Failed to save review: {}", e);
            ReviewWriteResult::failed(path_str, e.to_string())
        }
    }
}

/// Build the full document text.
pub fn render_document(content: &str, options: &ReviewOptions) -> String {
    let mut document = String::new();

    document.push_str(&format!("# {}\n\n", options.title));

    if options.include_timestamp {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        document.push_str(&format!("**Generated:** {}\n\n", now));
    }

    document.push_str("---\n\n");
    document.push_str(content);

    if !has_headings(content) {
        document.push_str(&generate_summary_section(content));
    }

    if !document.ends_with('\n') {
        document.push('\n');
    }

    document
}

/// True when any line starts with a Markdown heading marker.
fn has_headings(content: &str) -> bool {
    content.lines().any(|line| line.trim_start().starts_with('#'))
}

fn generate_summary_section(content: &str) -> String {
    let lines = content.lines().filter(|l| !l.trim().is_empty()).count();

    let mut section = String::new();
    section.push_str("\n\n## Summary\n\n");
    section.push_str(&format!(
        "This review contains {} line(s) of feedback.\n",
        lines
    ));
    section
}

fn persist(file_path: &Path, document: &str) -> Result<(), PersistenceError> {
    let path_str = file_path.display().to_string();

    let parent = match file_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
        path: parent.display().to_string(),
        source,
    })?;

    let mut file = NamedTempFile::new_in(parent).map_err(|source| PersistenceError::Write {
        path: path_str.clone(),
        source,
    })?;

    file.write_all(document.as_bytes())
        .map_err(|source| PersistenceError::Write {
            path: path_str.clone(),
            source,
        })?;

    file.persist(file_path)
        .map_err(|e| PersistenceError::Persist {
            path: path_str,
            source: e.error,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(include_timestamp: bool) -> ReviewOptions {
        ReviewOptions {
            title: "Review of src/".to_string(),
            include_timestamp,
        }
    }

    #[test]
    fn test_document_without_timestamp() {
        let doc = render_document("Looks good.", &options(false));
        assert!(doc.starts_with("# Review of src/\n\n---\n\nLooks good."));
        assert!(!doc.contains("**Generated:**"));
    }

    #[test]
    fn test_document_with_timestamp() {
        let doc = render_document("Looks good.", &options(true));
        let line = doc
            .lines()
            .find(|l| l.starts_with("**Generated:**"))
            .unwrap();
        assert!(line.ends_with('Z'));
        assert!(line.contains('T'));
    }

    #[test]
    fn test_summary_appended_without_headings() {
        let doc = render_document("Fix the loop.\nRename x.\n", &options(false));
        assert_eq!(doc.matches("## Summary").count(), 1);
        assert!(doc.contains("2 line(s)"));
    }

    #[test]
    fn test_no_summary_with_headings() {
        let doc = render_document("## Notes\n\nFine.", &options(false));
        assert!(!doc.contains("## Summary"));
        assert!(doc.contains("## Notes\n\nFine."));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reviews/2026/pr-12.md");

        let result = write_review(&path, "All good.", &ReviewOptions::default());

        assert!(result.success);
        assert!(result.error.is_none());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Code Review\n\n**Generated:**"));
        assert_eq!(result.size, Some(written.len()));
    }

    #[test]
    fn test_write_reports_saved_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("review.md");

        let result = write_review(&path, "Ok.", &options(false));

        let expected = path.display().to_string();
        assert_eq!(result.file_path, expected);
        assert_eq!(result.message, Some(format!("Review saved to {}", expected)));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("review.md");
        std::fs::write(&path, "old").unwrap();

        let result = write_review(&path, "new", &options(false));

        assert!(result.success);
        assert!(std::fs::read_to_string(&path).unwrap().contains("new"));
    }

    #[test]
    fn test_write_failure_is_structured() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();

        let path = blocker.join("review.md");
        let result = write_review(&path, "text", &options(false));

        assert!(!result.success);
        assert!(result.error.is_some());
        assert_eq!(result.file_path, path.display().to_string());
        assert!(result.size.is_none());
    }
}
