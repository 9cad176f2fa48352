//! Git working-copy reader.
//!
//! This module reads pending changes (working tree and index against `HEAD`)
//! from a local repository using the git2 library.

use crate::error::RepositoryAccessError;
use crate::models::{ChangeSummary, FileChangeStat, FileDiff};
use git2::{Diff, DiffFormat, DiffOptions, ErrorCode, Patch, Repository, Tree};
use std::path::Path;
use tracing::{debug, info};

/// Read-only view over a working copy's pending changes.
pub struct GitReader {
    repo: Repository,
}

impl GitReader {
    /// Open the working copy rooted at `root`.
    pub fn open(root: &Path) -> Result<Self, RepositoryAccessError> {
        if root.as_os_str().is_empty() {
            return Err(RepositoryAccessError::EmptyPath);
        }

        let repo = Repository::open(root).map_err(|source| RepositoryAccessError::Open {
            path: root.display().to_string(),
            source,
        })?;

        debug!("Opened repository: {}", root.display());
        Ok(Self { repo })
    }

    /// Per-file insertion/deletion counts for every pending change.
    pub fn summarize(&self) -> Result<ChangeSummary, RepositoryAccessError> {
        let diff = self.pending_diff(None)?;
        let mut files = Vec::new();

        for (idx, delta) in diff.deltas().enumerate() {
            let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) else {
                continue;
            };

            // Binary deltas have no patch
            let (insertions, deletions) =
                match Patch::from_diff(&diff, idx).map_err(RepositoryAccessError::Read)? {
                    Some(patch) => {
                        let (_, additions, removals) =
                            patch.line_stats().map_err(RepositoryAccessError::Read)?;
                        (additions, removals)
                    }
                    None => (0, 0),
                };

            files.push(FileChangeStat {
                path: path.to_string_lossy().to_string(),
                insertions,
                deletions,
            });
        }

        let summary = ChangeSummary::from_files(files);
        debug!(
            "Summary: {} files, +{} -{}",
            summary.files.len(),
            summary.total_insertions,
            summary.total_deletions
        );
        Ok(summary)
    }

    /// Unified diff text limited to `path`.
    ///
    /// Binary files render as their header and a `Binary files ... differ` line.
    pub fn diff_path(&self, path: &str) -> Result<String, RepositoryAccessError> {
        self.render(Some(path))
    }

    /// Unified diff text for the whole working tree.
    pub fn diff_all(&self) -> Result<String, RepositoryAccessError> {
        self.render(None)
    }

    fn render(&self, path: Option<&str>) -> Result<String, RepositoryAccessError> {
        let diff = self.pending_diff(path)?;
        let mut output = String::new();

        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let origin = line.origin();
            if matches!(origin, '+' | '-' | ' ') {
                output.push(origin);
            }
            output.push_str(&String::from_utf8_lossy(line.content()));
            true
        })
        .map_err(RepositoryAccessError::Read)?;

        Ok(output)
    }

    /// Tree of `HEAD`, or `None` on an unborn branch.
    fn head_tree(&self) -> Result<Option<Tree<'_>>, RepositoryAccessError> {
        match self.repo.head() {
            Ok(head) => head
                .peel_to_tree()
                .map(Some)
                .map_err(RepositoryAccessError::Read),
            Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(RepositoryAccessError::Read(e)),
        }
    }

    fn pending_diff(&self, path: Option<&str>) -> Result<Diff<'_>, RepositoryAccessError> {
        let tree = self.head_tree()?;

        let mut opts = DiffOptions::new();
        if let Some(path) = path {
            opts.pathspec(path);
            opts.disable_pathspec_match(true);
        }

        self.repo
            .diff_tree_to_workdir_with_index(tree.as_ref(), Some(&mut opts))
            .map_err(RepositoryAccessError::Read)
    }
}

/// Change summary for the working copy at `root`. No exclusions are applied.
pub fn summarize(root: &Path) -> Result<ChangeSummary, RepositoryAccessError> {
    GitReader::open(root)?.summarize()
}

/// Per-file diffs for every pending change whose path is not in `excludes`.
///
/// Exclusion is an exact path match, not a glob.
pub fn list_changes(root: &Path, excludes: &[String]) -> Result<Vec<FileDiff>, RepositoryAccessError> {
    let reader = GitReader::open(root)?;
    let summary = reader.summarize()?;

    let mut changes = Vec::new();
    for file in summary.files {
        if excludes.iter().any(|excluded| *excluded == file.path) {
            debug!("Skipping excluded path: {}", file.path);
            continue;
        }

        let diff_text = reader.diff_path(&file.path)?;
        changes.push(FileDiff {
            path: file.path,
            diff_text,
        });
    }

    info!("Listed {} changed files in {}", changes.len(), root.display());
    Ok(changes)
}
