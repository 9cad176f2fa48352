//! Version-control access.
//!
//! This module reads change summaries and unified diffs from a git working copy.

pub mod reader;

pub use reader::{list_changes, summarize, GitReader};
