//! Review document output.

pub mod writer;

pub use writer::{write_review, ReviewOptions, DEFAULT_TITLE};
