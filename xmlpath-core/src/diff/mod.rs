//! Set difference over flattened element paths.

pub mod engine;
pub mod result;

pub use engine::{diff_documents, diff_paths, exclusive_paths};
pub use result::PathDiff;
