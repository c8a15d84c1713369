use std::collections::HashSet;

use tracing::debug;

use crate::diff::result::PathDiff;
use crate::flatten::flatten_document;
use crate::path::PathOptions;
use crate::XmlDocument;

/// Compare two path sequences by exact string equality.
pub fn diff_paths<L, R>(left: &[L], right: &[R]) -> PathDiff
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    PathDiff {
        only_left: exclusive_paths(left, right),
        only_right: exclusive_paths(right, left),
    }
}

/// Flatten both documents under `options` and compare their paths.
pub fn diff_documents(left: &XmlDocument, right: &XmlDocument, options: &PathOptions) -> PathDiff {
    let left_paths = flatten_document(left, options);
    let right_paths = flatten_document(right, options);
    let result = diff_paths(&left_paths, &right_paths);
    debug!(
        only_left = result.only_left.len(),
        only_right = result.only_right.len(),
        "compared documents"
    );
    result
}

/// Paths of `from` absent from `other`, first occurrence only, in `from` order.
pub fn exclusive_paths<A, B>(from: &[A], other: &[B]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let other: HashSet<&str> = other.iter().map(AsRef::as_ref).collect();
    let mut seen = HashSet::new();

    from.iter()
        .map(AsRef::as_ref)
        .filter(|path| !other.contains(path) && seen.insert(*path))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{diff_paths, exclusive_paths};

    #[test]
    fn keeps_first_occurrence_order_and_drops_duplicates() {
        let left = ["a", "a/c", "a/b", "a/c", "a/b"];
        let right = ["a"];

        assert_eq!(exclusive_paths(&left, &right), vec!["a/c", "a/b"]);
    }

    #[test]
    fn identical_sequences_have_no_difference() {
        let paths = ["a", "a/b", "a/b"];
        assert!(diff_paths(&paths, &paths).is_empty());
    }

    #[test]
    fn multiplicity_does_not_count_as_difference() {
        let left = ["a", "a/b", "a/b"];
        let right = ["a", "a/b"];
        assert!(diff_paths(&left, &right).is_empty());
    }

    #[test]
    fn swapping_inputs_swaps_sides() {
        let left = ["a", "a/b"];
        let right = ["a", "a/c", "a/d"];

        let forward = diff_paths(&left, &right);
        let backward = diff_paths(&right, &left);
        assert_eq!(forward.only_right, vec!["a/c", "a/d"]);
        assert_eq!(forward, backward.swapped());
    }
}
