use serde::Serialize;

/// Paths exclusive to each side of a comparison.
///
/// Both lists are duplicate-free and keep the first-occurrence order of the
/// side they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathDiff {
    /// Paths present in the left input but not in the right.
    pub only_left: Vec<String>,
    /// Paths present in the right input but not in the left.
    pub only_right: Vec<String>,
}

impl PathDiff {
    /// True when neither side has exclusive paths.
    pub fn is_empty(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty()
    }

    /// The same comparison seen from the other side.
    pub fn swapped(self) -> Self {
        Self {
            only_left: self.only_right,
            only_right: self.only_left,
        }
    }
}
