use std::fmt;

use crate::diff::result::PathDiff;

/// Blank lines printed before the second side's header.
const SECTION_GAP: usize = 2;

/// One line of the plain-text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine<'a> {
    /// `Data only in <label>:`
    Header(String),
    /// A path exclusive to the side introduced by the preceding header.
    Path(&'a str),
    Blank,
}

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(header) => f.write_str(header),
            Self::Path(path) => f.write_str(path),
            Self::Blank => Ok(()),
        }
    }
}

/// Header line introducing the paths exclusive to `label`.
pub fn section_header(label: &str) -> String {
    format!("Data only in {label}:")
}

/// Lay out a diff as report lines, one path per line under a per-side header.
///
/// A side with no exclusive paths contributes nothing. The second side's
/// header is always preceded by two blank lines, even when the first side is
/// empty.
pub fn report_lines<'a>(
    diff: &'a PathDiff,
    left_label: &str,
    right_label: &str,
) -> Vec<ReportLine<'a>> {
    let mut lines = Vec::with_capacity(diff.only_left.len() + diff.only_right.len() + 4);

    if !diff.only_left.is_empty() {
        lines.push(ReportLine::Header(section_header(left_label)));
        lines.extend(diff.only_left.iter().map(|path| ReportLine::Path(path.as_str())));
    }

    if !diff.only_right.is_empty() {
        lines.extend(std::iter::repeat(ReportLine::Blank).take(SECTION_GAP));
        lines.push(ReportLine::Header(section_header(right_label)));
        lines.extend(diff.only_right.iter().map(|path| ReportLine::Path(path.as_str())));
    }

    lines
}

/// Format a diff as plain text. Identical inputs produce an empty string.
pub fn format_text(diff: &PathDiff, left_label: &str, right_label: &str) -> String {
    report_lines(diff, left_label, right_label)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a simple summary of exclusive path counts.
pub fn format_summary(diff: &PathDiff) -> String {
    format!(
        "only_left={} only_right={}",
        diff.only_left.len(),
        diff.only_right.len()
    )
}
