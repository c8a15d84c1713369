use crate::diff::result::PathDiff;

/// Format a diff as a pretty-printed JSON object.
pub fn format_json(diff: &PathDiff) -> String {
    serde_json::to_string_pretty(diff).unwrap_or_else(|_| "{}".to_string())
}
