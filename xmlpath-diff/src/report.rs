use colored::Colorize;
use xmlpath_core::{report_lines, PathDiff, ReportLine};

/// Render a diff for terminal output: headers in yellow, paths in red.
pub fn render_text(diff: &PathDiff, left_label: &str, right_label: &str) -> String {
    report_lines(diff, left_label, right_label)
        .iter()
        .map(|line| match line {
            ReportLine::Header(header) => header.yellow().to_string(),
            ReportLine::Path(path) => path.red().to_string(),
            ReportLine::Blank => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use colored::Colorize;
    use pretty_assertions::assert_eq;
    use xmlpath_core::PathDiff;

    use super::render_text;

    // Both color states live in one test: the override is process-wide.
    #[test]
    fn lines_are_colored_by_kind() {
        let diff = PathDiff {
            only_left: vec!["Data only in r.xml:".to_string(), "a/b/x\ny".to_string()],
            only_right: vec!["a/c".to_string()],
        };

        colored::control::set_override(true);
        let expected = [
            "Data only in l.xml:".yellow().to_string(),
            "Data only in r.xml:".red().to_string(),
            "a/b/x\ny".red().to_string(),
            String::new(),
            String::new(),
            "Data only in r.xml:".yellow().to_string(),
            "a/c".red().to_string(),
        ]
        .join("\n");
        assert_eq!(render_text(&diff, "l.xml", "r.xml"), expected);

        colored::control::set_override(false);
        assert_eq!(
            render_text(&diff, "l.xml", "r.xml"),
            "Data only in l.xml:\nData only in r.xml:\na/b/x\ny\n\n\nData only in r.xml:\na/c"
        );
    }
}
