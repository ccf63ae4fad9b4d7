//! Comment and ignore-region removal.
//!
//! Dependency scanning is purely textual, so anything inside a comment would
//! otherwise look like a real reference. Ignore regions are the escape hatch
//! for false positives that are not comments (macro bodies, disabled code):
//!
//! ```text
//! // pkgsort:ignore_begin
//! `define FOO other_pkg::BAR
//! // pkgsort:ignore_end
//! ```

use regex::Regex;

use crate::config::ScanConfig;
use crate::error::Result;

/// Strips comments and ignore regions from HDL source text.
#[derive(Debug, Clone)]
pub struct Stripper {
    ignore: Regex,
    comments: Regex,
}

impl Stripper {
    /// Build a stripper for the ignore markers in `config`.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        config.validate()?;

        // An unterminated begin marker swallows the rest of the file.
        let ignore = Regex::new(&format!(
            r"(?s)//[^\r\n]*?{}.*?(?://[^\r\n]*?{}[^\r\n]*|\z)",
            regex::escape(&config.ignore_begin),
            regex::escape(&config.ignore_end),
        ))?;

        // One alternation so that whichever comment opens first wins:
        // `// see /*` is a line comment, `/* // */` is a block comment.
        let comments = Regex::new(r"(?s)//[^\r\n]*|/\*.*?\*/")?;

        Ok(Self { ignore, comments })
    }

    /// Remove ignore regions, then line and block comments.
    ///
    /// Line breaks that terminate line comments are kept. A bare `\r` ends a
    /// line just as `\n` and `\r\n` do.
    pub fn strip(&self, text: &str) -> String {
        let text = self.ignore.replace_all(text, "");
        self.comments.replace_all(&text, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripper() -> Stripper {
        Stripper::new(&ScanConfig::default()).unwrap()
    }

    #[test]
    fn removes_line_comments() {
        let out = stripper().strip("import a_pkg::*; // uses b_pkg::X\nlogic x;\n");
        assert!(out.contains("a_pkg::"));
        assert!(!out.contains("b_pkg"));
        assert!(out.contains("logic x;"));
    }

    #[test]
    fn removes_line_comment_without_trailing_newline() {
        let out = stripper().strip("logic x; // c_pkg::Y");
        assert_eq!(out.trim_end(), "logic x;");
    }

    #[test]
    fn carriage_return_ends_line_comment() {
        let out = stripper().strip("// header\rimport b_pkg::*;\r// c_pkg::X\rlogic y;\r");
        assert!(out.contains("import b_pkg::*;"));
        assert!(!out.contains("c_pkg"));
        assert!(out.contains("logic y;"));
    }

    #[test]
    fn carriage_return_ends_ignore_marker_line() {
        let text = "// pkgsort:ignore_begin\rhidden_pkg::T\r// pkgsort:ignore_end\rkept_pkg::U\r";
        let out = stripper().strip(text);
        assert!(!out.contains("hidden_pkg"));
        assert!(out.contains("kept_pkg::U"));
    }

    #[test]
    fn removes_multiline_block_comments() {
        let text = "/* header\n   mentions a_pkg::T\n*/\nimport b_pkg::*;\n";
        let out = stripper().strip(text);
        assert!(!out.contains("a_pkg"));
        assert!(out.contains("b_pkg::"));
    }

    #[test]
    fn block_comments_are_not_greedy() {
        let out = stripper().strip("/* a */ keep_pkg::X /* b */");
        assert!(out.contains("keep_pkg::X"));
    }

    #[test]
    fn line_comment_hides_block_opener() {
        let out = stripper().strip("// see /* here\nlive_pkg::X\n// */\n");
        assert!(out.contains("live_pkg::X"));
    }

    #[test]
    fn removes_ignore_region() {
        let text = "\
import a_pkg::*;
// pkgsort:ignore_begin
`define REF hidden_pkg::T
// pkgsort:ignore_end
import b_pkg::*;
";
        let out = stripper().strip(text);
        assert!(out.contains("a_pkg::"));
        assert!(out.contains("b_pkg::"));
        assert!(!out.contains("hidden_pkg"));
    }

    #[test]
    fn unterminated_ignore_region_runs_to_end() {
        let text = "import a_pkg::*;\n//  pkgsort:ignore_begin\nimport b_pkg::*;\n";
        let out = stripper().strip(text);
        assert!(out.contains("a_pkg::"));
        assert!(!out.contains("b_pkg"));
    }

    #[test]
    fn custom_markers() {
        let config = ScanConfig {
            ignore_begin: "SCAN-OFF".to_string(),
            ignore_end: "SCAN-ON".to_string(),
            ..ScanConfig::default()
        };
        let stripper = Stripper::new(&config).unwrap();
        let out = stripper.strip("// SCAN-OFF\nx_pkg::A\n// SCAN-ON\ny_pkg::B\n");
        assert!(!out.contains("x_pkg"));
        assert!(out.contains("y_pkg::B"));
    }
}
