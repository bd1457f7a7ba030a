// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Checkstyle XML report parsing
//!
//! The report is a `<checkstyle>` root holding one `<file>` per checked
//! source file, each with zero or more `<error>` entries.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ReportsError;
use crate::project::Project;
use crate::result::StyleViolation;

/// Checkstyle severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suppressed; also used for names Checkstyle does not define
    Ignore,
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
}

impl Severity {
    /// Rank a severity string from a report; unrecognised values rank lowest
    #[must_use]
    pub fn of(value: &str) -> Self {
        value.parse().unwrap_or(Self::Ignore)
    }

    /// Lowercase name as written by Checkstyle
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl FromStr for Severity {
    type Err = ReportsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(ReportsError::UnknownSeverity {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StyleViolation {
    /// Severity ranked for threshold comparisons
    #[must_use]
    pub fn severity_level(&self) -> Severity {
        Severity::of(&self.severity)
    }
}

#[derive(Debug, Default, Deserialize)]
struct CheckstyleXml {
    #[serde(rename = "file", default)]
    files: Vec<FileXml>,
}

#[derive(Debug, Deserialize)]
struct FileXml {
    #[serde(rename = "@name")]
    name: String,
    // One `<error>` or many, both land here
    #[serde(rename = "error", default)]
    errors: Vec<ErrorXml>,
}

#[derive(Debug, Deserialize)]
struct ErrorXml {
    #[serde(rename = "@line", default)]
    line: Option<String>,
    #[serde(rename = "@severity", default)]
    severity: String,
    #[serde(rename = "@message", default)]
    message: String,
    #[serde(rename = "@source", default)]
    source: String,
}

fn parse_line(file_name: &str, raw: Option<String>) -> Option<u32> {
    let raw = raw?;
    match raw.trim().parse::<u32>() {
        Ok(line) => Some(line),
        Err(e) => {
            warn!(file = file_name, line = %raw, error = %e, "Unparseable line number in style report");
            None
        }
    }
}

/// Parse a Checkstyle XML document
///
/// Violations keep document order: files first, then errors within a file.
///
/// # Errors
///
/// Returns `ReportsError::Xml` if the document is not well-formed.
pub fn parse_report_str(xml: &str) -> Result<Vec<StyleViolation>, ReportsError> {
    let report: CheckstyleXml = quick_xml::de::from_str(xml.trim_start())?;
    let violations = report
        .files
        .into_iter()
        .flat_map(|file| {
            let FileXml { name, errors } = file;
            errors.into_iter().map(move |error| StyleViolation {
                line: parse_line(&name, error.line),
                file_name: name.clone(),
                severity: error.severity,
                message: error.message,
                source: error.source,
            })
        })
        .collect();
    Ok(violations)
}

/// Reads the Checkstyle report of a project
#[derive(Debug, Clone)]
pub struct CheckstyleReportParser {
    project: Project,
}

impl CheckstyleReportParser {
    /// Create a parser for the given project
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// Parse the project's Checkstyle report
    ///
    /// A missing report yields no violations. A report that cannot be read or
    /// parsed is logged and also yields no violations.
    ///
    /// # Errors
    ///
    /// Returns `ReportsError::UnsupportedProject` if the project is neither
    /// Maven nor Gradle.
    pub fn parse_report(&self) -> Result<Vec<StyleViolation>, ReportsError> {
        let path = self.project.style_report_path()?;
        Ok(Self::parse_path(&path))
    }

    fn parse_path(path: &Path) -> Vec<StyleViolation> {
        if !path.is_file() {
            debug!(file = %path.display(), "No style report");
            return Vec::new();
        }

        match fs::read_to_string(path)
            .map_err(ReportsError::from)
            .and_then(|content| parse_report_str(&content))
        {
            Ok(violations) => {
                debug!(file = %path.display(), count = violations.len(), "Parsed style report");
                violations
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Ignoring malformed style report");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const LINE_LENGTH_SOURCE: &str = "com.puppycrawl.tools.checkstyle.checks.sizes.LineLengthCheck";

    #[test]
    fn test_single_error_in_file() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<checkstyle version="10.12.5">
<file name="/project/src/main/java/com/example/app/App.java">
<error line="11" severity="error" message="Line is longer than 120 characters (found 134)." source="{LINE_LENGTH_SOURCE}"/>
</file>
</checkstyle>"#
        );

        let violations = parse_report_str(&xml).expect("Should parse");
        assert_eq!(violations.len(), 1);
        let violation = &violations[0];
        assert!(violation.file_name.ends_with("App.java"));
        assert_eq!(violation.line, Some(11));
        assert_eq!(violation.severity, "error");
        assert!(
            violation
                .message
                .contains("Line is longer than 120 characters")
        );
        assert_eq!(violation.source, LINE_LENGTH_SOURCE);
    }

    #[test]
    fn test_multiple_errors_and_files_keep_document_order() {
        let xml = r#"<checkstyle version="10.0">
<file name="A.java">
<error line="1" column="3" severity="warning" message="first" source="r1"/>
<error line="2" severity="error" message="second" source="r2"/>
</file>
<file name="Clean.java">
</file>
<file name="B.java">
<error line="7" severity="info" message="third" source="r3"/>
</file>
</checkstyle>"#;

        let violations = parse_report_str(xml).expect("Should parse");
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(violations[2].file_name, "B.java");
    }

    #[test]
    fn test_missing_and_bad_line_numbers_are_none() {
        let xml = r#"<checkstyle>
<file name="A.java">
<error severity="error" message="no line" source="r"/>
<error line="abc" severity="error" message="bad line" source="r"/>
<error line="-4" severity="error" message="negative line" source="r"/>
</file>
</checkstyle>"#;

        let violations = parse_report_str(xml).expect("Should parse");
        assert_eq!(violations.len(), 3);
        assert!(violations.iter().all(|v| v.line.is_none()));
    }

    #[test]
    fn test_errors_split_by_other_elements() {
        let xml = r#"<checkstyle>
<file name="A.java">
<error line="1" severity="error" message="first" source="r"/>
<exception>stray</exception>
<error line="2" severity="error" message="second" source="r"/>
</file>
</checkstyle>"#;

        let violations = parse_report_str(xml).expect("Should parse");
        let lines: Vec<Option<u32>> = violations.iter().map(|v| v.line).collect();
        assert_eq!(lines, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_empty_report() {
        let violations =
            parse_report_str(r#"<?xml version="1.0"?><checkstyle version="10.0"></checkstyle>"#)
                .expect("Should parse");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_malformed_report_is_error() {
        assert!(parse_report_str("<checkstyle><file name=\"A.java\">").is_err());
    }

    #[test]
    fn test_severity_ordering_and_parsing() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(Severity::Info > Severity::Ignore);
        assert_eq!("ERROR".parse::<Severity>().ok(), Some(Severity::Error));
        assert!("fatal".parse::<Severity>().is_err());
        assert_eq!(Severity::of("fatal"), Severity::Ignore);
    }

    #[test]
    fn test_missing_file_yields_nothing() {
        let violations =
            CheckstyleReportParser::parse_path(Path::new("/nonexistent/checkstyle-result.xml"));
        assert!(violations.is_empty());
    }
}
