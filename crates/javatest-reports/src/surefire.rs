// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! JUnit XML report parsing
//!
//! Maven Surefire and Gradle both write one JUnit XML document per test class.
//! Each `<testcase>` becomes a [`TestCaseResult`]; a `<failure>` or `<error>`
//! child marks it as failed.
//!
//! # Example
//!
//! ```no_run
//! use javatest_reports::project::Project;
//! use javatest_reports::surefire::SurefireReportParser;
//!
//! let parser = SurefireReportParser::new(Project::new("/path/to/project"));
//! for result in parser.parse_reports().unwrap() {
//!     println!("{}: {}", result.qualified_name(), result.is_passed());
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ReportsError;
use crate::project::Project;
use crate::result::{TestCaseResult, TestFailure};

// ============================================================================
// Report Document Types
// ============================================================================

/// A `<testsuite>` element, or a `<testsuites>` wrapper around several
#[derive(Debug, Default, Deserialize)]
struct SuiteXml {
    #[serde(rename = "testsuite", default)]
    suites: Vec<SuiteXml>,
    #[serde(rename = "testcase", default)]
    cases: Vec<CaseXml>,
}

#[derive(Debug, Deserialize)]
struct CaseXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@classname", default)]
    class_name: String,
    #[serde(default)]
    failure: Option<FailureXml>,
    #[serde(default)]
    error: Option<FailureXml>,
    #[serde(rename = "system-out", default)]
    system_out: Option<String>,
    #[serde(rename = "system-err", default)]
    system_err: Option<String>,
}

/// Shared shape of `<failure>` and `<error>`
#[derive(Debug, Deserialize)]
struct FailureXml {
    #[serde(rename = "@message", default)]
    message: Option<String>,
    #[serde(rename = "$text", default)]
    text: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<FailureXml> for TestFailure {
    fn from(xml: FailureXml) -> Self {
        // Message and body are independent: a bare `<failure message=".."/>`
        // still marks the test as failed.
        Self {
            reason: non_blank(xml.message),
            stack_trace: non_blank(xml.text),
        }
    }
}

impl From<CaseXml> for TestCaseResult {
    fn from(case: CaseXml) -> Self {
        Self {
            name: case.name,
            class_name: case.class_name,
            failure: case.failure.or(case.error).map(TestFailure::from),
            stdout: non_blank(case.system_out),
            stderr: non_blank(case.system_err),
        }
    }
}

impl SuiteXml {
    /// Flatten nested suites in document order
    fn collect_into(self, out: &mut Vec<TestCaseResult>) {
        out.extend(self.cases.into_iter().map(TestCaseResult::from));
        for suite in self.suites {
            suite.collect_into(out);
        }
    }
}

// ============================================================================
// Parsing Functions
// ============================================================================

/// Parse a single JUnit XML document
///
/// # Errors
///
/// Returns `ReportsError::Xml` if the document is not well-formed or a
/// `<testcase>` lacks its `name` attribute.
pub fn parse_report_str(xml: &str) -> Result<Vec<TestCaseResult>, ReportsError> {
    let suite: SuiteXml = quick_xml::de::from_str(xml.trim_start())?;
    let mut results = Vec::new();
    suite.collect_into(&mut results);
    Ok(results)
}

/// Parse a single JUnit XML file
///
/// # Errors
///
/// Returns `ReportsError::Io` if the file cannot be read, or
/// `ReportsError::Xml` if it cannot be parsed.
pub fn parse_report_file(path: &Path) -> Result<Vec<TestCaseResult>, ReportsError> {
    let content = fs::read_to_string(path)?;
    parse_report_str(&content)
}

/// List `*.xml` files in a directory, sorted by file name
fn report_files(dir: &Path) -> Result<Vec<PathBuf>, ReportsError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "xml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads every test report of a project
#[derive(Debug, Clone)]
pub struct SurefireReportParser {
    project: Project,
}

impl SurefireReportParser {
    /// Create a parser for the given project
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// Parse all reports in the project's test report directory
    ///
    /// Results are ordered by file name, then by document order within each
    /// file. A missing directory yields no results. A file that cannot be read
    /// or parsed is logged and skipped so that it does not hide its siblings.
    ///
    /// # Errors
    ///
    /// Returns `ReportsError::UnsupportedProject` if the project is neither
    /// Maven nor Gradle, or `ReportsError::Io` if the directory exists but
    /// cannot be listed.
    pub fn parse_reports(&self) -> Result<Vec<TestCaseResult>, ReportsError> {
        let dir = self.project.test_report_directory()?;
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "No test report directory");
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for path in report_files(&dir)? {
            match parse_report_file(&path) {
                Ok(parsed) => {
                    debug!(file = %path.display(), count = parsed.len(), "Parsed test report");
                    results.extend(parsed);
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping malformed test report");
                }
            }
        }
        Ok(results)
    }
}
