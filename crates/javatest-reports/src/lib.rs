// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! javatest-reports: Java build report processing for javatest-mcp
//!
//! This library crate detects whether a project is built with Maven or Gradle
//! and parses the XML reports those builds leave on disk (JUnit test results
//! and Checkstyle violations) into plain Rust types.
//!
//! # Example
//!
//! ```no_run
//! use javatest_reports::checkstyle::CheckstyleReportParser;
//! use javatest_reports::project::Project;
//! use javatest_reports::surefire::SurefireReportParser;
//!
//! let project = Project::new("/path/to/project");
//! let results = SurefireReportParser::new(project.clone()).parse_reports().unwrap();
//! let violations = CheckstyleReportParser::new(project).parse_report().unwrap();
//! println!("{} tests, {} violations", results.len(), violations.len());
//! ```

pub mod checkstyle;
pub mod error;
pub mod project;
pub mod result;
pub mod surefire;

pub use checkstyle::{CheckstyleReportParser, Severity};
pub use error::ReportsError;
pub use project::{BuildSystemKind, Project, ProjectLocation};
pub use result::{StyleViolation, TestCaseResult, TestFailure};
pub use surefire::SurefireReportParser;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::checkstyle::{CheckstyleReportParser, Severity};
    pub use crate::error::ReportsError;
    pub use crate::project::{BuildSystemKind, Project};
    pub use crate::result::{StyleViolation, TestCaseResult};
    pub use crate::surefire::SurefireReportParser;
}
