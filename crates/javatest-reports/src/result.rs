// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Result types shared by the report parsers

use serde::Serialize;

/// Outcome of a single `<testcase>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseResult {
    /// Test method name
    pub name: String,
    /// Fully qualified name of the class declaring the test
    pub class_name: String,
    /// Failure details; `None` means the test passed
    pub failure: Option<TestFailure>,
    /// Captured standard output, if any
    pub stdout: Option<String>,
    /// Captured standard error, if any
    pub stderr: Option<String>,
}

/// Details extracted from a `<failure>` or `<error>` marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestFailure {
    /// The marker's `message` attribute
    pub reason: Option<String>,
    /// The marker's text content, usually a stack trace
    pub stack_trace: Option<String>,
}

impl TestCaseResult {
    /// Create a passing result with no captured output
    #[must_use]
    pub fn passed(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            failure: None,
            stdout: None,
            stderr: None,
        }
    }

    /// Create a failing result with no captured output
    #[must_use]
    pub fn failed(
        name: impl Into<String>,
        class_name: impl Into<String>,
        failure: TestFailure,
    ) -> Self {
        Self {
            failure: Some(failure),
            ..Self::passed(name, class_name)
        }
    }

    /// Check if the test passed
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Failure message, only present for failed tests
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure.as_ref().and_then(|f| f.reason.as_deref())
    }

    /// Failure stack trace, only present for failed tests
    #[must_use]
    pub fn failure_stack_trace(&self) -> Option<&str> {
        self.failure.as_ref().and_then(|f| f.stack_trace.as_deref())
    }

    /// `className.name`, the form used when listing known tests
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class_name, self.name)
    }
}

/// A single Checkstyle `<error>` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleViolation {
    /// Source file the violation was reported against
    pub file_name: String,
    /// Line number; `None` when the report omits it or it is not a number
    pub line: Option<u32>,
    /// Severity as written in the report (e.g. "error", "warning")
    pub severity: String,
    /// Human-readable violation message
    pub message: String,
    /// Rule identifier, e.g. `com.puppycrawl.tools.checkstyle.checks.sizes.LineLengthCheck`
    pub source: String,
}
