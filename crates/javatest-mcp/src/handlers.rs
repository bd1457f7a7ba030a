// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tool handlers for the MCP server
//!
//! This module implements the handlers for each MCP tool. Handlers are
//! synchronous: they block while the build tool runs and then read the
//! reports it left on disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use javatest_reports::{
    CheckstyleReportParser, Project, ReportsError, Severity, SurefireReportParser,
};

use crate::runner::{CommandExecutor, RunOutcome, RunnerError, SystemExecutor, TestRunner};
use crate::summary::{RenderOptions, RunSummary, render_test_output};

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid input - missing required field
    #[error("Invalid input: {0}. Check the tool's required parameters.")]
    InvalidInput(String),

    /// Project root not found
    #[error("Project root not found: {0}. Ensure the path exists and is a directory.")]
    ProjectRootNotFound(String),

    /// Build tool failure
    #[error("{0}")]
    Runner(#[from] RunnerError),

    /// Report failure
    #[error("{0}")]
    Reports(#[from] ReportsError),
}

// ============================================================================
// Context
// ============================================================================

/// Settings shared by every tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContext {
    /// Project root used when a call does not override it
    pub default_root: PathBuf,
    /// Lowest style severity listed in summaries
    pub min_severity: Severity,
}

impl ToolContext {
    /// Create a context with the default severity threshold
    #[must_use]
    pub fn new(default_root: impl Into<PathBuf>) -> Self {
        Self {
            default_root: default_root.into(),
            min_severity: RenderOptions::default().min_severity,
        }
    }

    /// Set the severity threshold
    #[must_use]
    pub fn with_min_severity(mut self, min_severity: Severity) -> Self {
        self.min_severity = min_severity;
        self
    }

    /// Resolve an optional per-call override into an absolute, existing root
    fn resolve_root(&self, project_root: Option<&str>) -> Result<PathBuf, HandlerError> {
        let root = project_root
            .filter(|s| !s.trim().is_empty())
            .map_or_else(|| self.default_root.clone(), PathBuf::from);
        let root = std::path::absolute(&root).unwrap_or(root);

        if !root.is_dir() {
            return Err(HandlerError::ProjectRootNotFound(
                root.display().to_string(),
            ));
        }
        Ok(root)
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// Input for the run-tests tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTestsInput {
    /// Override of the default project root
    pub project_root: Option<String>,
    /// Test names to report even when they pass
    #[serde(default)]
    pub show_always: Vec<String>,
    /// Test-selection pattern passed to the build tool
    pub test_pattern: Option<String>,
}

/// Input for the get-test-output tool
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutputInput {
    /// Override of the default project root
    pub project_root: Option<String>,
    /// Class declaring the test
    pub class_name: String,
    /// Test method name
    pub test_name: String,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Parse input from MCP arguments into a typed struct
fn parse_input<T: for<'de> Deserialize<'de>>(
    args: Option<Map<String, Value>>,
) -> Result<T, HandlerError> {
    let value = args
        .map(Value::Object)
        .unwrap_or(Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidInput(e.to_string()))
}

/// Parse both reports of a project into a fresh summary
fn read_reports(root: &Path) -> Result<RunSummary, HandlerError> {
    let project = Project::new(root);
    let results = SurefireReportParser::new(project.clone()).parse_reports()?;
    let violations = CheckstyleReportParser::new(project).parse_report()?;
    info!(
        tests = results.len(),
        violations = violations.len(),
        "Read build reports"
    );
    Ok(RunSummary::new(results, violations))
}

/// Handle the run-tests tool
///
/// Compiles, runs the tests and returns the rendered summary.
pub fn handle_run_tests(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<String, HandlerError> {
    handle_run_tests_with(ctx, args, SystemExecutor)
}

/// Handle the run-tests tool with a custom process executor
pub fn handle_run_tests_with<E: CommandExecutor>(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
    executor: E,
) -> Result<String, HandlerError> {
    let input: RunTestsInput = parse_input(args)?;
    let root = ctx.resolve_root(input.project_root.as_deref())?;
    let pattern = input
        .test_pattern
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    debug!(root = %root.display(), ?pattern, show_always = ?input.show_always, "run-tests");

    let runner = TestRunner::with_executor(&root, executor)?;
    if let RunOutcome::CompilationFailed { output } = runner.run(pattern)? {
        return Ok(format!("Compilation failed:\n\n{output}"));
    }

    let summary = read_reports(&root)?;
    let options = RenderOptions {
        min_severity: ctx.min_severity,
    };
    Ok(summary.render(&input.show_always, &options))
}

/// Handle the get-test-output tool
///
/// Reads the existing reports without running a build.
pub fn handle_get_test_output(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<String, HandlerError> {
    let input: TestOutputInput = parse_input(args)?;

    if input.class_name.trim().is_empty() || input.test_name.trim().is_empty() {
        return Err(HandlerError::InvalidInput(
            "className and testName are required, e.g. 'com.example.CalculatorTest' and 'testAdd'"
                .to_string(),
        ));
    }

    let root = ctx.resolve_root(input.project_root.as_deref())?;
    let results = SurefireReportParser::new(Project::new(&root)).parse_reports()?;
    Ok(render_test_output(
        &results,
        &input.class_name,
        &input.test_name,
    ))
}

// ============================================================================
// Tests
// ============================================================================
