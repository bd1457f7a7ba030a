// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Summary rendering
//!
//! Turns parsed test results and style violations into the compact text an
//! agent reads: failed tests (plus any it asked to always see) grouped by
//! class, preceded by style violations at or above a severity threshold.

use std::collections::{HashMap, HashSet};
use std::fmt;

use javatest_reports::{Severity, StyleViolation, TestCaseResult};

/// Reported when nothing needs attention
pub const SUCCESS_MESSAGE: &str = "All tests passed successfully.";

/// Parsed state of one run, rebuilt from disk for every invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Style violations of every severity, in report order
    pub violations: Vec<StyleViolation>,
    /// Test results, in report order
    pub results: Vec<TestCaseResult>,
}

/// Presentation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Lowest violation severity that is listed individually
    pub min_severity: Severity,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            min_severity: Severity::Error,
        }
    }
}

/// Test results sharing a class, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassGroup<'a> {
    /// The shared class name
    pub class_name: &'a str,
    /// Results in input order
    pub tests: Vec<&'a TestCaseResult>,
}

/// Group results by class name, keeping the order in which classes first appear
#[must_use]
pub fn group_by_class<'a>(results: &[&'a TestCaseResult]) -> Vec<ClassGroup<'a>> {
    let mut groups: Vec<ClassGroup<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for result in results {
        let class_name = result.class_name.as_str();
        let slot = *index.entry(class_name).or_insert_with(|| {
            groups.push(ClassGroup {
                class_name,
                tests: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].tests.push(result);
    }

    groups
}

impl RunSummary {
    /// Create a summary from parsed reports
    #[must_use]
    pub fn new(results: Vec<TestCaseResult>, violations: Vec<StyleViolation>) -> Self {
        Self {
            violations,
            results,
        }
    }

    /// Failed results plus passed results named in `show_always`
    #[must_use]
    pub fn display_set<S: AsRef<str>>(&self, show_always: &[S]) -> Vec<&TestCaseResult> {
        let always: HashSet<&str> = show_always.iter().map(AsRef::as_ref).collect();
        self.results
            .iter()
            .filter(|r| !r.is_passed() || always.contains(r.name.as_str()))
            .collect()
    }

    /// Render the summary text
    #[must_use]
    pub fn render<S: AsRef<str>>(&self, show_always: &[S], options: &RenderOptions) -> String {
        let tests = self.display_set(show_always);
        if tests.is_empty() && self.violations.is_empty() {
            return SUCCESS_MESSAGE.to_string();
        }

        let (shown, hidden): (Vec<&StyleViolation>, Vec<&StyleViolation>) = self
            .violations
            .iter()
            .partition(|v| v.severity_level() >= options.min_severity);

        SummaryView {
            violations: shown,
            hidden_violations: hidden.len(),
            min_severity: options.min_severity,
            groups: group_by_class(&tests),
        }
        .to_string()
    }
}

struct SummaryView<'a> {
    violations: Vec<&'a StyleViolation>,
    hidden_violations: usize,
    min_severity: Severity,
    groups: Vec<ClassGroup<'a>>,
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.violations.is_empty() || self.hidden_violations > 0 {
            write!(f, "# Checkstyle violations:\n\n")?;
            for v in &self.violations {
                match v.line {
                    Some(line) => writeln!(
                        f,
                        "{}:{} - {}: {}",
                        v.file_name, line, v.severity, v.message
                    )?,
                    None => writeln!(f, "{} - {}: {}", v.file_name, v.severity, v.message)?,
                }
            }
            if self.hidden_violations > 0 {
                writeln!(
                    f,
                    "({} violation(s) below {} severity not shown)",
                    self.hidden_violations, self.min_severity
                )?;
            }
            writeln!(f)?;
        }

        if !self.groups.is_empty() {
            write!(f, "# Tests results:\n\n")?;
            for group in &self.groups {
                write!(f, "## {}\n\n", group.class_name)?;
                for test in &group.tests {
                    let status = if test.is_passed() { "SUCCESS" } else { "FAILED" };
                    writeln!(f, "### {}: {}", test.name, status)?;
                    if let Some(reason) = test.failure_reason() {
                        writeln!(f, "Reason: {reason}")?;
                    }
                    if let Some(trace) = test.failure_stack_trace() {
                        writeln!(f, "Stack trace: {trace}")?;
                    }
                    writeln!(f)?;
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Output Lookup
// ============================================================================

/// Result of looking up one test's captured output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLookup<'a> {
    /// The test was found
    Found(&'a TestCaseResult),
    /// No such test; every known `className.name`
    NotFound {
        /// Known tests, in report order
        available: Vec<String>,
    },
}

/// Find the result for `class_name` / `test_name`
#[must_use]
pub fn find_test<'a>(
    results: &'a [TestCaseResult],
    class_name: &str,
    test_name: &str,
) -> OutputLookup<'a> {
    results
        .iter()
        .find(|r| r.class_name == class_name && r.name == test_name)
        .map_or_else(
            || OutputLookup::NotFound {
                available: results.iter().map(TestCaseResult::qualified_name).collect(),
            },
            OutputLookup::Found,
        )
}

/// Render one test's captured output, or the list of known tests if missing
#[must_use]
pub fn render_test_output(results: &[TestCaseResult], class_name: &str, test_name: &str) -> String {
    match find_test(results, class_name, test_name) {
        OutputLookup::Found(result) => {
            let mut text = format!("Test output for {class_name}.{test_name}:\n");
            if let Some(stdout) = &result.stdout {
                text.push_str("\nSTDOUT:\n");
                text.push_str(stdout);
            }
            if let Some(stderr) = &result.stderr {
                text.push_str("\nSTDERR:\n");
                text.push_str(stderr);
            }
            if result.stdout.is_none() && result.stderr.is_none() {
                text.push_str("\nNo output.");
            }
            text
        }
        OutputLookup::NotFound { available } => format!(
            "Test {test_name} in class {class_name} not found. Available tests:\n{}",
            available.join("\n")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javatest_reports::TestFailure;
    use similar_asserts::assert_eq;

    const CALC: &str = "com.example.app.CalculatorTest";

    fn subtract_fail() -> TestCaseResult {
        TestCaseResult::failed(
            "testSubtractFail",
            CALC,
            TestFailure {
                reason: Some("expected:<0> but was:<3>".to_string()),
                stack_trace: Some("java.lang.AssertionError".to_string()),
            },
        )
    }

    fn violation(severity: &str, line: Option<u32>) -> StyleViolation {
        StyleViolation {
            file_name: "App.java".to_string(),
            line,
            severity: severity.to_string(),
            message: "Line is longer than 120 characters".to_string(),
            source: "LineLengthCheck".to_string(),
        }
    }

    fn calculator_summary() -> RunSummary {
        RunSummary::new(
            vec![TestCaseResult::passed("testAddSuccess", CALC), subtract_fail()],
            Vec::new(),
        )
    }

    #[test]
    fn test_success_message_when_nothing_to_show() {
        let summary = RunSummary::new(vec![TestCaseResult::passed("a", "C")], Vec::new());
        let text = summary.render::<&str>(&[], &RenderOptions::default());
        assert_eq!(text, SUCCESS_MESSAGE);
    }

    #[test]
    fn test_only_failures_shown_by_default() {
        let text = calculator_summary().render::<&str>(&[], &RenderOptions::default());
        assert_eq!(
            text,
            "# Tests results:\n\n\
             ## com.example.app.CalculatorTest\n\n\
             ### testSubtractFail: FAILED\n\
             Reason: expected:<0> but was:<3>\n\
             Stack trace: java.lang.AssertionError\n\n"
        );
    }

    #[test]
    fn test_show_always_includes_passing_test() {
        let text = calculator_summary().render(&["testAddSuccess"], &RenderOptions::default());
        assert!(text.contains("### testAddSuccess: SUCCESS"));
        assert!(text.contains("### testSubtractFail: FAILED"));
        assert_eq!(text.matches("## com.example.app.CalculatorTest").count(), 1);
    }

    #[test]
    fn test_show_always_alone_forces_report() {
        let summary = RunSummary::new(vec![TestCaseResult::passed("a", "C")], Vec::new());
        let text = summary.render(&["a"], &RenderOptions::default());
        assert_eq!(text, "# Tests results:\n\n## C\n\n### a: SUCCESS\n\n");
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let results = vec![
            TestCaseResult::failed("z1", "Zeta", TestFailure::default()),
            TestCaseResult::failed("a1", "Alpha", TestFailure::default()),
            TestCaseResult::failed("z2", "Zeta", TestFailure::default()),
        ];
        let refs: Vec<&TestCaseResult> = results.iter().collect();
        let groups = group_by_class(&refs);
        let classes: Vec<&str> = groups.iter().map(|g| g.class_name).collect();
        assert_eq!(classes, vec!["Zeta", "Alpha"]);
        let zeta: Vec<&str> = groups[0].tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(zeta, vec!["z1", "z2"]);
    }

    #[test]
    fn test_failure_without_details_renders_status_only() {
        let summary = RunSummary::new(
            vec![TestCaseResult::failed("t", "C", TestFailure::default())],
            Vec::new(),
        );
        let text = summary.render::<&str>(&[], &RenderOptions::default());
        assert_eq!(text, "# Tests results:\n\n## C\n\n### t: FAILED\n\n");
    }

    #[test]
    fn test_error_violations_listed_before_tests() {
        let summary = RunSummary::new(
            vec![subtract_fail()],
            vec![violation("error", Some(11)), violation("warning", Some(3))],
        );
        let text = summary.render::<&str>(&[], &RenderOptions::default());
        assert!(text.starts_with(
            "# Checkstyle violations:\n\n\
             App.java:11 - error: Line is longer than 120 characters\n\
             (1 violation(s) below error severity not shown)\n\n\
             # Tests results:"
        ));
        assert!(!text.contains("App.java:3"));
    }

    #[test]
    fn test_warnings_only_are_not_success() {
        let summary = RunSummary::new(Vec::new(), vec![violation("warning", Some(3))]);
        let text = summary.render::<&str>(&[], &RenderOptions::default());
        assert_eq!(
            text,
            "# Checkstyle violations:\n\n(1 violation(s) below error severity not shown)\n\n"
        );
    }

    #[test]
    fn test_lower_threshold_shows_warnings() {
        let summary = RunSummary::new(
            Vec::new(),
            vec![violation("warning", Some(3)), violation("info", None)],
        );
        let options = RenderOptions {
            min_severity: Severity::Warning,
        };
        let text = summary.render::<&str>(&[], &options);
        assert!(text.contains("App.java:3 - warning:"));
        assert!(text.contains("(1 violation(s) below warning severity not shown)"));
    }

    #[test]
    fn test_violation_without_line() {
        let summary = RunSummary::new(Vec::new(), vec![violation("error", None)]);
        let text = summary.render::<&str>(&[], &RenderOptions::default());
        assert!(text.contains("App.java - error: Line is longer"));
    }

    #[test]
    fn test_render_output_found() {
        let mut result = TestCaseResult::passed("testAddSuccess", CALC);
        result.stdout = Some("adding".to_string());
        result.stderr = Some("warn".to_string());
        let text = render_test_output(&[result], CALC, "testAddSuccess");
        assert_eq!(
            text,
            "Test output for com.example.app.CalculatorTest.testAddSuccess:\n\
             \nSTDOUT:\nadding\nSTDERR:\nwarn"
        );
    }

    #[test]
    fn test_render_output_empty() {
        let results = vec![TestCaseResult::passed("testAddSuccess", CALC)];
        let text = render_test_output(&results, CALC, "testAddSuccess");
        assert!(text.ends_with("\nNo output."));
    }

    #[test]
    fn test_render_output_not_found_lists_known_tests() {
        let results = calculator_summary().results;
        let text = render_test_output(&results, CALC, "testMultiply");
        assert!(text.starts_with(
            "Test testMultiply in class com.example.app.CalculatorTest not found."
        ));
        assert!(text.contains("com.example.app.CalculatorTest.testAddSuccess"));
        assert!(text.contains("com.example.app.CalculatorTest.testSubtractFail"));
    }

    #[test]
    fn test_lookup_requires_class_and_name_match() {
        let results = calculator_summary().results;
        assert!(matches!(
            find_test(&results, "Other", "testAddSuccess"),
            OutputLookup::NotFound { .. }
        ));
        assert!(matches!(
            find_test(&results, CALC, "testAddSuccess"),
            OutputLookup::Found(_)
        ));
    }
}
