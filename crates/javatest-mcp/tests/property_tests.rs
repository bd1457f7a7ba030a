// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for javatest-mcp
//!
//! These tests use proptest to check the summary invariants for arbitrary
//! result sets and the tool input handling for arbitrary strings.


use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::json;

use javatest_mcp::handlers::{HandlerError, ToolContext, handle_get_test_output};
use javatest_mcp::summary::{RenderOptions, RunSummary, SUCCESS_MESSAGE, group_by_class};
use javatest_reports::{TestCaseResult, TestFailure};
use test_utils::{maven_project, to_args};

// ============================================================================
// Strategies
// ============================================================================

/// A small pool of class names so that groups actually form
fn class_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("com.example.AlphaTest".to_string()),
        Just("com.example.BetaTest".to_string()),
        Just("com.example.GammaTest".to_string()),
        "[A-Z][a-z]{1,8}Test".prop_map(|s| s),
    ]
}

fn test_result() -> impl Strategy<Value = TestCaseResult> {
    (
        "test[A-Z][a-zA-Z]{0,12}",
        class_name(),
        any::<bool>(),
        proptest::option::of("[a-zA-Z0-9 :<>.]{0,40}"),
    )
        .prop_map(|(name, class_name, failed, reason)| {
            if failed {
                TestCaseResult::failed(
                    name,
                    class_name,
                    TestFailure {
                        reason,
                        stack_trace: None,
                    },
                )
            } else {
                TestCaseResult::passed(name, class_name)
            }
        })
}

/// Generate arbitrary strings including edge cases
fn arbitrary_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("".to_string()),
        Just(" ".to_string()),
        Just("\t\n\r".to_string()),
        Just("日本語テスト".to_string()),
        Just("test*".to_string()),
        Just("Calc#test; rm -rf /".to_string()),
        Just("../parent/path".to_string()),
        "[a-zA-Z0-9.]{1,50}".prop_map(|s| s),
        ".*{0,100}".prop_map(|s| s),
    ]
}

// ============================================================================
// Summary Invariants
// ============================================================================

proptest! {
    #[test]
    fn display_set_is_failures_plus_requested(
        results in proptest::collection::vec(test_result(), 0..30),
        show_always in proptest::collection::vec("test[A-Z][a-zA-Z]{0,12}", 0..5),
    ) {
        let summary = RunSummary::new(results, Vec::new());
        let shown = summary.display_set(&show_always);

        let expected: Vec<&TestCaseResult> = summary
            .results
            .iter()
            .filter(|r| !r.is_passed() || show_always.contains(&r.name))
            .collect();
        prop_assert_eq!(shown, expected);
    }

    #[test]
    fn grouping_preserves_every_result_in_order(
        results in proptest::collection::vec(test_result(), 0..30),
    ) {
        let refs: Vec<&TestCaseResult> = results.iter().collect();
        let groups = group_by_class(&refs);

        let total: usize = groups.iter().map(|g| g.tests.len()).sum();
        prop_assert_eq!(total, results.len());

        let distinct: HashSet<&str> = groups.iter().map(|g| g.class_name).collect();
        prop_assert_eq!(distinct.len(), groups.len());

        for group in &groups {
            let expected: Vec<&str> = results
                .iter()
                .filter(|r| r.class_name == group.class_name)
                .map(|r| r.name.as_str())
                .collect();
            let actual: Vec<&str> = group.tests.iter().map(|r| r.name.as_str()).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn success_message_iff_nothing_to_show(
        results in proptest::collection::vec(test_result(), 0..20),
    ) {
        let summary = RunSummary::new(results.clone(), Vec::new());
        let text = summary.render::<&str>(&[], &RenderOptions::default());
        let any_failed = results.iter().any(|r| !r.is_passed());

        prop_assert_eq!(text == SUCCESS_MESSAGE, !any_failed);
        if any_failed {
            prop_assert!(text.starts_with("# Tests results:\n\n"));
            prop_assert!(!text.contains(": SUCCESS"));
        }
    }

    #[test]
    fn each_class_header_rendered_once(
        results in proptest::collection::vec(test_result(), 1..20),
    ) {
        let summary = RunSummary::new(results.clone(), Vec::new());
        let names: Vec<String> = results.iter().map(|r| r.name.clone()).collect();
        let text = summary.render(&names, &RenderOptions::default());

        for result in &results {
            let header = format!("## {}\n", result.class_name);
            prop_assert_eq!(text.matches(&header).count(), 1);
        }
    }
}

// ============================================================================
// Input Handling
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn get_test_output_never_panics(
        class in arbitrary_string(),
        name in arbitrary_string(),
    ) {
        let project = maven_project("prop-get-output");
        let ctx = ToolContext::new(project.path());
        let args = to_args(json!({ "className": class, "testName": name }));

        match handle_get_test_output(&ctx, args) {
            Ok(text) => prop_assert!(text.contains("not found")),
            Err(e) => prop_assert!(matches!(e, HandlerError::InvalidInput(_))),
        }
    }
}
