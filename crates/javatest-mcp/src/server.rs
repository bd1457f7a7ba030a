// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! MCP server implementation for javatest-mcp
//!
//! This module provides the MCP server that exposes the Java build/test cycle
//! to LLMs via two tools: `run-tests` and `get-test-output`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::McpServer;
use rust_mcp_sdk::mcp_server::ServerHandler;
use rust_mcp_sdk::schema::{
    CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams, RpcError,
    TextContent, Tool, ToolInputSchema, schema_utils::CallToolError,
};
use serde_json::{Map, Value, json};
use tracing::{debug, error};

use crate::handlers::{self, HandlerError, ToolContext};

/// Server name reported during initialization
pub const SERVER_NAME: &str = "java-test-mcp-server";

const RUN_TESTS: &str = "run-tests";
const GET_TEST_OUTPUT: &str = "get-test-output";

type ToolFn = fn(&ToolContext, Option<Map<String, Value>>) -> Result<String, HandlerError>;

/// Convert a JSON object into the properties format expected by ToolInputSchema.
///
/// ToolInputSchema expects `HashMap<String, Map<String, Value>>` for properties,
/// where each key maps to a JSON object describing that property's schema.
fn make_properties(json_obj: Value) -> HashMap<String, Map<String, Value>> {
    let mut properties = HashMap::new();
    if let Value::Object(obj) = json_obj {
        for (key, value) in obj {
            if let Value::Object(inner) = value {
                properties.insert(key, inner);
            }
        }
    }
    properties
}

/// The main javatest MCP server handler
pub struct JavaTestServer {
    context: Arc<ToolContext>,
}

impl JavaTestServer {
    /// Create a new server with the given tool context
    #[must_use]
    pub fn new(context: ToolContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    /// Settings shared by tool calls
    #[must_use]
    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Build the list of available tools
    fn build_tools() -> Vec<Tool> {
        vec![Self::run_tests_tool(), Self::get_test_output_tool()]
    }

    fn run_tests_tool() -> Tool {
        Tool {
            name: RUN_TESTS.into(),
            description: Some(
                "Compile code, run checks and run tests. Use this tool to run the tests and get \
                 test results. Upon failure, only failed assertions are reported. Successful \
                 tests are not reported. To always include specific tests in the output (e.g. to \
                 check that a test has been executed), specify the showAlways parameter. If you \
                 want the full test output, use the get-test-output tool. Use testPattern to run \
                 specific tests - examples: 'MyTestClass' (single class), 'com.example.*' \
                 (package), 'MyTestClass#testMethod' (specific method)."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(
                vec![],
                Some(make_properties(json!({
                    "projectRoot": {
                        "type": "string",
                        "description": "Override project root. If there are multiple projects in the root, specify the subdirectory."
                    },
                    "showAlways": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of test names (method name in Java) to include in output even upon success"
                    },
                    "testPattern": {
                        "type": "string",
                        "description": "Test pattern to select specific tests to run (Maven: -Dtest=pattern, Gradle: --tests pattern)"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Run Java Tests".into()),
        }
    }

    fn get_test_output_tool() -> Tool {
        Tool {
            name: GET_TEST_OUTPUT.into(),
            description: Some(
                "Get full test stdout/stderr output. Use this after run-tests if this output is \
                 needed for debugging."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(
                vec!["className".into(), "testName".into()],
                Some(make_properties(json!({
                    "projectRoot": {
                        "type": "string",
                        "description": "Override project root. If there are multiple projects in the root, specify the subdirectory."
                    },
                    "className": {
                        "type": "string",
                        "description": "Fully qualified name of the class to get output for"
                    },
                    "testName": {
                        "type": "string",
                        "description": "Name of the test to get output for"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Get Test Output".into()),
        }
    }

    /// Run a tool to completion and convert every outcome into text
    ///
    /// Returns `None` for an unknown tool name.
    pub async fn call_tool(&self, name: &str, args: Option<Map<String, Value>>) -> Option<String> {
        let (handler, prefix): (ToolFn, &str) = match name {
            RUN_TESTS => (handlers::handle_run_tests, "Error running tests"),
            GET_TEST_OUTPUT => (handlers::handle_get_test_output, "Error getting test output"),
            _ => return None,
        };

        let context = Arc::clone(&self.context);
        let joined = tokio::task::spawn_blocking(move || handler(&context, args)).await;

        let text = match joined {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                debug!(tool = name, error = %e, "Tool returned an error");
                format!("{prefix}: {e}")
            }
            Err(e) => {
                error!(tool = name, error = %e, "Tool task aborted");
                format!("{prefix}: {e}")
            }
        };
        Some(text)
    }
}

/// ServerHandler implementation for the MCP protocol
#[async_trait]
impl ServerHandler for JavaTestServer {
    /// Handle requests to list available tools
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: Self::build_tools(),
            meta: None,
            next_cursor: None,
        })
    }

    /// Handle requests to call a specific tool
    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        debug!(tool = %params.name, "Calling tool");

        match self.call_tool(&params.name, params.arguments).await {
            Some(text) => Ok(CallToolResult::text_content(vec![TextContent::new(
                text, None, None,
            )])),
            None => Err(CallToolError::unknown_tool(&params.name)),
        }
    }
}
