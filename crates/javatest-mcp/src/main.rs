// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! javatest-mcp: MCP server that runs Java builds for AI agents
//!
//! This binary serves the `run-tests` and `get-test-output` tools over stdio.
//! Logs go to stderr so they never mix with protocol messages on stdout.

use anyhow::Context;
use clap::Parser;
use rust_mcp_sdk::mcp_server::{McpServerOptions, ToMcpServerHandler, server_runtime};
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ProtocolVersion, ServerCapabilities, ServerCapabilitiesTools,
};
use rust_mcp_sdk::{McpServer, StdioTransport, TransportOptions};
use tracing::info;

use javatest_mcp::config::Config;
use javatest_mcp::server::{JavaTestServer, SERVER_NAME};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;
    let context = config.tool_context()?;
    info!(
        root = %context.default_root.display(),
        min_severity = %context.min_severity,
        "Using default project root"
    );

    let server_details = InitializeResult {
        server_info: Implementation {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: Some("Java Test MCP Server".to_string()),
            description: Some(env!("CARGO_PKG_DESCRIPTION").to_string()),
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some(
            "Call run-tests to compile and test the Java project; call get-test-output for one \
             test's captured stdout/stderr."
                .to_string(),
        ),
        protocol_version: ProtocolVersion::V2025_11_25.into(),
    };

    let transport = StdioTransport::new(TransportOptions::default())
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Failed to open stdio transport")?;

    let handler = JavaTestServer::new(context);
    let server = server_runtime::create_server(McpServerOptions {
        server_details,
        transport,
        handler: handler.to_mcp_server_handler(),
        task_store: None,
        client_task_store: None,
    });

    info!("Java Test MCP Server running on stdio");
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("MCP server stopped with an error")
}
