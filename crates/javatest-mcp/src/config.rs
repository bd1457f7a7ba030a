// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the javatest-mcp server
//!
//! This module provides the command-line configuration: the default project
//! root, the style severity threshold and logging options.

use std::path::PathBuf;

use clap::Parser;
use javatest_reports::Severity;

use crate::handlers::ToolContext;

fn parse_severity(value: &str) -> Result<Severity, String> {
    value.parse().map_err(|e: javatest_reports::ReportsError| e.to_string())
}

/// Java Test MCP Server - compile, test and lint Maven/Gradle projects for AI agents
#[derive(Parser, Debug, Clone)]
#[command(name = "javatest-mcp")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Default project root for tool calls
    ///
    /// Tools may override it per call. Defaults to the current working
    /// directory.
    #[arg(value_name = "PROJECT_ROOT", env = "JAVATEST_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Lowest Checkstyle severity listed in test summaries
    ///
    /// Violations below this level are counted but not listed.
    #[arg(
        long,
        env = "JAVATEST_MIN_SEVERITY",
        default_value = "error",
        value_parser = parse_severity
    )]
    pub min_severity: Severity,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr to avoid interfering with MCP stdio
    /// transport.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: None,
            min_severity: Severity::Error,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Get the default project root, using the current directory as fallback
    ///
    /// Returns `None` if no root is specified and the current directory
    /// cannot be determined.
    #[must_use]
    pub fn project_root_path(&self) -> Option<PathBuf> {
        self.project_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the project root is specified but doesn't exist or
    /// is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.project_root {
            if !root.exists() {
                return Err(ConfigError::ProjectRootNotFound(root.clone()));
            }
            if !root.is_dir() {
                return Err(ConfigError::ProjectRootNotDirectory(root.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Build the context shared by tool calls
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoProjectRoot` if no root is configured and the
    /// current directory cannot be determined.
    pub fn tool_context(&self) -> Result<ToolContext, ConfigError> {
        let root = self.project_root_path().ok_or(ConfigError::NoProjectRoot)?;
        Ok(ToolContext::new(root).with_min_severity(self.min_severity))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Project root not found
    #[error("Project root not found: {0}")]
    ProjectRootNotFound(PathBuf),

    /// Project root is not a directory
    #[error("Project root is not a directory: {0}")]
    ProjectRootNotDirectory(PathBuf),

    /// No project root given and no current directory
    #[error("No project root given and the current directory is unavailable")]
    NoProjectRoot,
}
