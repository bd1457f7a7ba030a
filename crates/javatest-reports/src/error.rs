// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for javatest-reports

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during project detection and report parsing
#[derive(Debug, Error)]
pub enum ReportsError {
    /// Neither a Maven nor a Gradle marker file was found at the project root
    #[error("Project is not a Maven or a Gradle project: {}", root.display())]
    UnsupportedProject {
        /// The project root that was inspected
        root: PathBuf,
    },

    /// Error reading a report file or directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error deserializing a report document
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// A severity name that Checkstyle does not define
    #[error("Unknown severity '{value}' (expected ignore, info, warning or error)")]
    UnknownSeverity {
        /// The rejected input
        value: String,
    },
}
