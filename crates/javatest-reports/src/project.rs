// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Build system detection
//!
//! A project root is classified by the marker files it contains. Maven is
//! checked before Gradle, so a root holding both `pom.xml` and `build.gradle`
//! is treated as a Maven project.
//!
//! # Example
//!
//! ```no_run
//! use javatest_reports::project::{BuildSystemKind, Project};
//!
//! let project = Project::new("/path/to/java/project");
//! if project.kind() == BuildSystemKind::Maven {
//!     println!("reports in {}", project.test_report_directory().unwrap().display());
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::ReportsError;

/// Supported build systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildSystemKind {
    /// Apache Maven (`pom.xml`)
    Maven,
    /// Gradle (`build.gradle` or `build.gradle.kts`)
    Gradle,
    /// No supported marker file found
    Unknown,
}

/// Per-build-system file layout, relative to the project root
#[derive(Debug)]
struct Layout {
    markers: &'static [&'static str],
    test_reports: &'static [&'static str],
    style_report: &'static [&'static str],
}

const MAVEN_LAYOUT: Layout = Layout {
    markers: &["pom.xml"],
    test_reports: &["target", "surefire-reports"],
    style_report: &["target", "checkstyle-result.xml"],
};

const GRADLE_LAYOUT: Layout = Layout {
    markers: &["build.gradle", "build.gradle.kts"],
    test_reports: &["build", "test-results", "test"],
    style_report: &["build", "reports", "checkstyle", "main.xml"],
};

/// Detection order; the first match wins
const DETECTION_ORDER: [BuildSystemKind; 2] = [BuildSystemKind::Maven, BuildSystemKind::Gradle];

impl BuildSystemKind {
    fn layout(self) -> Option<&'static Layout> {
        match self {
            Self::Maven => Some(&MAVEN_LAYOUT),
            Self::Gradle => Some(&GRADLE_LAYOUT),
            Self::Unknown => None,
        }
    }

    /// Human-readable name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maven => "Maven",
            Self::Gradle => "Gradle",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BuildSystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join_all(root: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(root.to_path_buf(), |path, part| path.join(part))
}

/// A project root and the queries derived from it
///
/// Every query re-checks the filesystem; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Create a detector for the given project root
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn has_markers(&self, kind: BuildSystemKind) -> bool {
        kind.layout().is_some_and(|layout| {
            layout
                .markers
                .iter()
                .any(|marker| self.root.join(marker).exists())
        })
    }

    /// Check if the root contains `pom.xml`
    #[must_use]
    pub fn is_maven_project(&self) -> bool {
        self.has_markers(BuildSystemKind::Maven)
    }

    /// Check if the root contains `build.gradle` or `build.gradle.kts`
    #[must_use]
    pub fn is_gradle_project(&self) -> bool {
        self.has_markers(BuildSystemKind::Gradle)
    }

    /// Classify the project
    #[must_use]
    pub fn kind(&self) -> BuildSystemKind {
        let kind = DETECTION_ORDER
            .into_iter()
            .find(|kind| self.has_markers(*kind))
            .unwrap_or(BuildSystemKind::Unknown);
        debug!(root = %self.root.display(), %kind, "Detected build system");
        kind
    }

    fn layout(&self) -> Result<&'static Layout, ReportsError> {
        self.kind()
            .layout()
            .ok_or_else(|| ReportsError::UnsupportedProject {
                root: self.root.clone(),
            })
    }

    /// Directory holding the JUnit XML reports
    ///
    /// # Errors
    ///
    /// Returns `ReportsError::UnsupportedProject` if no build system is detected.
    pub fn test_report_directory(&self) -> Result<PathBuf, ReportsError> {
        Ok(join_all(&self.root, self.layout()?.test_reports))
    }

    /// Path of the Checkstyle XML report
    ///
    /// # Errors
    ///
    /// Returns `ReportsError::UnsupportedProject` if no build system is detected.
    pub fn style_report_path(&self) -> Result<PathBuf, ReportsError> {
        Ok(join_all(&self.root, self.layout()?.style_report))
    }

    /// Take a snapshot of the detected layout
    ///
    /// # Errors
    ///
    /// Returns `ReportsError::UnsupportedProject` if no build system is detected.
    pub fn locate(&self) -> Result<ProjectLocation, ReportsError> {
        let kind = self.kind();
        let layout = kind
            .layout()
            .ok_or_else(|| ReportsError::UnsupportedProject {
                root: self.root.clone(),
            })?;
        Ok(ProjectLocation {
            root: self.root.clone(),
            kind,
            test_report_directory: join_all(&self.root, layout.test_reports),
            style_report_path: join_all(&self.root, layout.style_report),
        })
    }
}

/// Immutable snapshot of a detected project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    /// Project root
    pub root: PathBuf,
    /// Detected build system, never `Unknown`
    pub kind: BuildSystemKind,
    /// Directory holding the JUnit XML reports
    pub test_report_directory: PathBuf,
    /// Path of the Checkstyle XML report
    pub style_report_path: PathBuf,
}
