// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Build tool invocation
//!
//! The runner drives a Maven or Gradle build in two blocking steps: compile
//! (main and test sources), then test. A failed compile stops the run. The test
//! step's own output is discarded because the XML reports it writes are read
//! afterwards by the parsers.
//!
//! # Example
//!
//! ```no_run
//! use javatest_mcp::runner::{RunOutcome, TestRunner};
//!
//! let runner = TestRunner::new("/path/to/project").expect("supported project");
//! match runner.run(Some("CalculatorTest")).expect("build tool launched") {
//!     RunOutcome::CompilationFailed { output } => eprintln!("{output}"),
//!     RunOutcome::TestsRan { .. } => println!("reports ready"),
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info, warn};

use javatest_reports::{BuildSystemKind, Project, ProjectLocation, ReportsError};

// ============================================================================
// Error Types
// ============================================================================

/// Runner errors
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The project root is neither Maven nor Gradle
    #[error(transparent)]
    Unsupported(#[from] ReportsError),

    /// The build tool could not be launched
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        /// Program that was being launched
        program: String,
        /// Underlying launch error
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Process Execution
// ============================================================================

/// What to do with a subprocess's output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Send stdout and stderr to the null device
    Discard,
    /// Capture stdout followed by stderr
    Combined,
}

/// A command line as a discrete argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute
    pub program: PathBuf,
    /// Arguments, passed without shell interpretation
    pub args: Vec<String>,
    /// Working directory
    pub cwd: PathBuf,
}

impl Invocation {
    /// Program and arguments joined by spaces, for logs and messages
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a finished subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, if the process was not killed by a signal
    pub code: Option<i32>,
    /// Captured output; empty in `CaptureMode::Discard`
    pub output: String,
}

/// Synchronous process execution
///
/// Implementations block until the process exits. There is no timeout and no
/// retry.
pub trait CommandExecutor: Send + Sync {
    /// Run the invocation to completion
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Spawn` if the process cannot be started.
    fn execute(
        &self,
        invocation: &Invocation,
        capture: CaptureMode,
    ) -> Result<ExecOutput, RunnerError>;
}

/// Executes commands with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(
        &self,
        invocation: &Invocation,
        capture: CaptureMode,
    ) -> Result<ExecOutput, RunnerError> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null());

        let spawn_error = |source| RunnerError::Spawn {
            program: invocation.program.display().to_string(),
            source,
        };

        match capture {
            CaptureMode::Discard => {
                let status = command
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .map_err(spawn_error)?;
                Ok(ExecOutput {
                    success: status.success(),
                    code: status.code(),
                    output: String::new(),
                })
            }
            CaptureMode::Combined => {
                let out = command.output().map_err(spawn_error)?;
                let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
                output.push_str(&String::from_utf8_lossy(&out.stderr));
                Ok(ExecOutput {
                    success: out.status.success(),
                    code: out.status.code(),
                    output,
                })
            }
        }
    }
}

// ============================================================================
// Build Commands
// ============================================================================

/// Per-build-system command templates
#[derive(Debug)]
struct BuildCommands {
    program: &'static str,
    wrapper: &'static str,
    compile: &'static [&'static str],
    test: &'static [&'static str],
}

#[cfg(not(windows))]
const MAVEN_COMMANDS: BuildCommands = BuildCommands {
    program: "mvn",
    wrapper: "mvnw",
    compile: &["compile", "test-compile"],
    test: &["test"],
};

#[cfg(windows)]
const MAVEN_COMMANDS: BuildCommands = BuildCommands {
    program: "mvn.cmd",
    wrapper: "mvnw.cmd",
    compile: &["compile", "test-compile"],
    test: &["test"],
};

#[cfg(not(windows))]
const GRADLE_COMMANDS: BuildCommands = BuildCommands {
    program: "gradle",
    wrapper: "gradlew",
    compile: &["compileJava", "compileTestJava"],
    test: &["test"],
};

#[cfg(windows)]
const GRADLE_COMMANDS: BuildCommands = BuildCommands {
    program: "gradle.bat",
    wrapper: "gradlew.bat",
    compile: &["compileJava", "compileTestJava"],
    test: &["test"],
};

fn commands_for(kind: BuildSystemKind) -> Option<&'static BuildCommands> {
    match kind {
        BuildSystemKind::Maven => Some(&MAVEN_COMMANDS),
        BuildSystemKind::Gradle => Some(&GRADLE_COMMANDS),
        BuildSystemKind::Unknown => None,
    }
}

/// Translate a test-selection pattern into the build tool's own flag
fn selection_args(kind: BuildSystemKind, pattern: &str) -> Vec<String> {
    match kind {
        BuildSystemKind::Maven => vec![format!("-Dtest={pattern}")],
        BuildSystemKind::Gradle => vec!["--tests".to_string(), pattern.to_string()],
        BuildSystemKind::Unknown => Vec::new(),
    }
}

/// Whether `path` is a file this process could launch
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// The build wrapper in the project root if it can be launched, else the
/// global tool
fn program_for(commands: &BuildCommands, root: &Path) -> PathBuf {
    let wrapper = root.join(commands.wrapper);
    if is_executable(&wrapper) {
        wrapper
    } else {
        if wrapper.is_file() {
            warn!(
                wrapper = %wrapper.display(),
                "Build wrapper is not executable, using global tool"
            );
        }
        PathBuf::from(commands.program)
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Result of the compile step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    /// Whether compilation succeeded
    pub success: bool,
    /// Combined compiler output
    pub output: String,
}

/// Result of a full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Compilation failed; tests were not run
    CompilationFailed {
        /// Combined compiler output
        output: String,
    },
    /// The test step ran; its reports are on disk
    TestsRan {
        /// Whether the test step exited with status zero
        success: bool,
    },
}

/// Runs the compile and test steps of a Maven or Gradle project
pub struct TestRunner<E = SystemExecutor> {
    location: ProjectLocation,
    commands: &'static BuildCommands,
    executor: E,
}

impl TestRunner<SystemExecutor> {
    /// Create a runner that launches real processes
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Unsupported` if the root is neither a Maven nor a
    /// Gradle project.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, RunnerError> {
        Self::with_executor(root, SystemExecutor)
    }
}

impl<E: CommandExecutor> TestRunner<E> {
    /// Create a runner with a custom executor
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Unsupported` if the root is neither a Maven nor a
    /// Gradle project.
    pub fn with_executor(root: impl Into<PathBuf>, executor: E) -> Result<Self, RunnerError> {
        let project = Project::new(root);
        let location = project.locate()?;
        let commands = commands_for(location.kind).ok_or_else(|| {
            RunnerError::Unsupported(ReportsError::UnsupportedProject {
                root: location.root.clone(),
            })
        })?;
        debug!(root = %location.root.display(), kind = %location.kind, "Created test runner");
        Ok(Self {
            location,
            commands,
            executor,
        })
    }

    /// The detected project layout
    #[must_use]
    pub fn location(&self) -> &ProjectLocation {
        &self.location
    }

    /// The detected build system
    #[must_use]
    pub fn kind(&self) -> BuildSystemKind {
        self.location.kind
    }

    fn invocation(&self, steps: &[&str], extra: Vec<String>) -> Invocation {
        let mut args: Vec<String> = steps.iter().map(|s| (*s).to_string()).collect();
        args.extend(extra);
        Invocation {
            program: program_for(self.commands, &self.location.root),
            args,
            cwd: self.location.root.clone(),
        }
    }

    /// Command line of the compile step
    #[must_use]
    pub fn compile_invocation(&self) -> Invocation {
        self.invocation(self.commands.compile, Vec::new())
    }

    /// Command line of the test step
    #[must_use]
    pub fn test_invocation(&self, test_pattern: Option<&str>) -> Invocation {
        let extra = test_pattern
            .map(|pattern| selection_args(self.location.kind, pattern))
            .unwrap_or_default();
        self.invocation(self.commands.test, extra)
    }

    /// Compile main and test sources
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Spawn` if the build tool cannot be launched.
    pub fn compile(&self) -> Result<CompileOutcome, RunnerError> {
        let invocation = self.compile_invocation();
        info!(command = %invocation.display(), cwd = %invocation.cwd.display(), "Compiling");
        let result = self.executor.execute(&invocation, CaptureMode::Combined)?;
        debug!(code = ?result.code, success = result.success, "Compile step finished");
        Ok(CompileOutcome {
            success: result.success,
            output: result.output,
        })
    }

    /// Compile, then run the tests selected by `test_pattern` (all if `None`)
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Spawn` if the build tool cannot be launched.
    pub fn run(&self, test_pattern: Option<&str>) -> Result<RunOutcome, RunnerError> {
        let compiled = self.compile()?;
        if !compiled.success {
            warn!(root = %self.location.root.display(), "Compilation failed, skipping tests");
            return Ok(RunOutcome::CompilationFailed {
                output: compiled.output,
            });
        }

        let invocation = self.test_invocation(test_pattern);
        info!(command = %invocation.display(), cwd = %invocation.cwd.display(), "Running tests");
        let result = self.executor.execute(&invocation, CaptureMode::Discard)?;
        debug!(code = ?result.code, success = result.success, "Test step finished");
        Ok(RunOutcome::TestsRan {
            success: result.success,
        })
    }
}
