// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! javatest-mcp library
//!
//! This module exports the core functionality of javatest-mcp for use in
//! integration tests and as a library.

pub mod config;
pub mod handlers;
pub mod runner;
pub mod server;
pub mod summary;
