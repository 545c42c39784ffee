// ABOUTME: Configuration management module
// ABOUTME: Environment-based settings parsed once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! Configuration management. All settings come from environment variables
//! with documented defaults; the parsed [`environment::Config`] is built
//! once at startup and handed to the bootstrap layer.

pub mod environment;

pub use environment::Config;
