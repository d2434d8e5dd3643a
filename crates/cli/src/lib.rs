//! s3cli CLI library
//!
//! This module exports the CLI components for the binary and for tests.

pub mod commands;
pub mod exit_code;
pub mod output;
