//! Branch Warden CLI library exports for integration testing.
//!
//! This module exposes settings resolution, logging setup and signal handling used by
//! the `branch-warden` binary.

pub mod config;
pub mod errors;
pub mod logging;
pub mod signal;
