use std::io;

use branch_warden_core::ScanError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Process exit status for a failed scan.
pub const EXIT_SCAN_FAILED: i32 = 1;

/// Process exit status for invalid settings.
pub const EXIT_INVALID_CONFIGURATION: i32 = 2;

/// Errors that can occur in the Branch Warden CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing the configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to load a file from the filesystem.
    #[error("Failed to load file.")]
    LoadFile(#[source] io::Error),

    /// A required setting was given neither on the command line, in the environment
    /// nor in the configuration file.
    #[error("{0} is required")]
    MissingSetting(&'static str),

    /// A setting has a value that cannot be used.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The GitHub client could not be created.
    #[error("GitHub client error: {0}")]
    GitHub(#[from] github_client::Error),

    /// A one-shot scan failed.
    #[error("{0}")]
    Scan(#[from] ScanError),
}

impl Error {
    /// Returns the process exit status for this error.
    ///
    /// Scan failures exit with [`EXIT_SCAN_FAILED`]; every other error happens before
    /// the first scan and exits with [`EXIT_INVALID_CONFIGURATION`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Scan(_) => EXIT_SCAN_FAILED,
            _ => EXIT_INVALID_CONFIGURATION,
        }
    }
}
