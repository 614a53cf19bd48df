//! Settings resolution for the Branch Warden CLI.
//!
//! Settings come from three places. Command-line flags and their `BRANCH_WARDEN_*`
//! environment variables win over the optional TOML configuration file, which wins
//! over the built-in defaults. The token is only accepted from the command line or the
//! environment; a configuration file containing a `token` key is rejected.

use std::{fs, path::Path};

use branch_warden_core::Schedule;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings read from the TOML configuration file.
///
/// # Example TOML Configuration
///
/// ```toml
/// user = "warden-bot"
/// org = "acme"
/// frequency = 15
/// verbose = false
/// api_url = "https://github.example.com/api/v3/"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub user: Option<String>,
    pub org: Option<String>,
    /// Minutes between checks; `0` runs a single check
    pub frequency: Option<u64>,
    pub verbose: Option<bool>,
    /// Base address of the GitHub API, for GitHub Enterprise
    pub api_url: Option<String>,
}

impl FileConfig {
    /// Loads the configuration file at the given path.
    ///
    /// # Errors
    ///
    /// - [`Error::LoadFile`] if the file cannot be read
    /// - [`Error::Config`] if the file is not valid TOML or contains unknown keys
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        let content = fs::read_to_string(path).map_err(Error::LoadFile)?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub user: Option<String>,
    pub token: Option<SecretString>,
    pub org: Option<String>,
    pub frequency: Option<u64>,
    pub verbose: bool,
    pub api_url: Option<String>,
}

/// Fully resolved settings for one run of the program.
#[derive(Debug)]
pub struct Settings {
    pub user: String,
    pub token: SecretString,
    pub org: String,
    pub schedule: Schedule,
    pub verbose: bool,
    pub api_url: Option<Url>,
}

impl Settings {
    /// Merges command-line values with the configuration file.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSetting`] if `user`, `token` or `org` is missing or empty
    /// - [`Error::InvalidArguments`] if `frequency` exceeds
    ///   [`Schedule::MAX_INTERVAL_MINUTES`] or `api_url` is not an absolute URL
    pub fn resolve(cli: CliOverrides, file: FileConfig) -> Result<Self, Error> {
        let user = non_empty(cli.user.or(file.user)).ok_or(Error::MissingSetting("user"))?;
        let token = cli
            .token
            .filter(|t| !t.expose_secret().is_empty())
            .ok_or(Error::MissingSetting("token"))?;
        let org = non_empty(cli.org.or(file.org)).ok_or(Error::MissingSetting("org"))?;

        let frequency = cli.frequency.or(file.frequency).unwrap_or(0);
        let schedule = Schedule::from_minutes(frequency).ok_or_else(|| {
            Error::InvalidArguments(format!(
                "frequency {} exceeds the maximum of {} minutes",
                frequency,
                Schedule::MAX_INTERVAL_MINUTES
            ))
        })?;
        let verbose = cli.verbose || file.verbose.unwrap_or(false);

        let api_url = non_empty(cli.api_url.or(file.api_url))
            .map(|raw| {
                Url::parse(&raw).map_err(|e| {
                    Error::InvalidArguments(format!("api_url '{}' is not a valid URL: {}", raw, e))
                })
            })
            .transpose()?;

        Ok(Self {
            user,
            token,
            org,
            schedule,
            verbose,
            api_url,
        })
    }

    /// Resolves settings, reading the configuration file when a path is given.
    ///
    /// # Errors
    ///
    /// Any error of [`FileConfig::load`] or [`Settings::resolve`].
    pub fn load(cli: CliOverrides, config_path: Option<&Path>) -> Result<Self, Error> {
        let file = match config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
