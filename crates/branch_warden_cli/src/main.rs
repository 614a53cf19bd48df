use std::path::PathBuf;
use std::sync::Arc;

use branch_warden_cli::config::{CliOverrides, Settings};
use branch_warden_cli::errors::Error;
use branch_warden_cli::{logging, signal};
use branch_warden_core::{Schedule, TracingObserver};
use clap::Parser;
use github_client::{create_basic_auth_client, GitHubClient};
use secrecy::SecretString;
use tracing::{error, info};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Branch Warden: keep the default branches of private repositories protected
#[derive(Parser, Debug)]
#[command(name = "branch-warden", version)]
#[command(
    about = "Protects the default branch of every private repository in a GitHub organization",
    long_about = None
)]
struct Cli {
    /// User to access GitHub as
    #[arg(long, env = "BRANCH_WARDEN_USER")]
    user: Option<String>,

    /// Personal access token to access GitHub with
    #[arg(long, env = "BRANCH_WARDEN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Organization to monitor
    #[arg(long, env = "BRANCH_WARDEN_ORG")]
    org: Option<String>,

    /// Minutes between checks; 0 runs a single check
    #[arg(long, env = "BRANCH_WARDEN_FREQUENCY")]
    frequency: Option<u64>,

    /// Verbose logging
    #[arg(short, long, env = "BRANCH_WARDEN_VERBOSE")]
    verbose: bool,

    /// GitHub API base address, for GitHub Enterprise
    #[arg(long, env = "BRANCH_WARDEN_API_URL")]
    api_url: Option<String>,

    /// Optional TOML configuration file
    #[arg(long, env = "BRANCH_WARDEN_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_parts(self) -> (CliOverrides, Option<PathBuf>) {
        let overrides = CliOverrides {
            user: self.user,
            token: self.token.map(SecretString::from),
            org: self.org,
            frequency: self.frequency,
            verbose: self.verbose,
            api_url: self.api_url,
        };
        (overrides, self.config)
    }
}

async fn run(settings: Settings) -> Result<(), Error> {
    let octocrab =
        create_basic_auth_client(&settings.user, &settings.token, settings.api_url.as_ref())?;
    let client = Arc::new(GitHubClient::new(octocrab));
    let observer = Arc::new(TracingObserver);

    info!(org = %settings.org, schedule = ?settings.schedule, "Starting branch protection checks");

    match settings.schedule {
        Schedule::Once => {
            branch_warden_core::run_check(client, &settings.org, observer).await?;
        }
        Schedule::Every(_) => {
            let shutdown = signal::spawn_shutdown_listener();
            branch_warden_core::run(client, &settings.org, settings.schedule, observer, async {
                let _ = shutdown.await;
            })
            .await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let (overrides, config_path) = Cli::parse().into_parts();

    let settings = match Settings::load(overrides, config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            logging::init(false);
            error!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    logging::init(settings.verbose);

    if let Err(e) = run(settings).await {
        error!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
