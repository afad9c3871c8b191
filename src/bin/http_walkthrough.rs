//! HTTP Walkthrough binary entry point.
//!
//! Runs the walkthrough steps in order and prints their output to stdout.
//! Logging goes to stderr; set `RUST_LOG` or pass `-v` to see requests as
//! they are sent.

use anyhow::Context;
use clap::Parser;
use http_walkthrough::auth::PromptCredentials;
use http_walkthrough::config::{load_config, load_config_str, WalkthroughConfig};
use http_walkthrough::executor::{ExecutionConfig, ReqwestConnector};
use http_walkthrough::walkthrough::{Step, Walkthrough};
use std::io::Write;

#[derive(Debug, Parser)]
#[command(name = "http-walkthrough", version, about)]
struct Cli {
    /// Username for the authenticated session.
    #[arg(short, long, env = "WALKTHROUGH_USERNAME")]
    username: Option<String>,

    /// Root of the REST API. The invalid URL and user endpoint move with it.
    #[arg(long, env = "WALKTHROUGH_API_ROOT")]
    api_root: Option<String>,

    /// URL expected to answer 404 in the status check.
    #[arg(long, env = "WALKTHROUGH_INVALID_URL")]
    invalid_url: Option<String>,

    /// Credential-gated endpoint for the authenticated session.
    #[arg(long, env = "WALKTHROUGH_USER_ENDPOINT")]
    user_endpoint: Option<String>,

    /// Endpoint that echoes form submissions.
    #[arg(long, env = "WALKTHROUGH_ECHO_URL")]
    echo_url: Option<String>,

    /// JSON settings object with an "http-walkthrough" section.
    #[arg(long, env = "WALKTHROUGH_SETTINGS")]
    settings: Option<String>,

    /// Run only these steps (repeatable).
    #[arg(long = "only", value_name = "STEP")]
    only: Vec<Step>,

    /// List the steps and exit.
    #[arg(long)]
    list_steps: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> anyhow::Result<WalkthroughConfig> {
        let mut config = match &self.settings {
            Some(settings) => load_config_str(settings)?,
            None => load_config(None)?,
        };

        if let Some(username) = &self.username {
            config.username = username.clone();
        }
        if let Some(api_root) = &self.api_root {
            config.rebase(api_root);
        }
        if let Some(invalid_url) = &self.invalid_url {
            config.invalid_url = invalid_url.clone();
        }
        if let Some(user_endpoint) = &self.user_endpoint {
            config.user_endpoint = user_endpoint.clone();
        }
        if let Some(echo_url) = &self.echo_url {
            config.echo_url = echo_url.clone();
        }

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_steps {
        for step in Step::ALL {
            println!("{:<24}{}", step.name(), step.title());
        }
        return Ok(());
    }

    let config = cli.config()?;
    log::info!("api root: {}, echo endpoint: {}", config.api_root, config.echo_url);

    let connector = ReqwestConnector::new(ExecutionConfig::from(&config));
    let mut walkthrough = Walkthrough::new(config, connector, PromptCredentials::default());
    if !cli.only.is_empty() {
        walkthrough = walkthrough.with_steps(&cli.only);
    }

    let mut stdout = std::io::stdout().lock();
    walkthrough
        .run(&mut stdout)
        .context("walkthrough stopped")?;

    writeln!(stdout, "Thank you for reading!")?;
    Ok(())
}
