use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigSources;

/// Runs a create → get → comment → status demo against the ticket integration API.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the integration endpoint
    #[arg(long, env = "INTEGRATION_URL")]
    pub url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "INTEGRATION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// YAML file with `base_url` and `token`, used for anything not set above
    #[arg(short, long, env = "INTEGRATION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only call the health endpoint
    #[arg(long)]
    pub health: bool,
}

impl Cli {
    pub fn sources(&self) -> ConfigSources {
        ConfigSources {
            url: self.url.clone(),
            token: self.token.clone(),
            config_file: self.config.clone(),
        }
    }
}
