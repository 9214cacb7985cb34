//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use startdash_core::config::DashConfig;

#[derive(Debug, Parser)]
#[command(name = "startdash")]
#[command(about = "Password-gated home screen for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the credential, settings and logs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Keep the password in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,
}

impl Cli {
    /// Load the configuration and apply command-line overrides
    pub fn load_config(&self) -> DashConfig {
        let mut config = match &self.config {
            Some(path) => DashConfig::load_from(path),
            None => DashConfig::load(),
        };

        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        config
    }
}
