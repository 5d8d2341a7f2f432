//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;

use std::path::PathBuf;

use clap::Args;
use polysite_config::{CliSettings, Config};

use crate::error::CliError;

/// Flags shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover polysite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locale every other locale falls back to (overrides config).
    #[arg(long, env = "POLYSITE_DEFAULT_LOCALE")]
    default_locale: Option<String>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output (show fallback and scan logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with these flags applied on top.
    fn load(&self, check_links: Option<bool>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            default_locale: self.default_locale.clone(),
            source_dir: self.source_dir.clone(),
            check_links,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
