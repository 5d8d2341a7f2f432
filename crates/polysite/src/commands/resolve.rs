//! `polysite resolve` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use polysite_site::assemble;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the generator config here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Check navigation links against source pages (default: from config).
    #[arg(long)]
    check_links: Option<bool>,

    /// Skip the navigation link check.
    #[arg(long, conflicts_with = "check_links")]
    no_check_links: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, resolution or the link check fails,
    /// or if the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load(self.resolve_check_links())?;
        let site = assemble(&config)?;
        let json = site.to_generator_json()?;

        if let Some(path) = &self.output {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, format!("{json}\n"))?;
            output.success(&format!(
                "Resolved {} locale(s) into {}",
                site.locales().len(),
                path.display()
            ));
        } else {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
            stdout.flush()?;
        }

        Ok(())
    }

    /// Resolve `check_links` from --check-links/--no-check-links flags.
    fn resolve_check_links(&self) -> Option<bool> {
        self.no_check_links.then_some(false).or(self.check_links)
    }
}
