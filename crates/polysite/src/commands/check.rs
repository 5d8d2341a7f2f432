//! `polysite check` command implementation.

use clap::Args;
use polysite_locale::{Inherited, StringKey};
use polysite_site::assemble;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Link checking is always on here, regardless of `site.check_links`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, resolution or the link check fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load(Some(true))?;
        let site = assemble(&config)?;

        for (key, locale) in site.locales() {
            let label = format!("{key} ({})", locale.route_path());
            if key == site.default_locale() {
                output.info(&format!("{label}: default locale"));
                continue;
            }
            match site.inherited().get(key) {
                Some(inherited) if !inherited.is_empty() => {
                    output.warning(&format!("{label}: {}", summarize(inherited)));
                    if !inherited.strings.is_empty() {
                        let keys: Vec<_> =
                            inherited.strings.iter().map(|k| k.as_str()).collect();
                        output.detail(&keys.join(", "));
                    }
                }
                _ => output.success(&format!("{label}: complete")),
            }
        }

        output.success(&format!(
            "{} locale(s) OK, default {}",
            site.locales().len(),
            site.default_locale()
        ));
        Ok(())
    }
}

/// One-line description of what a locale falls back on.
fn summarize(inherited: &Inherited) -> String {
    let mut parts: Vec<String> = inherited
        .fields
        .iter()
        .map(|field| format!("{field} from default"))
        .collect();
    if !inherited.strings.is_empty() {
        parts.push(format!(
            "{} of {} strings from default",
            inherited.strings.len(),
            StringKey::ALL.len()
        ));
    }
    parts.join(", ")
}
