//! Launch planning.
//!
//! Maps the run configuration onto the final argument vector for the fetched
//! autoinstaller, persists the source preference, and hands execution over by
//! replacing the current process. In dry-run mode the asset is removed
//! instead and nothing is executed or persisted.

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::config::{Mode, RunConfig};
use crate::rcfile;
use crate::runtime::Runtime;

/// How the bootstrap finished when it did not hand off execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Process replacement succeeded (observable only in tests, where the
    /// mocked exec returns).
    Launched,
    /// Dry run finished; the fetched asset was removed.
    DryRunComplete,
    /// The upgrade guard stopped a one-click run.
    AlreadyInstalled,
}

/// Final argument vector for the autoinstaller.
pub fn installer_args(config: &RunConfig, original_args: &[String]) -> Vec<String> {
    match config.mode {
        Mode::OneClickInstaller => {
            let mut args: Vec<String> = [
                "--select-product-id",
                "plesk",
                "--select-release-latest",
                "--tier",
                &config.tiers,
                "--installation-type",
                "Typical",
            ]
            .iter()
            .map(|arg| arg.to_string())
            .collect();
            if !config.source.is_empty() {
                args.push("--source".to_string());
                args.push(config.source.clone());
            }
            args
        }
        Mode::InteractiveInstaller => {
            let mut args = original_args.to_vec();
            // Enforce the compiled-in source only when the operator did not
            // override it on the command line.
            if !config.override_source.is_empty() && config.override_source == config.source {
                args.push("--source".to_string());
                args.push(config.source.clone());
            }
            args
        }
    }
}

/// Persist the source preference and execute the installer, or clean up after
/// a dry run.
pub fn launch<R: Runtime>(
    runtime: &R,
    config: &RunConfig,
    installer: &Path,
    original_args: &[String],
) -> Result<Outcome> {
    if !config.dry_run {
        rcfile::persist_source(runtime, config)?;
    }

    let args = installer_args(config, original_args);
    info!(
        "The following command will run: {} {}",
        installer.display(),
        args.join(" ")
    );

    if config.dry_run {
        runtime.remove_file(installer)?;
        return Ok(Outcome::DryRunComplete);
    }

    runtime.exec_replace(installer, &args)?;
    Ok(Outcome::Launched)
}
