//! Source resolution and asset fetching.
//!
//! Builds the ordered list of candidate download sources, tries each in turn
//! through the available download tool, and leaves an executable installer at
//! the cache path. All sources failing is fatal; there is no retry beyond the
//! ordered fallback.

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::config::{
    DEFAULT_DOWNLOAD_SOURCE, INSTALLER_PATH_SEGMENT, RunConfig, SKIP_DEFAULT_SOURCE_ENV,
};
use crate::error::BootstrapError;
use crate::platform::Fingerprint;
use crate::runtime::Runtime;
use crate::transport::Transport;

/// Ordered candidate sources for this run. First success wins.
pub fn resolve_sources<R: Runtime>(runtime: &R, config: &RunConfig) -> Result<Vec<String>> {
    let skip_default = matches!(
        runtime.env_var(SKIP_DEFAULT_SOURCE_ENV), Ok(value) if !value.is_empty()
    );

    if skip_default {
        if config.source.is_empty() {
            return Err(BootstrapError::NoSourceConfigured.into());
        }
        return Ok(vec![config.source.clone()]);
    }

    let mut sources = Vec::new();
    if !config.source.is_empty() {
        sources.push(config.source.clone());
    }
    sources.push(DEFAULT_DOWNLOAD_SOURCE.to_string());
    Ok(sources)
}

/// Download the autoinstaller matching `fingerprint` into `dest` and make it
/// executable, trying each candidate source in order.
pub fn fetch_installer<R: Runtime>(
    runtime: &R,
    config: &RunConfig,
    fingerprint: &Fingerprint,
    dest: &Path,
) -> Result<()> {
    let sources = resolve_sources(runtime, config)?;
    let transport = Transport::probe(runtime)?;

    if let Some(cache_dir) = dest.parent() {
        if !runtime.is_dir(cache_dir) {
            runtime.create_dir_all(cache_dir)?;
            runtime.set_permissions(cache_dir, 0o700)?;
        }
    }

    // A stale installer from an earlier run must never be executed
    if runtime.exists(dest) {
        runtime.remove_file(dest)?;
    }

    let asset_name = fingerprint.asset_name();
    let mut outputs: Vec<String> = Vec::new();
    let mut fetched = false;

    for source in &sources {
        let url = format!("{}/{}/{}", source, INSTALLER_PATH_SEGMENT, asset_name);
        let (program, args) = transport.command(&url, dest);
        info!("Transport command is {} {}", program.display(), args.join(" "));

        // A tool that fails to spawn counts as a failed attempt, same as a
        // nonzero exit status.
        match runtime.run_command(&program, &args) {
            Ok(output) => {
                let combined = output.combined();
                if !combined.is_empty() {
                    outputs.push(combined);
                }
                if output.success {
                    fetched = true;
                    break;
                }
            }
            Err(err) => outputs.push(format!("{:#}", err)),
        }
    }

    if !fetched {
        for output in &outputs {
            eprintln!("{}", output);
        }
        if runtime.exists(dest) {
            runtime.remove_file(dest)?;
        }
        return Err(BootstrapError::FetchFailed {
            os_name: fingerprint.os_name.clone(),
            os_version: fingerprint.os_version.clone(),
            endpoint: if config.override_source.is_empty() {
                "autoinstall.plesk.com".to_string()
            } else {
                config.override_source.clone()
            },
        }
        .into());
    }

    for output in &outputs {
        info!("{}", output);
    }
    runtime.set_permissions(dest, 0o700)?;
    Ok(())
}
