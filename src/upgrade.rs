//! Upgrade guard.
//!
//! A pre-existing Plesk installation must not be overwritten by the one-click
//! flow; the interactive autoinstaller handles upgrades itself.

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::config::Mode;
use crate::platform::release_file::{first_line, first_token};
use crate::runtime::Runtime;

/// Installation prefixes scanned for version markers, in order.
const INSTALL_PREFIXES: [&str; 2] = ["/opt/psa", "/usr/local/psa"];

/// Marker files checked under each prefix; the first hit wins.
const VERSION_FILES: [&str; 2] = ["version", "core.version"];

/// Version of an existing installation, if any. The version is the first
/// whitespace token of the marker's first line; a blank marker counts as no
/// installation.
pub fn installed_version<R: Runtime>(runtime: &R) -> Result<Option<String>> {
    for prefix in INSTALL_PREFIXES {
        for file in VERSION_FILES {
            let marker = Path::new(prefix).join(file);
            if runtime.exists(&marker) {
                let contents = runtime.read_to_string(&marker)?;
                let version = first_token(first_line(&contents));
                return Ok((!version.is_empty()).then(|| version.to_string()));
            }
        }
    }
    Ok(None)
}

/// Outcome of the guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// An installation exists and one-click mode must stop. Deliberately a
    /// successful exit, not an error, so automated one-click flows do not
    /// treat "already installed" as a failure.
    AlreadyInstalled,
}

/// Decide whether the bootstrap may continue past an existing installation.
pub fn check_for_upgrade<R: Runtime>(runtime: &R, mode: Mode) -> Result<GuardDecision> {
    let Some(version) = installed_version(runtime)? else {
        return Ok(GuardDecision::Proceed);
    };

    info!("You have Plesk v {} installed.", version);
    if mode == Mode::OneClickInstaller {
        eprintln!("You can't use one-click-installer since you already have Plesk installed.");
        eprintln!(
            "You should use interactive installer mode instead, to use it run 'plesk installer' in shell console."
        );
        eprintln!(
            "Note: to run Plesk installer using Web UI (https://<you_host>:8447) you should use --web-interface option, in other cases it will work via shell console."
        );
        return Ok(GuardDecision::AlreadyInstalled);
    }
    Ok(GuardDecision::Proceed)
}
