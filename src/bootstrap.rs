//! Sequential bootstrap orchestration.
//!
//! fingerprint -> upgrade guard -> fetch -> persist -> exec, strictly in that
//! order, single-threaded. The only early exit that is not an error is the
//! "already installed" stop of the one-click flow.

use anyhow::Result;
use std::path::Path;

use crate::config::{INSTALLER_CACHE_PATH, Mode, RunConfig};
use crate::error::BootstrapError;
use crate::launch::{self, Outcome};
use crate::runtime::Runtime;
use crate::upgrade::{self, GuardDecision};
use crate::{cli, fetch, platform};

/// Run the whole bootstrap flow. On success this normally does not return at
/// all: the process image is replaced by the downloaded installer.
pub fn run<R: Runtime>(
    runtime: &R,
    config: &RunConfig,
    original_args: &[String],
) -> Result<Outcome> {
    if !runtime.is_privileged() {
        return Err(BootstrapError::Privilege.into());
    }

    let fingerprint = platform::detect(runtime)?;

    if upgrade::check_for_upgrade(runtime, config.mode)? == GuardDecision::AlreadyInstalled {
        return Ok(Outcome::AlreadyInstalled);
    }

    let installer = Path::new(INSTALLER_CACHE_PATH);
    fetch::fetch_installer(runtime, config, &fingerprint, installer)?;

    launch::launch(runtime, config, installer, original_args)
}

/// Shared entry point of the two installer binaries. Parses flags, sets up
/// logging, runs the flow, and turns fatal errors into an `ERROR:` line on
/// stderr with exit code 1.
pub fn main_entry(mode: Mode) {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = cli::parse_config(mode, &args);

    let default_level = if config.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(&crate::runtime::RealRuntime, &config, &args) {
        eprintln!("ERROR: {:#}", err);
        std::process::exit(1);
    }
}
