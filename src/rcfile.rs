//! Persisted source preference.
//!
//! A resolved download source is written once into the autoinstaller rc file
//! so future runs keep using it. The write is first-writer-wins: once any
//! `SOURCE` key is present the file is never touched again.

use anyhow::Result;
use std::path::Path;

use crate::config::{AUTOINSTALLER_RC_PATH, RunConfig};
use crate::runtime::Runtime;

/// Record the resolved source in the rc file, unless one is already locked.
pub fn persist_source<R: Runtime>(runtime: &R, config: &RunConfig) -> Result<()> {
    if config.source.is_empty() {
        return Ok(());
    }

    let rc_path = Path::new(AUTOINSTALLER_RC_PATH);
    if runtime.exists(rc_path) {
        let contents = runtime.read_to_string(rc_path)?;
        if contents.lines().any(has_source_key) {
            return Ok(());
        }
    }

    let entry = format!(
        "# SOURCE value is locked by {} script\nSOURCE = {}\n",
        config.mode.program_name(),
        config.source
    );
    runtime.append(rc_path, entry.as_bytes())?;
    // Owner-only access
    runtime.set_permissions(rc_path, 0o600)?;
    Ok(())
}

/// Whether a line assigns the `SOURCE` key (`^\s*SOURCE\s*=`).
fn has_source_key(line: &str) -> bool {
    line.trim_start()
        .strip_prefix("SOURCE")
        .map(|rest| rest.trim_start().starts_with('='))
        .unwrap_or(false)
}
