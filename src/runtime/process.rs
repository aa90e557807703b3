//! Child process execution, `uname` probing, and process replacement.

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::process::Command;

use super::{CommandOutput, RealRuntime};

/// Locations probed for `uname`, in order. If neither is executable the name
/// is left to PATH resolution.
const UNAME_PATHS: [&str; 2] = ["/bin/uname", "/usr/bin/uname"];

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_command_impl(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {}", program.display()))?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exec_replace_impl(&self, program: &Path, args: &[String]) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // exec only returns on failure
            let err = Command::new(program).args(args).exec();
            Err(anyhow!(err).context(format!("Failed to execute {}", program.display())))
        }
        #[cfg(not(unix))]
        {
            // No true process replacement: wait for the child and propagate
            // its exit code as our own.
            let status = Command::new(program)
                .args(args)
                .status()
                .with_context(|| format!("Failed to execute {}", program.display()))?;
            std::process::exit(status.code().unwrap_or(1));
        }
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn uname_impl(&self, flag: &str) -> Result<String> {
        let uname = UNAME_PATHS
            .iter()
            .map(Path::new)
            .find(|path| self.is_executable_impl(path))
            .unwrap_or_else(|| Path::new("uname"));

        let output = self.run_command_impl(uname, &[flag.to_string()])?;
        if !output.success {
            return Err(anyhow!("uname {} failed: {}", flag, output.combined()));
        }
        Ok(output.stdout.trim().to_string())
    }
}
