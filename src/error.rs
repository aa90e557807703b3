//! Fatal error kinds of the bootstrap flow.
//!
//! Every variant terminates the program with exit code 1; the binaries print
//! the message prefixed with `ERROR:` on stderr.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The bootstrapper must run with superuser privileges.
    #[error("You should have superuser privileges to install Plesk")]
    Privilege,

    /// The OS, version, or architecture could not be recognized. The message
    /// names the undetected combination where it is known.
    #[error("{0}")]
    UnsupportedPlatform(String),

    /// None of the known download tools is present on the system.
    #[error("Unable to find download manager(fetch, wget, curl)")]
    NoTransport,

    /// The default source is disabled and no source was configured.
    #[error("No source specified to download the Plesk Installer from")]
    NoSourceConfigured,

    /// Every candidate source was exhausted without a successful download.
    /// `endpoint` is the connection target to name in the diagnostic; a field
    /// called `source` would be picked up as the error's cause chain.
    #[error(
        "Unable to run Plesk Installer. Possible reasons:\n\
         1) You are trying to run Plesk Installer on an unsupported OS. \
         Your OS is {os_name}-{os_version}. The list of supported OS is at \
         http://docs.plesk.com/release-notes/current/software-requirements/\n\
         2) Temporary network problem. Check your connection to {endpoint}, \
         contact your provider or open a support ticket."
    )]
    FetchFailed {
        os_name: String,
        os_version: String,
        endpoint: String,
    },
}
