//! Download tool discovery.
//!
//! The actual transfer is delegated to whichever of the known download
//! utilities exists on the system; this module only probes for them and
//! builds their command lines.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::error::BootstrapError;
use crate::runtime::Runtime;

/// Known download tools, in probe priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Wget,
    Curl,
    Fetch,
}

const PROBE_ORDER: [Transport; 3] = [Transport::Wget, Transport::Curl, Transport::Fetch];

impl Transport {
    pub fn path(self) -> &'static Path {
        Path::new(match self {
            Transport::Wget => "/usr/bin/wget",
            Transport::Curl => "/usr/bin/curl",
            Transport::Fetch => "/usr/bin/fetch",
        })
    }

    /// First available tool, probed in priority order.
    pub fn probe<R: Runtime>(runtime: &R) -> Result<Self> {
        PROBE_ORDER
            .into_iter()
            .find(|transport| runtime.is_executable(transport.path()))
            .ok_or_else(|| BootstrapError::NoTransport.into())
    }

    /// Command line downloading `url` into `target`.
    pub fn command(self, url: &str, target: &Path) -> (PathBuf, Vec<String>) {
        let target = target.display().to_string();
        let args = match self {
            Transport::Wget => vec![url.to_string(), "-O".to_string(), target],
            // -f turns HTTP errors into a nonzero exit status
            Transport::Curl => vec!["-fv".to_string(), url.to_string(), "-o".to_string(), target],
            Transport::Fetch => vec!["-o".to_string(), target, url.to_string()],
        };
        (self.path().to_path_buf(), args)
    }
}
