//! Run configuration and compiled-in constants.

/// Default public download endpoint, tried after any configured source.
pub const DEFAULT_DOWNLOAD_SOURCE: &str = "http://autoinstall.plesk.com";

/// Path segment between the source base URL and the asset name.
pub const INSTALLER_PATH_SEGMENT: &str = "Parallels_Installer";

/// Where the downloaded autoinstaller binary is cached.
pub const INSTALLER_CACHE_PATH: &str = "/var/cache/parallels_installer/installer";

/// Preference file holding the persisted SOURCE key.
pub const AUTOINSTALLER_RC_PATH: &str = "/root/.autoinstallerrc";

/// When set to a non-empty value, the default download source is skipped and
/// only the configured source is used.
pub const SKIP_DEFAULT_SOURCE_ENV: &str = "SKIP_DEFAULT_INSTALLER_DOWNLOAD_SOURCE";

/// Release tiers installed by the one-click flow unless overridden.
pub const DEFAULT_TIERS: &str = "release,stable";

/// Download source pinned at build time via `PLESK_OVERRIDE_SOURCE`.
/// Empty for stock builds.
pub const OVERRIDE_SOURCE: &str = env!("PLESK_OVERRIDE_SOURCE");

/// Which of the two installer flavors this process was built as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Non-interactive flow always installing the latest release.
    OneClickInstaller,
    /// Flow forwarding arbitrary user arguments to the autoinstaller.
    InteractiveInstaller,
}

impl Mode {
    /// The published program name, also used in the rc file comment.
    pub fn program_name(self) -> &'static str {
        match self {
            Mode::OneClickInstaller => "one-click-installer",
            Mode::InteractiveInstaller => "plesk-installer",
        }
    }
}

/// Immutable per-run configuration, set once from compiled defaults and
/// command-line flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: Mode,
    /// Resolved download source; starts as [`RunConfig::override_source`] and
    /// may be replaced by `--source`.
    pub source: String,
    /// The compiled-in override source the build was produced with.
    pub override_source: String,
    /// Release tiers, one-click mode only.
    pub tiers: String,
    pub verbose: bool,
    pub dry_run: bool,
}

impl RunConfig {
    /// Configuration with compiled defaults for the given mode.
    pub fn new(mode: Mode) -> Self {
        Self::with_override_source(mode, OVERRIDE_SOURCE)
    }

    pub(crate) fn with_override_source(mode: Mode, override_source: &str) -> Self {
        Self {
            mode,
            source: override_source.to_string(),
            override_source: override_source.to_string(),
            tiers: DEFAULT_TIERS.to_string(),
            verbose: false,
            dry_run: false,
        }
    }
}
