//! Platform fingerprinting.
//!
//! Inspects the running system and produces a normalized
//! `(os_name, os_version, arch)` triple, used to pick the matching
//! autoinstaller asset. Only Linux-family kernels are supported; everything
//! else fails with an unsupported-platform error.

pub mod release_file;

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::error::BootstrapError;
use crate::runtime::Runtime;
use release_file::{
    LsbRelease, first_line, first_token, leading_integer, major_component, numeric_prefix,
};

const DEBIAN_VERSION: &str = "/etc/debian_version";
const LSB_RELEASE: &str = "/etc/lsb-release";
const SUSE_RELEASE: &str = "/etc/SuSE-release";
const FEDORA_RELEASE: &str = "/etc/fedora-release";
const REDHAT_RELEASE: &str = "/etc/redhat-release";

/// Normalized identity of the target platform. Immutable once detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub os_name: String,
    pub os_version: String,
    pub arch: String,
}

impl Fingerprint {
    /// Name of the autoinstaller asset matching this platform.
    pub fn asset_name(&self) -> String {
        format!(
            "parallels_installer_{}_{}_{}",
            self.os_name, self.os_version, self.arch
        )
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.os_name, self.os_version, self.arch)
    }
}

/// Detect the current platform or fail with an unsupported-platform error.
pub fn detect<R: Runtime>(runtime: &R) -> Result<Fingerprint> {
    let arch = normalize_arch(runtime.uname_machine()?.trim().to_string());

    let kernel = runtime.uname_kernel()?.trim().to_string();
    if kernel != "Linux" {
        return Err(unsupported("Unable to detect OS"));
    }

    let (mut os_name, mut os_version) = if runtime.exists(Path::new(DEBIAN_VERSION)) {
        detect_debian_family(runtime, &arch)?
    } else if runtime.exists(Path::new(SUSE_RELEASE)) {
        detect_suse(runtime)?
    } else if runtime.exists(Path::new(FEDORA_RELEASE)) {
        detect_fedora(runtime)?
    } else if runtime.exists(Path::new(REDHAT_RELEASE)) {
        detect_redhat_family(runtime, &arch)?
    } else {
        return Err(unsupported("Unable to detect OS"));
    };

    // RedHat 7 assets ship under the CentOS 7 name, Virtuozzo 7 under VZLinux.
    if os_name == "RedHat" && os_version == "el7" {
        os_name = "CentOS".to_string();
        os_version = "7".to_string();
    }
    if os_name == "Virtuozzo" && os_version == "7" {
        os_name = "VZLinux".to_string();
        os_version = "7".to_string();
    }

    if os_name.is_empty() {
        return Err(unsupported("Unable to detect OS"));
    }
    if os_version.is_empty() {
        return Err(unsupported(&format!(
            "Unable to detect {} OS version",
            os_name
        )));
    }
    if arch.is_empty() {
        return Err(unsupported("Unable to detect system architecture"));
    }

    let fingerprint = Fingerprint {
        os_name,
        os_version,
        arch,
    };
    info!("Detected os {}", fingerprint);
    Ok(fingerprint)
}

/// `i386`, `i486`, `i586`, and `i686` all map to the single `i386` asset
/// flavor; any other machine value passes through unchanged.
fn normalize_arch(arch: String) -> String {
    let bytes = arch.as_bytes();
    if bytes.len() == 4 && bytes[0] == b'i' && bytes[1].is_ascii_digit() && &arch[2..] == "86" {
        "i386".to_string()
    } else {
        arch
    }
}

fn unsupported(message: &str) -> anyhow::Error {
    BootstrapError::UnsupportedPlatform(message.to_string()).into()
}

fn detect_debian_family<R: Runtime>(runtime: &R, arch: &str) -> Result<(String, String)> {
    let (name, version) = if runtime.exists(Path::new(LSB_RELEASE)) {
        // Mostly Ubuntu, but Debian can have it
        let parsed = LsbRelease::parse(&runtime.read_to_string(Path::new(LSB_RELEASE))?);
        (
            parsed.distrib_id.unwrap_or_default(),
            parsed.distrib_release.unwrap_or_default(),
        )
    } else {
        let contents = runtime.read_to_string(Path::new(DEBIAN_VERSION))?;
        ("Debian".to_string(), first_line(&contents).to_string())
    };

    match name.as_str() {
        "Debian" => {
            // Debian assets are published per major with a ".0" suffix. An
            // unversioned marker (e.g. "jessie/sid") leaves the version empty
            // and fails validation.
            let major = leading_integer(&version);
            let version = if major.is_empty() {
                String::new()
            } else {
                format!("{}.0", major)
            };
            Ok((name, version))
        }
        "Ubuntu" => Ok((name, version)),
        _ => Err(unsupported(&format!(
            "Unknown OS: {}-{}-{}",
            name, version, arch
        ))),
    }
}

fn detect_suse<R: Runtime>(runtime: &R) -> Result<(String, String)> {
    let contents = runtime.read_to_string(Path::new(SUSE_RELEASE))?;
    let mut version = numeric_prefix(first_line(&contents));
    if contents.contains("Enterprise Server") {
        version = format!("es{}", version);
    }
    Ok(("SuSE".to_string(), version))
}

fn detect_fedora<R: Runtime>(runtime: &R) -> Result<(String, String)> {
    let contents = runtime.read_to_string(Path::new(FEDORA_RELEASE))?;
    Ok((
        "FedoraCore".to_string(),
        numeric_prefix(first_line(&contents)),
    ))
}

fn detect_redhat_family<R: Runtime>(runtime: &R, arch: &str) -> Result<(String, String)> {
    let contents = runtime.read_to_string(Path::new(REDHAT_RELEASE))?;
    let line = first_line(&contents);
    let name = first_token(line).to_string();
    // Red Hat family assets are keyed by major version only
    let major = major_component(&numeric_prefix(line)).to_string();

    if name == "CentOS" && major == "4" {
        // Historical CentOS 4 assets were published under minor versions that
        // differ per architecture.
        match arch {
            "i386" => return Ok((name, "4.2".to_string())),
            "x86_64" => return Ok((name, "4.3".to_string())),
            _ => {}
        }
    }

    if name.starts_with("CentOS") || name.starts_with("Cloud") || name.starts_with("Virtuozzo") {
        Ok((name, major))
    } else if name.starts_with("Red") {
        Ok(("RedHat".to_string(), format!("el{}", major)))
    } else {
        Err(unsupported(&format!(
            "Unknown OS: {}-{}-{}",
            name, major, arch
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Mock runtime reporting the given kernel/machine and marker files.
    fn system_with(kernel: &str, machine: &str, files: &[(&str, &str)]) -> MockRuntime {
        let contents: HashMap<PathBuf, String> = files
            .iter()
            .map(|(path, body)| (PathBuf::from(path), body.to_string()))
            .collect();
        let present: Vec<PathBuf> = contents.keys().cloned().collect();

        let mut runtime = MockRuntime::new();
        let kernel = kernel.to_string();
        let machine = machine.to_string();
        runtime
            .expect_uname_kernel()
            .returning(move || Ok(kernel.clone()));
        runtime
            .expect_uname_machine()
            .returning(move || Ok(machine.clone()));
        runtime
            .expect_exists()
            .returning(move |path| present.iter().any(|p| p == path));
        runtime.expect_read_to_string().returning(move |path| {
            contents
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("unexpected read of {}", path.display()))
        });
        runtime
    }

    fn detect_with(kernel: &str, machine: &str, files: &[(&str, &str)]) -> Result<Fingerprint> {
        detect(&system_with(kernel, machine, files))
    }

    fn assert_fingerprint(result: Result<Fingerprint>, name: &str, version: &str, arch: &str) {
        let fingerprint = result.unwrap();
        assert_eq!(fingerprint.os_name, name);
        assert_eq!(fingerprint.os_version, version);
        assert_eq!(fingerprint.arch, arch);
    }

    #[test]
    fn test_arch_normalization() {
        for machine in ["i386", "i486", "i586", "i686"] {
            assert_eq!(normalize_arch(machine.to_string()), "i386");
        }
        // Only i<digit>86 normalizes; everything else passes through
        for machine in ["x86_64", "aarch64", "ix86", "i86", "armv7l"] {
            assert_eq!(normalize_arch(machine.to_string()), machine);
        }
    }

    #[test]
    fn test_non_linux_kernel_rejected() {
        let err = detect_with("FreeBSD", "amd64", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Unable to detect OS");
    }

    #[test]
    fn test_no_marker_files_rejected() {
        let err = detect_with("Linux", "x86_64", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Unable to detect OS");
    }

    #[test]
    fn test_ubuntu_from_lsb_release() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[
                ("/etc/debian_version", "jessie/sid\n"),
                (
                    "/etc/lsb-release",
                    "DISTRIB_ID=Ubuntu\nDISTRIB_RELEASE=14.04\nDISTRIB_CODENAME=trusty\n",
                ),
            ],
        );
        // Ubuntu versions are kept exactly as reported
        assert_fingerprint(result, "Ubuntu", "14.04", "x86_64");
    }

    #[test]
    fn test_debian_with_lsb_release() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[
                ("/etc/debian_version", "8.11\n"),
                (
                    "/etc/lsb-release",
                    "DISTRIB_ID=Debian\nDISTRIB_RELEASE=8.11\n",
                ),
            ],
        );
        assert_fingerprint(result, "Debian", "8.0", "x86_64");
    }

    #[test]
    fn test_debian_without_lsb_release() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[("/etc/debian_version", "11.7\n")],
        );
        assert_fingerprint(result, "Debian", "11.0", "x86_64");
    }

    #[test]
    fn test_debian_unversioned_marker_rejected() {
        let err = detect_with(
            "Linux",
            "x86_64",
            &[("/etc/debian_version", "bookworm/sid\n")],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unable to detect Debian OS version");
    }

    #[test]
    fn test_unknown_debian_derivative_rejected() {
        let err = detect_with(
            "Linux",
            "x86_64",
            &[
                ("/etc/debian_version", "1.0\n"),
                ("/etc/lsb-release", "DISTRIB_ID=Mint\nDISTRIB_RELEASE=17\n"),
            ],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown OS: Mint-17-x86_64");
    }

    #[test]
    fn test_opensuse() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[("/etc/SuSE-release", "openSUSE 13.1 (x86_64)\nVERSION = 13.1\n")],
        );
        assert_fingerprint(result, "SuSE", "13.1", "x86_64");
    }

    #[test]
    fn test_suse_enterprise_server() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[(
                "/etc/SuSE-release",
                "SUSE Linux Enterprise Server 11 (x86_64)\nVERSION = 11\nPATCHLEVEL = 3\n",
            )],
        );
        assert_fingerprint(result, "SuSE", "es11", "x86_64");
    }

    #[test]
    fn test_fedora() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[("/etc/fedora-release", "Fedora release 20 (Heisenbug)\n")],
        );
        assert_fingerprint(result, "FedoraCore", "20", "x86_64");
    }

    #[test]
    fn test_centos_major_only() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[("/etc/redhat-release", "CentOS release 6.5 (Final)\n")],
        );
        assert_fingerprint(result, "CentOS", "6", "x86_64");
    }

    #[test]
    fn test_centos4_per_arch_overrides() {
        let files = [("/etc/redhat-release", "CentOS release 4.8 (Final)\n")];
        assert_fingerprint(detect_with("Linux", "i686", &files), "CentOS", "4.2", "i386");
        assert_fingerprint(
            detect_with("Linux", "x86_64", &files),
            "CentOS",
            "4.3",
            "x86_64",
        );
        // Other architectures keep the plain major
        assert_fingerprint(detect_with("Linux", "ia64", &files), "CentOS", "4", "ia64");
    }

    #[test]
    fn test_redhat_versions_use_el_prefix() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[(
                "/etc/redhat-release",
                "Red Hat Enterprise Linux Server release 6.4 (Santiago)\n",
            )],
        );
        assert_fingerprint(result, "RedHat", "el6", "x86_64");
    }

    #[test]
    fn test_redhat_el7_aliased_to_centos() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[(
                "/etc/redhat-release",
                "Red Hat Enterprise Linux Server release 7.2 (Maipo)\n",
            )],
        );
        assert_fingerprint(result, "CentOS", "7", "x86_64");
    }

    #[test]
    fn test_virtuozzo7_aliased_to_vzlinux() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[("/etc/redhat-release", "Virtuozzo Linux release 7.5\n")],
        );
        assert_fingerprint(result, "VZLinux", "7", "x86_64");
    }

    #[test]
    fn test_cloudlinux_major_only() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[(
                "/etc/redhat-release",
                "CloudLinux Server release 6.8 (Oleg Makarov)\n",
            )],
        );
        assert_fingerprint(result, "CloudLinux", "6", "x86_64");
    }

    #[test]
    fn test_unknown_redhat_derivative_rejected() {
        let err = detect_with(
            "Linux",
            "x86_64",
            &[("/etc/redhat-release", "Scientific Linux release 6.4\n")],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown OS: Scientific-6-x86_64");
    }

    #[test]
    fn test_debian_marker_takes_priority_over_redhat() {
        let result = detect_with(
            "Linux",
            "x86_64",
            &[
                ("/etc/debian_version", "9.4\n"),
                ("/etc/redhat-release", "CentOS release 6.5 (Final)\n"),
            ],
        );
        assert_fingerprint(result, "Debian", "9.0", "x86_64");
    }

    #[test]
    fn test_asset_name() {
        let fingerprint = Fingerprint {
            os_name: "CentOS".to_string(),
            os_version: "6".to_string(),
            arch: "x86_64".to_string(),
        };
        assert_eq!(
            fingerprint.asset_name(),
            "parallels_installer_CentOS_6_x86_64"
        );
        assert_eq!(fingerprint.to_string(), "CentOS-6-x86_64");
    }
}
