//! Strict parsing helpers for distribution release files.
//!
//! Release files are treated as plain key-value data: only the needed fields
//! are extracted, and untrusted file content is never executed.

/// Fields of `/etc/lsb-release` consumed by the fingerprinter.
#[derive(Debug, Default, PartialEq)]
pub struct LsbRelease {
    pub distrib_id: Option<String>,
    pub distrib_release: Option<String>,
}

impl LsbRelease {
    /// Parse `KEY=VALUE` lines, keeping only `DISTRIB_ID` and
    /// `DISTRIB_RELEASE`. Surrounding quotes are stripped from values.
    pub fn parse(contents: &str) -> Self {
        let mut parsed = Self::default();
        for line in contents.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value.trim()).to_string();
            match key.trim() {
                "DISTRIB_ID" => parsed.distrib_id = Some(value),
                "DISTRIB_RELEASE" => parsed.distrib_release = Some(value),
                _ => {}
            }
        }
        parsed
    }
}

fn unquote(value: &str) -> &str {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    stripped.unwrap_or(value)
}

/// First line of a file's contents, without the newline.
pub fn first_line(contents: &str) -> &str {
    contents.lines().next().unwrap_or("")
}

/// First whitespace-separated token of a line (empty for blank lines).
pub fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

/// First run of digits and dots in a line, skipping any non-numeric prefix.
/// `"CentOS release 6.5 (Final)"` yields `"6.5"`.
pub fn numeric_prefix(line: &str) -> String {
    let is_numeric = |c: char| c.is_ascii_digit() || c == '.';
    match line.find(is_numeric) {
        Some(start) => line[start..].chars().take_while(|&c| is_numeric(c)).collect(),
        None => String::new(),
    }
}

/// Leading run of digits of a string. `"11.3"` yields `"11"`, `"sid"` yields
/// the empty string.
pub fn leading_integer(value: &str) -> String {
    value.chars().take_while(char::is_ascii_digit).collect()
}

/// Portion of a dotted version before the first dot.
pub fn major_component(version: &str) -> &str {
    version.split('.').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lsb_release_ubuntu() {
        let contents = "DISTRIB_ID=Ubuntu\n\
                        DISTRIB_RELEASE=14.04\n\
                        DISTRIB_CODENAME=trusty\n\
                        DISTRIB_DESCRIPTION=\"Ubuntu 14.04.6 LTS\"\n";
        let parsed = LsbRelease::parse(contents);
        assert_eq!(parsed.distrib_id.as_deref(), Some("Ubuntu"));
        assert_eq!(parsed.distrib_release.as_deref(), Some("14.04"));
    }

    #[test]
    fn test_parse_lsb_release_quoted_values() {
        let contents = "DISTRIB_ID=\"Ubuntu\"\nDISTRIB_RELEASE='18.04'\n";
        let parsed = LsbRelease::parse(contents);
        assert_eq!(parsed.distrib_id.as_deref(), Some("Ubuntu"));
        assert_eq!(parsed.distrib_release.as_deref(), Some("18.04"));
    }

    #[test]
    fn test_parse_lsb_release_missing_fields() {
        let parsed = LsbRelease::parse("DISTRIB_CODENAME=bionic\nnot a key value line\n");
        assert_eq!(parsed, LsbRelease::default());
    }

    #[test]
    fn test_parse_lsb_release_never_executes_content() {
        // Command substitution syntax must come through as literal text.
        let parsed = LsbRelease::parse("DISTRIB_ID=$(reboot)\n");
        assert_eq!(parsed.distrib_id.as_deref(), Some("$(reboot)"));
    }

    #[test]
    fn test_first_line_and_token() {
        assert_eq!(first_line("12.5.30 rc\nsecond"), "12.5.30 rc");
        assert_eq!(first_line(""), "");
        assert_eq!(first_token("12.5.30 rc"), "12.5.30");
        assert_eq!(first_token("   "), "");
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("CentOS release 6.5 (Final)"), "6.5");
        assert_eq!(
            numeric_prefix("SUSE Linux Enterprise Server 11 (x86_64)"),
            "11"
        );
        assert_eq!(numeric_prefix("Fedora release 20 (Heisenbug)"), "20");
        assert_eq!(numeric_prefix("no digits here"), "");
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("11.3"), "11");
        assert_eq!(leading_integer("9"), "9");
        assert_eq!(leading_integer("jessie/sid"), "");
    }

    #[test]
    fn test_major_component() {
        assert_eq!(major_component("6.5"), "6");
        assert_eq!(major_component("7"), "7");
        assert_eq!(major_component(""), "");
    }
}
