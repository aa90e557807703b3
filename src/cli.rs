//! Command-line flag scanning.
//!
//! Both installer flavors accept the same small flag set and must silently
//! ignore everything else: in interactive mode the full original argument
//! vector is forwarded verbatim to the downloaded autoinstaller, so a strict
//! parser would reject arguments that are not ours to validate. The argument
//! vector is first sifted into the recognized subsequence, so flags are
//! honored wherever they appear, then that subsequence is parsed with a clap
//! command built without the implicit help/version flags.

use clap::{Arg, ArgAction, Command};

use crate::config::{Mode, RunConfig};

fn command(mode: Mode) -> Command {
    Command::new(mode.program_name())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("source")
                .long("source")
                .value_name("URL")
                .num_args(1)
                .overrides_with("source"),
        )
        .arg(
            Arg::new("tier")
                .long("tier")
                .value_name("TIERS")
                .num_args(1)
                .overrides_with("tier"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .overrides_with("verbose"),
        )
        .arg(
            Arg::new("dry_run")
                .short('n')
                .action(ArgAction::SetTrue)
                .overrides_with("dry_run"),
        )
}

/// The subsequence of `args` that belongs to the bootstrap flag set. A value
/// flag at the very end of the vector has no value and is dropped.
fn recognized_args(args: &[String]) -> Vec<String> {
    let mut recognized = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--source" | "--tier" => {
                if let Some(value) = iter.next() {
                    recognized.push(arg.clone());
                    recognized.push(value.clone());
                }
            }
            "-v" | "-n" => recognized.push(arg.clone()),
            other if other.starts_with("--source=") || other.starts_with("--tier=") => {
                recognized.push(arg.clone());
            }
            _ => {}
        }
    }
    recognized
}

/// Build the run configuration from compiled defaults and the given argument
/// vector (without the program name).
pub fn parse_config(mode: Mode, args: &[String]) -> RunConfig {
    let config = RunConfig::new(mode);
    apply_matches(config, mode, args)
}

fn apply_matches(mut config: RunConfig, mode: Mode, args: &[String]) -> RunConfig {
    let matches = command(mode).get_matches_from(recognized_args(args));

    if let Some(source) = matches.get_one::<String>("source") {
        config.source = source.clone();
    }

    // Tier, verbose, and dry-run are one-click switches; the interactive
    // flavor accepts them without effect and forwards them to the installer.
    if mode == Mode::OneClickInstaller {
        if let Some(tiers) = matches.get_one::<String>("tier") {
            config.tiers = tiers.clone();
        }
        config.verbose = matches.get_flag("verbose");
        config.dry_run = matches.get_flag("dry_run");
    }

    config
}
