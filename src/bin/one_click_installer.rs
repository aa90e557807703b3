//! One-click installer: always installs the latest available Plesk release
//! for the environment it runs on, with fixed installation options.

use plesk_bootstrap::bootstrap;
use plesk_bootstrap::config::Mode;

fn main() {
    bootstrap::main_entry(Mode::OneClickInstaller);
}
