//! Interactive installer: transparently downloads the autoinstaller binary
//! matching the environment and forwards all arguments to it.

use plesk_bootstrap::bootstrap;
use plesk_bootstrap::config::Mode;

fn main() {
    bootstrap::main_entry(Mode::InteractiveInstaller);
}
