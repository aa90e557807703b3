fn main() {
    println!("cargo:rerun-if-env-changed=PLESK_OVERRIDE_SOURCE");

    // Builds may pin a default download source; it becomes the compiled-in
    // override the binaries fall back to and enforce on the autoinstaller.
    let override_source = std::env::var("PLESK_OVERRIDE_SOURCE").unwrap_or_default();
    println!("cargo:rustc-env=PLESK_OVERRIDE_SOURCE={}", override_source);
}
