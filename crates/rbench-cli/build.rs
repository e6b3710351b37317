use std::process::Command;

fn main() {
    // Capture the toolchain version for the report header
    let rustc_version = Command::new("rustc")
        .arg("--version")
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|_| "rustc (unknown)".to_string());
    println!("cargo:rustc-env=RUSTC_VERSION={}", rustc_version);

    // Rerun if Cargo.toml changes
    println!("cargo:rerun-if-changed=Cargo.toml");
}
