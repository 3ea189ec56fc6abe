use std::process::Command;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Version of the compiler building this crate, reported by /health
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = Command::new(rustc).arg("--version").output()?;
    let version = String::from_utf8(output.stdout)?;

    println!("cargo:rustc-env=MINDTRACK_RUSTC_VERSION={}", version.trim());
    println!("cargo:rerun-if-env-changed=RUSTC");

    Ok(())
}
