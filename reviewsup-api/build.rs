//! Captures build identification (git hash, timestamp, profile) for the
//! startup banner.

use std::process::Command;

const GIT_HASH_LEN: usize = 8;

fn git_hash() -> String {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output();
    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
            .trim()
            .chars()
            .take(GIT_HASH_LEN)
            .collect(),
        _ => "unknown".to_string(),
    }
}

fn main() {
    println!("cargo:rustc-env=GIT_HASH={}", git_hash());
    println!(
        "cargo:rustc-env=BUILD_TIMESTAMP={}",
        chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
    );
    println!(
        "cargo:rustc-env=BUILD_PROFILE={}",
        std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string())
    );
    // No rerun-if-changed directives: the hash and timestamp must stay
    // current on every build
}
