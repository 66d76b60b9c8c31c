//! Embeds the git revision and build time so `askgpt --version` can report
//! which binary is running. Missing git/date tooling yields "unknown".

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Ok(head) = std::fs::read_to_string(".git/HEAD") {
        if let Some(reference) = head.trim().strip_prefix("ref: ") {
            println!("cargo:rerun-if-changed=.git/{reference}");
        }
    }
    println!("cargo:rerun-if-env-changed=ASKGPT_BUILD_GIT_HASH");
    println!("cargo:rerun-if-env-changed=ASKGPT_BUILD_TIMESTAMP");

    let revision = std::env::var("ASKGPT_BUILD_GIT_HASH")
        .ok()
        .or_else(|| capture("git", &["rev-parse", "--short=12", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let built = std::env::var("ASKGPT_BUILD_TIMESTAMP")
        .ok()
        .or_else(|| capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=ASKGPT_BUILD_GIT_HASH={revision}");
    println!("cargo:rustc-env=ASKGPT_BUILD_TIMESTAMP={built}");
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
