use std::path::Path;
use std::process::Command;

/// Short SHA of the checkout this binary is built from, if any.
fn git_short_sha(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = Path::new(&manifest_dir).join("..");

    let sha = git_short_sha(&repo_root).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=DAYBOARD_BUILD_SHA={sha}");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
