use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// target/<profile>, found by walking up from OUT_DIR
/// (target/<profile>/build/backend-xxx/out)
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    // The dashboard server reads config.toml next to its executable
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !source.exists() {
        println!("cargo:warning=no config.toml at workspace root, the embedded defaults apply");
        return;
    }

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    let dest = target_dir.join("config.toml");
    match fs::copy(&source, &dest) {
        Ok(_) => println!("cargo:warning=copied config.toml to {}", dest.display()),
        Err(e) => println!("cargo:warning=failed to copy config.toml: {}", e),
    }
}
