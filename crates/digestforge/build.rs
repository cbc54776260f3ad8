use std::env;
use std::path::PathBuf;

use anyhow::Context;
use digestforge_codegen::{CONFIG_FILE, ConfigLoader, Emitter, Registry};

fn main() -> anyhow::Result<()> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", manifest_dir.join(CONFIG_FILE).display());
    let loader = ConfigLoader::new(&manifest_dir);
    for var in loader.env_vars() {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let config = loader.load().context("loading digestforge.toml")?;
    let registry = Registry::builtin().context("building the builtin registry")?;

    let emission = Emitter::new(&registry)
        .with_options(config.family_options())
        .emit(&config.families);

    for diagnostic in &emission.diagnostics {
        println!("cargo:warning={diagnostic}");
    }

    let path = out_dir.join(&config.output);
    emission
        .write_to(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("cargo:rustc-env=DIGESTFORGE_GENERATED={}", path.display());

    Ok(())
}
