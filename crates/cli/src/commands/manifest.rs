use anyhow::{Context, Result};
use asset_kit_core::{config::manifest_to_toml, default_manifest};
use std::fs;
use std::path::PathBuf;

/// Print the built-in manifest, or write it out as a starting point for a custom one
pub fn run(output: Option<PathBuf>) -> Result<()> {
    let rendered =
        manifest_to_toml(&default_manifest()).context("Failed to render built-in manifest")?;

    let Some(path) = output else {
        print!("{}", rendered);
        return Ok(());
    };

    if path.exists() {
        anyhow::bail!(
            "{} already exists\nHint: Delete it first or choose another path",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Wrote manifest to {}", path.display());
    Ok(())
}
