pub mod generate;
pub mod manifest;
pub mod validate;

use anyhow::{Context, Result};
use asset_kit_core::{Manifest, load_manifest};
use std::path::Path;
use tracing::info;

/// Load the manifest for a project, naming the source in the logs
fn resolve_manifest(root: &Path, explicit: Option<&Path>) -> Result<Manifest> {
    let manifest = load_manifest(root, explicit).with_context(|| match explicit {
        Some(path) => format!("Failed to load manifest {}", path.display()),
        None => format!("Failed to load manifest from {}", root.display()),
    })?;
    info!(
        assets = manifest.assets.len(),
        sounds_dir = %manifest.sounds_dir.display(),
        "manifest loaded"
    );
    Ok(manifest)
}
