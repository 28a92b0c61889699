use anyhow::{Context, Result};
use asset_kit_generator::{Outcome, generate_legacy, generate_missing};
use std::path::PathBuf;

use super::resolve_manifest;

/// Create placeholder sounds for every manifest asset that is missing.
///
/// Existing files are never touched, so this is safe to run repeatedly.
pub fn run(root: PathBuf, manifest: Option<PathBuf>) -> Result<()> {
    let manifest = resolve_manifest(&root, manifest.as_deref())?;

    println!("🎵 Creating placeholder sound files...");
    println!("{}", "=".repeat(50));

    let report = generate_missing(&manifest, &root).with_context(|| {
        format!(
            "Failed to write placeholders in {}",
            manifest.sounds_path(&root).display()
        )
    })?;

    for file in &report.files {
        match file.outcome {
            Outcome::Skipped => println!("⏭️  Skipped (exists): {}", file.file_name),
            Outcome::Created { bytes } | Outcome::Overwritten { bytes } => println!(
                "✅ Created {}: {} ({} bytes)",
                file.category.icon(),
                file.file_name,
                bytes
            ),
        }
    }

    println!("{}", "=".repeat(50));
    println!("🎉 Sound file generation completed!");
    println!("📊 Summary:");
    println!("   • Created: {} files", report.created());
    println!("   • Skipped: {} files (already existed)", report.skipped());
    println!("   • Total: {} files", report.total());
    println!();
    println!("📝 Notes:");
    println!("   • These are minimal silent MP3 files to prevent 404 errors");
    println!("   • Replace with actual audio files for better game experience");
    println!("   • Fallback files provide redundancy if main files fail to load");
    println!("   • Music files are longer than SFX files");

    Ok(())
}

/// Overwrite the legacy sound set with the old fixed template
pub fn run_legacy(root: PathBuf, manifest: Option<PathBuf>) -> Result<()> {
    let manifest = resolve_manifest(&root, manifest.as_deref())?;

    println!("Creating minimal MP3 files...");

    let report = generate_legacy(&manifest, &root).with_context(|| {
        format!(
            "Failed to write legacy placeholders in {}",
            manifest.sounds_path(&root).display()
        )
    })?;

    if report.total() == 0 {
        println!("⚠ Manifest has no legacy assets, nothing written");
        return Ok(());
    }

    for file in &report.files {
        println!("Created: {}", file.path.display());
    }

    println!("All {} sound files created successfully!", report.total());
    println!(
        "Note: These are minimal silent MP3 files. Replace with actual audio files for better experience."
    );

    Ok(())
}
