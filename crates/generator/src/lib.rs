// Placeholder sound generation

pub mod container;

use asset_kit_core::{Asset, Category, Manifest, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use container::{container_bytes, container_len, legacy_bytes};

/// What happened to one file during a generator run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created { bytes: u64 },
    /// Left alone because something already exists at the path
    Skipped,
    /// Replaced by the legacy generator
    Overwritten { bytes: u64 },
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub file_name: String,
    pub category: Category,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub files: Vec<FileOutcome>,
}

impl GenerationReport {
    /// Files written that did not exist before
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped))
    }

    pub fn overwritten(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Overwritten { .. }))
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Write a placeholder for every manifest asset that does not exist yet.
///
/// Each placeholder is `container_bytes(category.frame_count())`. Anything
/// already at an asset's path is left untouched, so running this twice
/// produces the same files and the second run creates nothing.
///
/// # Errors
///
/// Filesystem failures (permissions, disk space) are returned as-is; files
/// written before the failure stay on disk.
pub fn generate_missing(manifest: &Manifest, root: &Path) -> Result<GenerationReport> {
    let sounds_dir = manifest.sounds_path(root);
    fs::create_dir_all(&sounds_dir)?;
    info!(
        dir = %sounds_dir.display(),
        assets = manifest.assets.len(),
        "generating missing placeholders"
    );

    let mut report = GenerationReport::default();
    for asset in &manifest.assets {
        let path = manifest.asset_path(root, asset);
        let data = container_bytes(asset.category.frame_count());

        let outcome = if write_new(&path, &data)? {
            Outcome::Created {
                bytes: fs::metadata(&path)?.len(),
            }
        } else {
            Outcome::Skipped
        };
        debug!(path = %path.display(), category = %asset.category, ?outcome, "placeholder");

        report.files.push(file_outcome(asset, path, outcome));
    }

    Ok(report)
}

/// Write the legacy static block to every legacy asset, replacing whatever is there
pub fn generate_legacy(manifest: &Manifest, root: &Path) -> Result<GenerationReport> {
    let sounds_dir = manifest.sounds_path(root);
    fs::create_dir_all(&sounds_dir)?;
    info!(dir = %sounds_dir.display(), "writing legacy placeholders");

    let data = legacy_bytes();
    let mut report = GenerationReport::default();
    for asset in manifest.legacy_assets() {
        let path = manifest.asset_path(root, asset);
        let existed = path.exists();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &data)?;

        let bytes = data.len() as u64;
        let outcome = if existed {
            Outcome::Overwritten { bytes }
        } else {
            Outcome::Created { bytes }
        };
        debug!(path = %path.display(), ?outcome, "legacy placeholder");

        report.files.push(file_outcome(asset, path, outcome));
    }

    Ok(report)
}

/// Create `path` with `data` unless something already exists there.
///
/// Returns `false` when the path was taken.
fn write_new(path: &Path, data: &[u8]) -> io::Result<bool> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(err),
    };
    file.write_all(data)?;
    file.sync_all()?;
    Ok(true)
}

fn file_outcome(asset: &Asset, path: PathBuf, outcome: Outcome) -> FileOutcome {
    FileOutcome {
        path,
        file_name: asset.file_name(),
        category: asset.category,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_kit_core::{AssetGroup, default_manifest};
    use crate::container::{FRAME_LEN, ID3_PREFIX};
    use tempfile::TempDir;

    fn sound(dir: &TempDir, name: &str) -> PathBuf {
        dir.path().join("assets/sounds").join(name)
    }

    #[test]
    fn test_generate_missing_creates_all_files() {
        let dir = TempDir::new().unwrap();
        let manifest = default_manifest();

        let report = generate_missing(&manifest, dir.path()).unwrap();

        assert_eq!(report.created(), 20);
        assert_eq!(report.skipped(), 0);
        assert_eq!(report.total(), 20);
        for asset in &manifest.assets {
            assert!(manifest.asset_path(dir.path(), asset).is_file());
        }
    }

    #[test]
    fn test_generate_missing_sizes_follow_category() {
        let dir = TempDir::new().unwrap();
        generate_missing(&default_manifest(), dir.path()).unwrap();

        let size = |name: &str| fs::metadata(sound(&dir, name)).unwrap().len() as usize;
        assert_eq!(size("lobby.mp3"), ID3_PREFIX.len() + 50 * FRAME_LEN);
        assert_eq!(size("kill.mp3"), ID3_PREFIX.len() + 5 * FRAME_LEN);
        assert_eq!(size("ambient.mp3"), ID3_PREFIX.len() + 100 * FRAME_LEN);
        assert_eq!(size("lobby.mp3"), 7410);
        assert_eq!(size("kill.mp3"), 750);
    }

    #[test]
    fn test_generate_missing_reports_written_size() {
        let dir = TempDir::new().unwrap();
        let report = generate_missing(&default_manifest(), dir.path()).unwrap();

        let lobby = report
            .files
            .iter()
            .find(|f| f.file_name == "lobby.mp3")
            .unwrap();
        assert_eq!(lobby.category, Category::Music);
        assert_eq!(lobby.outcome, Outcome::Created { bytes: 7410 });
    }

    #[test]
    fn test_generate_missing_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let manifest = default_manifest();

        generate_missing(&manifest, dir.path()).unwrap();
        let before: Vec<Vec<u8>> = manifest
            .assets
            .iter()
            .map(|a| fs::read(manifest.asset_path(dir.path(), a)).unwrap())
            .collect();

        let second = generate_missing(&manifest, dir.path()).unwrap();
        assert_eq!(second.created(), 0);
        assert_eq!(second.skipped(), 20);

        let after: Vec<Vec<u8>> = manifest
            .assets
            .iter()
            .map(|a| fs::read(manifest.asset_path(dir.path(), a)).unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_generate_missing_leaves_existing_files_untouched() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets/sounds")).unwrap();
        fs::write(sound(&dir, "kill.mp3"), b"real recording").unwrap();

        let report = generate_missing(&default_manifest(), dir.path()).unwrap();

        assert_eq!(report.created(), 19);
        assert_eq!(report.skipped(), 1);
        assert_eq!(fs::read(sound(&dir, "kill.mp3")).unwrap(), b"real recording");
    }

    #[test]
    fn test_generate_missing_nested_asset_path() {
        let dir = TempDir::new().unwrap();
        let mut manifest = default_manifest();
        manifest.assets = vec![Asset::new("ui/click.mp3", Category::Sfx, AssetGroup::Main)];

        let report = generate_missing(&manifest, dir.path()).unwrap();
        assert_eq!(report.created(), 1);
        assert!(sound(&dir, "ui/click.mp3").is_file());
    }

    #[test]
    fn test_generate_legacy_writes_five_fixed_files() {
        let dir = TempDir::new().unwrap();
        let report = generate_legacy(&default_manifest(), dir.path()).unwrap();

        assert_eq!(report.total(), 5);
        assert_eq!(report.created(), 5);
        for f in &report.files {
            assert_eq!(fs::read(&f.path).unwrap(), legacy_bytes());
        }
        assert!(!sound(&dir, "lobby.mp3").exists());
    }

    #[test]
    fn test_generate_legacy_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets/sounds")).unwrap();
        fs::write(sound(&dir, "emergency.mp3"), b"old").unwrap();

        let report = generate_legacy(&default_manifest(), dir.path()).unwrap();

        assert_eq!(report.overwritten(), 1);
        assert_eq!(report.created(), 4);
        assert_eq!(fs::read(sound(&dir, "emergency.mp3")).unwrap(), legacy_bytes());
    }

    #[cfg(unix)]
    #[test]
    fn test_generate_missing_skips_dangling_symlink() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets/sounds")).unwrap();
        let link = sound(&dir, "vent.mp3");
        std::os::unix::fs::symlink(dir.path().join("nowhere.mp3"), &link).unwrap();

        let report = generate_missing(&default_manifest(), dir.path()).unwrap();

        let vent = report.files.iter().find(|f| f.file_name == "vent.mp3").unwrap();
        assert_eq!(vent.outcome, Outcome::Skipped);
        assert!(!dir.path().join("nowhere.mp3").exists());
    }

    #[test]
    fn test_generate_missing_fails_when_sounds_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/sounds"), b"not a dir").unwrap();

        assert!(generate_missing(&default_manifest(), dir.path()).is_err());
    }
}
