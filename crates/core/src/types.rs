use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Sound category; decides how long a placeholder runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Music,
    Ambient,
    #[default]
    Sfx,
}

impl Category {
    /// Number of placeholder frames written for this category.
    ///
    /// One frame is roughly 26ms of audio, so music runs about 1.3s,
    /// ambient about 2.6s and sound effects about 0.13s.
    pub fn frame_count(self) -> usize {
        match self {
            Category::Music => 50,
            Category::Ambient => 100,
            Category::Sfx => 5,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Music => "🎵",
            Category::Ambient => "🌊",
            Category::Sfx => "🔊",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Music => "music",
            Category::Ambient => "ambient",
            Category::Sfx => "sfx",
        };
        f.write_str(name)
    }
}

/// Whether an asset is loaded first or only when the primary fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetGroup {
    #[default]
    Main,
    Fallback,
}

impl AssetGroup {
    pub const ALL: [AssetGroup; 2] = [AssetGroup::Main, AssetGroup::Fallback];

    pub fn label(self) -> &'static str {
        match self {
            AssetGroup::Main => "Audio Files (Main)",
            AssetGroup::Fallback => "Audio Files (Fallback)",
        }
    }
}

/// One expected sound file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Path relative to the sounds directory
    pub file: PathBuf,
    pub category: Category,
    pub group: AssetGroup,
    /// Written by the legacy generator
    pub legacy: bool,
}

impl Asset {
    pub fn new(file: &str, category: Category, group: AssetGroup) -> Self {
        Asset {
            file: PathBuf::from(file),
            category,
            group,
            legacy: false,
        }
    }

    pub fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }

    /// Get the filename component for display
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }
}

/// A substring that must not appear in the markup file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenPattern {
    pub pattern: String,
    pub message: String,
}

/// Static text checks run against the game's markup file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRules {
    pub file: PathBuf,
    pub forbidden: Vec<ForbiddenPattern>,
}

/// The full list of expected assets plus where to find them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub sounds_dir: PathBuf,
    pub markup: MarkupRules,
    pub assets: Vec<Asset>,
}

impl Manifest {
    /// Directory holding the sound files, resolved against `root`
    pub fn sounds_path(&self, root: &Path) -> PathBuf {
        root.join(&self.sounds_dir)
    }

    pub fn asset_path(&self, root: &Path, asset: &Asset) -> PathBuf {
        self.sounds_path(root).join(&asset.file)
    }

    pub fn markup_path(&self, root: &Path) -> PathBuf {
        root.join(&self.markup.file)
    }

    pub fn group(&self, group: AssetGroup) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(move |a| a.group == group)
    }

    pub fn legacy_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|a| a.legacy)
    }
}

/// Format an integer with comma thousands separators (1234567 -> "1,234,567")
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Helper to format bytes as kilobytes with one decimal
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Byte count below 1 KiB, kilobytes otherwise
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", format_thousands(bytes))
    } else {
        format_kb(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counts() {
        assert_eq!(Category::Music.frame_count(), 50);
        assert_eq!(Category::Ambient.frame_count(), 100);
        assert_eq!(Category::Sfx.frame_count(), 5);
        assert_eq!(Category::default(), Category::Sfx);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(14810), "14,810");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(750), "750 bytes");
        assert_eq!(format_size(1023), "1,023 bytes");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(7410), "7.2 KB");
    }

    #[test]
    fn test_asset_paths() {
        let manifest = crate::default_manifest();
        let asset = &manifest.assets[0];
        let path = manifest.asset_path(Path::new("game"), asset);
        assert_eq!(path, Path::new("game/assets/sounds/ambient.mp3"));
        assert_eq!(asset.file_name(), "ambient.mp3");
    }
}
