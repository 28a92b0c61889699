use crate::error::{Error, Result};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest picked up from the project root when no path is given
pub const MANIFEST_FILE_NAME: &str = "assets.toml";

const DEFAULT_SOUNDS_DIR: &str = "assets/sounds";
const DEFAULT_MARKUP_FILE: &str = "index.html";

/// Raw TOML manifest structure
/// This matches the assets.toml file layout exactly
#[derive(Debug, Serialize, Deserialize)]
struct RawManifest {
    #[serde(default = "default_sounds_dir")]
    sounds_dir: String,
    #[serde(default)]
    markup: RawMarkup,
    #[serde(default, rename = "asset")]
    assets: Vec<RawAsset>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawMarkup {
    #[serde(default = "default_markup_file")]
    file: String,
    #[serde(default)]
    forbidden: Vec<ForbiddenPattern>,
}

impl Default for RawMarkup {
    fn default() -> Self {
        RawMarkup {
            file: default_markup_file(),
            forbidden: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawAsset {
    file: String, // Convert to PathBuf
    #[serde(default)]
    category: Category,
    #[serde(default)]
    group: AssetGroup,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    legacy: bool,
}

fn default_sounds_dir() -> String {
    DEFAULT_SOUNDS_DIR.to_string()
}

fn default_markup_file() -> String {
    DEFAULT_MARKUP_FILE.to_string()
}

/// The asset list the game ships with.
///
/// Main files come first, then their fallbacks. The first five main files
/// are the ones the legacy generator has always written.
pub fn default_manifest() -> Manifest {
    use AssetGroup::{Fallback, Main};
    use Category::{Ambient, Music, Sfx};

    let assets = vec![
        Asset::new("ambient.mp3", Ambient, Main).legacy(),
        Asset::new("button-click.mp3", Sfx, Main).legacy(),
        Asset::new("task-complete.mp3", Sfx, Main).legacy(),
        Asset::new("emergency.mp3", Sfx, Main).legacy(),
        Asset::new("kill.mp3", Sfx, Main).legacy(),
        Asset::new("sabotage.mp3", Sfx, Main),
        Asset::new("vent.mp3", Sfx, Main),
        Asset::new("footstep.mp3", Sfx, Main),
        Asset::new("lobby.mp3", Music, Main),
        Asset::new("discussion.mp3", Music, Main),
        Asset::new("default-click.mp3", Sfx, Fallback),
        Asset::new("default-complete.mp3", Sfx, Fallback),
        Asset::new("default-kill.mp3", Sfx, Fallback),
        Asset::new("default-emergency.mp3", Sfx, Fallback),
        Asset::new("default-sabotage.mp3", Sfx, Fallback),
        Asset::new("default-vent.mp3", Sfx, Fallback),
        Asset::new("default-footstep.mp3", Sfx, Fallback),
        Asset::new("default-ambient.mp3", Ambient, Fallback),
        Asset::new("default-lobby.mp3", Music, Fallback),
        Asset::new("default-discussion.mp3", Music, Fallback),
    ];

    Manifest {
        sounds_dir: PathBuf::from(DEFAULT_SOUNDS_DIR),
        markup: MarkupRules {
            file: PathBuf::from(DEFAULT_MARKUP_FILE),
            forbidden: vec![ForbiddenPattern {
                pattern: r#"crossorigin="anonymous""#.to_string(),
                message: "Found crossorigin attribute in preload links".to_string(),
            }],
        },
        assets,
    }
}

/// Resolve the manifest for a project.
///
/// An explicit path always wins. Otherwise `assets.toml` in `root` is used
/// if present, and the built-in manifest if not.
pub fn load_manifest(root: &Path, explicit: Option<&Path>) -> Result<Manifest> {
    if let Some(path) = explicit {
        return parse_manifest_file(path);
    }

    let candidate = root.join(MANIFEST_FILE_NAME);
    if candidate.is_file() {
        return parse_manifest_file(candidate);
    }

    Ok(default_manifest())
}

/// Parse a manifest from a file path
pub fn parse_manifest_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let content = fs::read_to_string(path)?;
    parse_manifest_toml(&content)
}

/// Parse a manifest from a string (useful for testing)
pub fn parse_manifest_toml(content: &str) -> Result<Manifest> {
    let raw: RawManifest = toml::from_str(content)?;

    let sounds_dir = validate_path(&raw.sounds_dir, "sounds_dir")?;
    let markup_file = validate_path(&raw.markup.file, "markup.file")?;

    for rule in &raw.markup.forbidden {
        if rule.pattern.is_empty() {
            return Err(Error::ConfigParse("Empty pattern in 'markup.forbidden'".to_string()));
        }
    }

    let mut seen = HashSet::new();
    let mut assets = Vec::with_capacity(raw.assets.len());
    for a in raw.assets {
        let file = validate_path(&a.file, "asset.file")?;
        if !seen.insert(file.clone()) {
            return Err(Error::ConfigParse(format!("Duplicate asset '{}'", file.display())));
        }
        assets.push(Asset {
            file,
            category: a.category,
            group: a.group,
            legacy: a.legacy,
        });
    }

    Ok(Manifest {
        sounds_dir,
        markup: MarkupRules {
            file: markup_file,
            forbidden: raw.markup.forbidden,
        },
        assets,
    })
}

/// Render a manifest in the same layout `parse_manifest_toml` reads
pub fn manifest_to_toml(manifest: &Manifest) -> Result<String> {
    let raw = RawManifest {
        sounds_dir: path_to_string(&manifest.sounds_dir)?,
        markup: RawMarkup {
            file: path_to_string(&manifest.markup.file)?,
            forbidden: manifest.markup.forbidden.clone(),
        },
        assets: manifest
            .assets
            .iter()
            .map(|a| {
                Ok(RawAsset {
                    file: path_to_string(&a.file)?,
                    category: a.category,
                    group: a.group,
                    legacy: a.legacy,
                })
            })
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(toml::to_string_pretty(&raw)?)
}

fn path_to_string(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidData(format!("non UTF-8 path: {}", path.display())))
}

/// Validate and convert a path string to PathBuf.
///
/// Manifest paths are resolved against the project root, so they must stay
/// inside it. Rejects:
/// - Absolute paths (starting with `/` or Windows drive letters)
/// - Paths containing parent directory references (`..`)
/// - Empty paths
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() || path.has_root() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!("Empty path in '{}' field", field_name)));
    }

    Ok(path.to_path_buf())
}
