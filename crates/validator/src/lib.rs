// Asset validation: presence, sizes, markup checks

mod probe;

use asset_kit_core::{AssetGroup, Manifest, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub use probe::{ProbeResult, probe_file};

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Run each present file through the audio probe
    pub probe: bool,
}

/// Presence and size of one expected file
#[derive(Debug, Clone, Serialize)]
pub struct ValidationRecord {
    pub path: PathBuf,
    pub file_name: String,
    pub exists: bool,
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub group: AssetGroup,
    pub label: &'static str,
    pub records: Vec<ValidationRecord>,
}

impl GroupReport {
    pub fn missing(&self) -> usize {
        self.records.iter().filter(|r| !r.exists).count()
    }

    pub fn is_complete(&self) -> bool {
        self.missing() == 0
    }

    pub fn missing_names(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| !r.exists)
            .map(|r| r.file_name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub checked: usize,
    pub present: usize,
    pub missing: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarkupStatus {
    NotFound,
    Clean,
    Issues { issues: Vec<String> },
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkupReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: MarkupStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub groups: Vec<GroupReport>,
    pub totals: Totals,
    pub markup: MarkupReport,
    /// Files in the sounds directory the manifest does not mention
    pub extraneous: Vec<String>,
}

impl ValidationReport {
    /// No expected file is missing
    pub fn is_complete(&self) -> bool {
        self.totals.missing == 0
    }

    pub fn has_markup_issues(&self) -> bool {
        matches!(self.markup.status, MarkupStatus::Issues { .. })
    }

    pub fn missing_names(&self) -> Vec<&str> {
        self.groups.iter().flat_map(|g| g.missing_names()).collect()
    }
}

/// Check every manifest asset under `root` and run the markup check.
///
/// Missing files are recorded, never returned as errors. Only a failure to
/// read an existing markup file is an error.
pub fn validate(
    manifest: &Manifest,
    root: &Path,
    options: ValidateOptions,
) -> Result<ValidationReport> {
    info!(root = %root.display(), assets = manifest.assets.len(), "validating assets");

    let mut totals = Totals::default();
    let mut groups = Vec::new();

    for group in AssetGroup::ALL {
        let mut records = Vec::new();
        for asset in manifest.group(group) {
            let path = manifest.asset_path(root, asset);
            let record = check_file(&path, asset.file_name(), options);
            debug!(path = %path.display(), exists = record.exists, size = ?record.size, "checked");

            totals.checked += 1;
            match record.size {
                Some(size) => {
                    totals.present += 1;
                    totals.bytes += size;
                }
                None => totals.missing += 1,
            }
            records.push(record);
        }

        if !records.is_empty() {
            groups.push(GroupReport {
                group,
                label: group.label(),
                records,
            });
        }
    }

    let markup = check_markup(manifest, root)?;
    let extraneous = find_extraneous(manifest, root);

    Ok(ValidationReport {
        groups,
        totals,
        markup,
        extraneous,
    })
}

fn check_file(path: &Path, file_name: String, options: ValidateOptions) -> ValidationRecord {
    let size = fs::metadata(path).ok().map(|m| m.len());
    let probe = match size {
        Some(_) if options.probe => Some(probe_file(path)),
        _ => None,
    };

    ValidationRecord {
        path: path.to_path_buf(),
        file_name,
        exists: size.is_some(),
        size,
        probe,
    }
}

/// Plain substring search for each forbidden pattern; the markup is not parsed
fn check_markup(manifest: &Manifest, root: &Path) -> Result<MarkupReport> {
    let path = manifest.markup_path(root);
    if !path.is_file() {
        return Ok(MarkupReport {
            path,
            status: MarkupStatus::NotFound,
        });
    }

    let bytes = fs::read(&path)?;
    let content = String::from_utf8_lossy(&bytes);

    let issues: Vec<String> = manifest
        .markup
        .forbidden
        .iter()
        .filter(|rule| content.contains(rule.pattern.as_str()))
        .map(|rule| rule.message.clone())
        .collect();

    let status = if issues.is_empty() {
        MarkupStatus::Clean
    } else {
        MarkupStatus::Issues { issues }
    };

    Ok(MarkupReport { path, status })
}

/// Top-level files in the sounds dir that no manifest asset points at.
/// Assets are matched by their path relative to the sounds dir, so a nested
/// `ui/click.mp3` does not vouch for a stray `click.mp3`.
fn find_extraneous(manifest: &Manifest, root: &Path) -> Vec<String> {
    let sounds_dir = manifest.sounds_path(root);
    let known: HashSet<&Path> = manifest.assets.iter().map(|a| a.file.as_path()).collect();

    let mut extraneous: Vec<String> = WalkDir::new(&sounds_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .strip_prefix(&sounds_dir)
                .map(|rel| !known.contains(rel))
                .unwrap_or(false)
        })
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();

    extraneous.sort();
    extraneous
}
