use anyhow::{Context, Result};
use asset_kit_core::{format_kb, format_size, format_thousands};
use asset_kit_validator::{
    MarkupStatus, ProbeResult, ValidateOptions, ValidationRecord, ValidationReport, validate,
};
use std::path::PathBuf;

use super::resolve_manifest;
use crate::OutputFormat;

/// Validate that every expected asset is present.
///
/// Missing files only change the exit code with `strict`; otherwise the
/// report is the only signal.
pub fn run(
    root: PathBuf,
    manifest: Option<PathBuf>,
    format: OutputFormat,
    strict: bool,
    probe: bool,
) -> Result<()> {
    let manifest = resolve_manifest(&root, manifest.as_deref())?;
    let report = validate(&manifest, &root, ValidateOptions { probe })
        .context("Failed to validate assets")?;

    match format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    if strict {
        if !report.is_complete() {
            anyhow::bail!(
                "{} of {} files missing: {}",
                report.totals.missing,
                report.totals.checked,
                report.missing_names().join(", ")
            );
        }
        if report.has_markup_issues() {
            anyhow::bail!("Markup check failed for {}", report.markup.path.display());
        }
    }

    Ok(())
}

fn print_text(report: &ValidationReport) {
    println!("🔍 Validating assets...");
    println!("{}", "=".repeat(50));

    for group in &report.groups {
        println!("\n📁 {}:", group.label);
        for record in &group.records {
            println!("   {}", record_line(record));
        }
        if group.is_complete() {
            println!("   🎉 All {} files present!", group.records.len());
        }
    }

    let totals = &report.totals;
    println!("\n{}", "=".repeat(50));
    println!("📊 VALIDATION SUMMARY:");
    println!("   • Total files checked: {}", totals.checked);
    println!("   • Files present: {}", totals.present);
    println!("   • Files missing: {}", totals.missing);
    println!(
        "   • Total size: {} bytes ({})",
        format_thousands(totals.bytes),
        format_kb(totals.bytes)
    );

    if report.is_complete() {
        println!("\n🎉 SUCCESS: All required assets are present!");
        println!("🚀 The game is ready to run!");
    } else {
        println!("\n⚠️  WARNING: {} files are missing!", totals.missing);
        println!("💡 Run 'asset-kit generate' to create missing files");
    }

    if !report.extraneous.is_empty() {
        println!("\n📎 Files not in the manifest:");
        for name in &report.extraneous {
            println!("   • {}", name);
        }
    }

    println!("\n🔍 Checking HTML preload links...");
    match &report.markup.status {
        MarkupStatus::NotFound => {
            println!("   ❌ {} not found", report.markup.path.display());
        }
        MarkupStatus::Clean => {
            println!("   ✅ HTML preload links are correctly formatted");
        }
        MarkupStatus::Issues { issues } => {
            println!("   ⚠️  HTML Issues found:");
            for issue in issues {
                println!("      • {}", issue);
            }
        }
    }
}

fn record_line(record: &ValidationRecord) -> String {
    let Some(size) = record.size else {
        return format!("❌ {} - MISSING", record.file_name);
    };

    let mut line = format!("✅ {} ({})", record.file_name, format_size(size));
    match &record.probe {
        Some(ProbeResult::Audio { duration_ms }) => {
            line.push_str(&format!(" [audio, {} ms]", duration_ms));
        }
        Some(ProbeResult::Unrecognized { reason }) => {
            line.push_str(&format!(" [⚠ not recognized as audio: {}]", reason));
        }
        None => {}
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(size: Option<u64>, probe: Option<ProbeResult>) -> ValidationRecord {
        ValidationRecord {
            path: PathBuf::from("assets/sounds/kill.mp3"),
            file_name: "kill.mp3".to_string(),
            exists: size.is_some(),
            size,
            probe,
        }
    }

    #[test]
    fn test_record_line_missing() {
        assert_eq!(record_line(&record(None, None)), "❌ kill.mp3 - MISSING");
    }

    #[test]
    fn test_record_line_sizes() {
        assert_eq!(record_line(&record(Some(750), None)), "✅ kill.mp3 (750 bytes)");
        assert_eq!(record_line(&record(Some(14810), None)), "✅ kill.mp3 (14.5 KB)");
    }

    #[test]
    fn test_record_line_probe() {
        let audio = record(Some(750), Some(ProbeResult::Audio { duration_ms: 130 }));
        assert_eq!(record_line(&audio), "✅ kill.mp3 (750 bytes) [audio, 130 ms]");

        let bad = record(
            Some(3),
            Some(ProbeResult::Unrecognized {
                reason: "no frames".to_string(),
            }),
        );
        assert!(record_line(&bad).contains("not recognized as audio: no frames"));
    }
}
